use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, info};
use std::io::{BufWriter, Write};
use strip_fold::config::*;
use strip_fold::formula::fold_position_read;
use strip_fold::simulate::{Solver, cross_validate};
use strip_fold::strip::{FinalOrder, Folds};
use strip_fold::util::io;
use strip_fold::util::io::{Command, MainCli};
use tap::Tap;

fn main() -> Result<()> {
    let args = MainCli::parse();

    let mut config = DEFAULT_STRIP_FOLD_CONFIG;
    if args.top_down {
        config.read_order = ReadOrder::TopDown;
    }
    config.log_level_filter = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => config.log_level_filter,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    io::init_logger(config.log_level_filter)?;

    match args.command {
        Command::Position { label, folds } => {
            let folds = Folds::new(folds)?;
            let position = fold_position_read(label, folds, config.read_order)?;
            println!("position({}, {}) = {}", label, folds, position);
        }
        Command::Array { folds } => print_order(&run(Solver::Array, folds)?, &config)?,
        Command::Linked { folds } => print_order(&run(Solver::Linked, folds)?, &config)?,
        Command::Table { folds, solver } => {
            let order = run(solver, folds)?;
            let mut out = BufWriter::new(std::io::stdout().lock());
            for (label, position) in order.label_positions(config.read_order) {
                write!(out, "{}-{} ", label, position)?;
            }
            writeln!(out)?;
            out.flush()?;
        }
        Command::Verify { folds } => {
            let order = cross_validate(Folds::new(folds)?)?;
            println!("ok {}", order.len());
        }
    }

    Ok(())
}

fn run(solver: Solver, folds: u32) -> Result<FinalOrder> {
    let folds = Folds::new(folds)?;
    let order = solver.run(folds)?.tap(|order| {
        info!(
            "[MAIN] {} solver folded {} labels {} times",
            solver.name(),
            order.len(),
            folds
        )
    });
    Ok(order)
}

fn print_order(order: &FinalOrder, config: &StripFoldConfig) -> Result<()> {
    let mut out = BufWriter::new(std::io::stdout().lock());
    writeln!(out, "{}", order.read(config.read_order).join(" "))?;
    out.flush()?;
    Ok(())
}
