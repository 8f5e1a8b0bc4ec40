use crate::EPOCH;
use crate::simulate::Solver;
use crate::strip::Label;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::{Level, LevelFilter, log};

#[derive(Parser)]
#[command(
    name = "strip-fold",
    about = "Where does each square end up when a strip of 2^k squares is folded in half k times?"
)]
pub struct MainCli {
    #[command(subcommand)]
    pub command: Command,

    /// Read the final stack from the top down instead of from label 1 upwards
    #[arg(long, global = true, help = "Count positions from the top of the folded stack")]
    pub top_down: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = ArgAction::Count,
        conflicts_with = "quiet",
        help = "Log fold progress (-v) or every intermediate state (-vv)"
    )]
    pub verbose: u8,

    #[arg(short = 'q', long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Closed-form position of a single label
    Position {
        #[arg(help = "Label of the square, in [1, 2^folds]")]
        label: Label,
        #[arg(help = "Number of times the strip is folded")]
        folds: u32,
    },
    /// Final order computed with the array simulation
    Array {
        #[arg(help = "Number of times the strip is folded")]
        folds: u32,
    },
    /// Final order computed with the linked-column simulation
    Linked {
        #[arg(help = "Number of times the strip is folded")]
        folds: u32,
    },
    /// Position of every label, as `label-position` pairs in label order
    Table {
        #[arg(help = "Number of times the strip is folded")]
        folds: u32,
        #[arg(long, value_enum, default_value_t = Solver::Linked, help = "Simulation used to build the table")]
        solver: Solver,
    },
    /// Check that every solver produces the same final order
    Verify {
        #[arg(help = "Number of times the strip is folded")]
        folds: u32,
    },
}

/// Routes all log records to stderr, stdout is reserved for results.
pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;
            let millis = duration.subsec_millis();

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}.{:0>3}]",
                record.level(),
                hours,
                min,
                sec,
                millis,
            );

            out.finish(format_args!("{:<25}{}", prefix, message))
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()?;
    log!(
        Level::Debug,
        "[EPOCH]: {}",
        jiff::Timestamp::now().to_string()
    );
    Ok(())
}
