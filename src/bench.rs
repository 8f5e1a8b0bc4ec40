use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::env::args;
use std::time::{Duration, Instant};
use strip_fold::consts::{BENCH_DEFAULT_SEED, BENCH_MAX_ARRAY_FOLDS, BENCH_N_QUERIES};
use strip_fold::formula::{FoldOrderIter, fold_position};
use strip_fold::simulate::{ArrayFoldSimulator, FoldSimulator, LinkedFoldSimulator, simulate};
use strip_fold::strip::{FinalOrder, Folds};

fn main() -> Result<()> {
    //the maximum fold count is the first argument, an optional seed the second
    let max_folds: u32 = args()
        .nth(1)
        .context("first argument must be the maximum number of folds")?
        .parse()
        .context("first argument must be the maximum number of folds")?;
    let seed: u64 = match args().nth(2) {
        Some(arg) => arg.parse().context("second argument must be the seed")?,
        None => BENCH_DEFAULT_SEED,
    };

    println!("[BENCH] system time: {}", jiff::Timestamp::now());
    println!("[BENCH] using seed: {}", seed);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    println!(
        "{:>5} {:>10} {:>14} {:>14} {:>14} {:>14}",
        "folds",
        "labels",
        ArrayFoldSimulator::NAME.to_lowercase(),
        LinkedFoldSimulator::NAME.to_lowercase(),
        "closed form",
        format!("{}x query", BENCH_N_QUERIES)
    );

    for k in 1..=max_folds {
        let folds = Folds::new(k)?;

        let (linked, linked_time) = timed(|| simulate::<LinkedFoldSimulator>(folds))?;
        let (closed_form, closed_form_time) = timed(|| {
            FoldOrderIter::new(folds).and_then(|iter| FinalOrder::from_labels(iter.collect()))
        })?;
        ensure!(
            linked.first_mismatch(&closed_form).is_none(),
            "linked simulation and closed form disagree for {} folds",
            folds
        );

        // the array simulation shifts half the strip for every insertion
        let array_time = match k <= BENCH_MAX_ARRAY_FOLDS {
            true => {
                let (array, array_time) = timed(|| simulate::<ArrayFoldSimulator>(folds))?;
                ensure!(
                    array.first_mismatch(&linked).is_none(),
                    "array and linked simulations disagree for {} folds",
                    folds
                );
                Some(array_time)
            }
            false => None,
        };

        let strip_len = linked.len() as u64;
        let queries = (0..BENCH_N_QUERIES)
            .map(|_| rng.random_range(1..=strip_len))
            .collect_vec();
        let (checksum, query_time) = timed(|| {
            queries
                .iter()
                .map(|&label| fold_position(label, folds))
                .fold_ok(0, |acc, position| acc ^ position)
        })?;

        println!(
            "{:>5} {:>10} {:>14} {:>14} {:>14} {:>14} (checksum {:x})",
            k,
            strip_len,
            array_time.map_or("skipped".to_string(), |t| format!("{:.3?}", t)),
            format!("{:.3?}", linked_time),
            format!("{:.3?}", closed_form_time),
            format!("{:.3?}", query_time),
            checksum
        );
    }

    println!("[BENCH] system time: {}", jiff::Timestamp::now());

    Ok(())
}

fn timed<T, E>(f: impl FnOnce() -> Result<T, E>) -> Result<(T, Duration), E> {
    let start = Instant::now();
    let value = f()?;
    Ok((value, start.elapsed()))
}
