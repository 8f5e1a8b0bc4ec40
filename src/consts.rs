use crate::strip::Label;

/// Largest accepted fold count: one fold per bit of a [`Label`].
pub const MAX_FOLDS: u32 = Label::BITS;

/// Number of random position queries timed per fold count by the bench binary.
pub const BENCH_N_QUERIES: usize = 100_000;

/// Seed used by the bench binary when none is given.
pub const BENCH_DEFAULT_SEED: u64 = 0;

pub const LOG_LEVEL_FILTER_RELEASE: log::LevelFilter = log::LevelFilter::Info;

pub const LOG_LEVEL_FILTER_DEBUG: log::LevelFilter = log::LevelFilter::Debug;

/// Above this fold count the bench binary skips the quadratic array simulation.
pub const BENCH_MAX_ARRAY_FOLDS: u32 = 16;
