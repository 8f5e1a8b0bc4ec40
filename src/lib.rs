use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod consts;
pub mod error;
pub mod formula;
pub mod simulate;
pub mod strip;
pub mod util;

pub use config::*;
pub use error::FoldError;
pub use formula::fold_position;
pub use simulate::{Solver, cross_validate};
pub use strip::{FinalOrder, Folds, Label};

/// Reference instant for all elapsed times reported by the logger.
pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
