use crate::error::{FoldError, InvariantViolation};
use crate::formula::{FoldOrderIter, fold_depth};
use crate::strip::{FinalOrder, Folds};
use clap::ValueEnum;
use log::{debug, info, warn};

pub mod array;
pub mod linked;
pub mod stack;

pub use array::ArrayFoldSimulator;
pub use linked::LinkedFoldSimulator;

pub const CLOSED_FORM_NAME: &str = "CLOSED FORM";

/// A physical simulation of folding a strip in half, right half onto left half, `k` times.
pub trait FoldSimulator: Sized {
    /// Tag used in log records and mismatch reports
    const NAME: &'static str;

    /// Allocates every buffer needed for the whole run. Nothing is allocated afterwards.
    fn new(folds: Folds) -> Result<Self, FoldError>;

    /// Performs the next fold. Returns `false` once all folds have been performed.
    fn fold_once(&mut self) -> Result<bool, FoldError>;

    fn folds_done(&self) -> u32;

    /// Consumes the simulator, reading the surviving column from the bottom up.
    fn into_order(self) -> FinalOrder;
}

/// Runs every fold of `S` and returns the final order.
pub fn simulate<S: FoldSimulator>(folds: Folds) -> Result<FinalOrder, FoldError> {
    let mut sim = S::new(folds)?;
    while sim.fold_once()? {}
    debug_assert_eq!(sim.folds_done(), folds.get());

    let order = sim.into_order();
    debug!(
        "[{}] folded {} times, {} labels in the surviving column",
        S::NAME,
        folds,
        order.len()
    );
    Ok(order)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Solver {
    /// Stack-buffered extraction and strided re-insertion in a flat array
    Array,
    /// Pairwise merges of doubly linked columns
    Linked,
}

impl Solver {
    pub fn name(self) -> &'static str {
        match self {
            Solver::Array => ArrayFoldSimulator::NAME,
            Solver::Linked => LinkedFoldSimulator::NAME,
        }
    }

    pub fn run(self, folds: Folds) -> Result<FinalOrder, FoldError> {
        match self {
            Solver::Array => simulate::<ArrayFoldSimulator>(folds),
            Solver::Linked => simulate::<LinkedFoldSimulator>(folds),
        }
    }
}

/// Computes the final order with both simulators and the closed form and checks
/// that all of them, and the position formula, agree.
pub fn cross_validate(folds: Folds) -> Result<FinalOrder, FoldError> {
    let array = simulate::<ArrayFoldSimulator>(folds)?;
    let linked = simulate::<LinkedFoldSimulator>(folds)?;
    let closed_form = FinalOrder::new(FoldOrderIter::new(folds)?.collect());

    for (name, other) in [
        (LinkedFoldSimulator::NAME, &linked),
        (CLOSED_FORM_NAME, &closed_form),
    ] {
        if let Some(idx) = array.first_mismatch(other) {
            warn!(
                "[VERIFY] {} and {} disagree at position {} ({} folds)",
                ArrayFoldSimulator::NAME,
                name,
                idx + 1,
                folds
            );
            return Err(InvariantViolation::SolverMismatch {
                left: ArrayFoldSimulator::NAME,
                right: name,
                position: idx as u64 + 1,
            }
            .into());
        }
    }

    let formula_mismatch = array
        .labels()
        .iter()
        .enumerate()
        .find(|&(idx, &label)| fold_depth(label - 1, folds) != idx as u64);
    if let Some((idx, label)) = formula_mismatch {
        warn!(
            "[VERIFY] formula misplaces label {} (expected position {}, {} folds)",
            label,
            idx + 1,
            folds
        );
        return Err(InvariantViolation::SolverMismatch {
            left: ArrayFoldSimulator::NAME,
            right: "FORMULA",
            position: idx as u64 + 1,
        }
        .into());
    }

    info!(
        "[VERIFY] all solvers agree on {} labels ({} folds)",
        array.len(),
        folds
    );
    Ok(array)
}
