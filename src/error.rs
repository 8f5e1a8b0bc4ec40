use crate::consts::MAX_FOLDS;
use crate::strip::Label;
use thiserror::Error;

/// Every way a fold computation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// The buffers for a strip of `2^folds` labels could not be allocated.
    #[error("could not allocate {what} for a strip folded {folds} times")]
    ResourceExhaustion { what: &'static str, folds: u32 },
    /// A sizing or algorithmic defect: never the caller's fault.
    #[error("internal error: {0}")]
    Invariant(#[from] InvariantViolation),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fold count {0} is outside [1, {}]", MAX_FOLDS)]
    FoldCountOutOfRange(u32),
    #[error("label {label} is outside [1, 2^{folds}]")]
    LabelOutOfRange { label: Label, folds: u32 },
    #[error("position of label {label} after {folds} folds does not fit in a label")]
    PositionUnrepresentable { label: Label, folds: u32 },
    #[error("{len} labels are not a permutation of [1, {len}]")]
    NotAPermutation { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("fold stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },
    #[error("fold stack underflow")]
    StackUnderflow,
    #[error("{left} and {right} disagree at position {position}")]
    SolverMismatch {
        left: &'static str,
        right: &'static str,
        position: u64,
    },
}
