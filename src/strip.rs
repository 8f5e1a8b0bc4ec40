use crate::config::ReadOrder;
use crate::consts::MAX_FOLDS;
use crate::error::{FoldError, ValidationError};
use crate::util::assertions;
use itertools::{Either, EitherOrBoth, Itertools};
use std::fmt::{Display, Formatter};

/// Label of a unit square: `1..=2^k`, numbered left to right before folding.
pub type Label = u64;

/// A fold count that has been checked against `[1, MAX_FOLDS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Folds(u32);

impl Folds {
    pub fn new(n_folds: u32) -> Result<Self, FoldError> {
        match (1..=MAX_FOLDS).contains(&n_folds) {
            true => Ok(Self(n_folds)),
            false => Err(ValidationError::FoldCountOutOfRange(n_folds).into()),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `2^k`, or `None` when it does not fit in a [`Label`].
    pub fn strip_len(self) -> Option<Label> {
        (1 as Label).checked_shl(self.0)
    }

    /// `k` consecutive ones.
    pub fn label_mask(self) -> Label {
        Label::MAX >> (Label::BITS - self.0)
    }

    /// Whether `label` names a square of the unfolded strip.
    pub fn contains(self, label: Label) -> bool {
        label >= 1 && self.strip_len().is_none_or(|n| label <= n)
    }

    /// `2^k` as an in-memory length. Strips that cannot even be indexed are
    /// reported as exhausted resources for `what`.
    pub fn buffer_len(self, what: &'static str) -> Result<usize, FoldError> {
        1usize
            .checked_shl(self.0)
            .ok_or(FoldError::ResourceExhaustion { what, folds: self.0 })
    }
}

impl TryFrom<u32> for Folds {
    type Error = FoldError;

    fn try_from(n_folds: u32) -> Result<Self, Self::Error> {
        Folds::new(n_folds)
    }
}

impl Display for Folds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single column left after all folds, stored bottom to top.
/// Label 1 never moves, so it is always the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalOrder {
    labels: Vec<Label>,
}

impl FinalOrder {
    /// Only the solvers call this: their output is a permutation by construction.
    pub(crate) fn new(labels: Vec<Label>) -> Self {
        debug_assert!(assertions::is_permutation(&labels));
        Self { labels }
    }

    /// Wraps an externally produced sequence, which must hold every label of `1..=len` once.
    pub fn from_labels(labels: Vec<Label>) -> Result<Self, FoldError> {
        match assertions::is_permutation(&labels) {
            true => Ok(Self { labels }),
            false => Err(ValidationError::NotAPermutation { len: labels.len() }.into()),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn into_vec(self) -> Vec<Label> {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 1-based depth of `label`, counted from the bottom.
    pub fn position_of(&self, label: Label) -> Option<u64> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .map(|idx| idx as u64 + 1)
    }

    /// Inverse permutation: entry `x - 1` holds the 1-based position of label `x`,
    /// counted from the end given by `order`.
    pub fn positions(&self, order: ReadOrder) -> Vec<u64> {
        let mut positions = vec![0; self.labels.len()];
        for (idx, label) in self.read(order).enumerate() {
            positions[(label - 1) as usize] = idx as u64 + 1;
        }
        positions
    }

    /// `(label, position)` pairs in label order, positions counted from the end given by `order`.
    pub fn label_positions(&self, order: ReadOrder) -> impl Iterator<Item = (Label, u64)> {
        (1 as Label..).zip(self.positions(order))
    }

    pub fn read(&self, order: ReadOrder) -> impl Iterator<Item = Label> + '_ {
        match order {
            ReadOrder::BottomUp => Either::Left(self.labels.iter().copied()),
            ReadOrder::TopDown => Either::Right(self.labels.iter().rev().copied()),
        }
    }

    /// Index of the first entry at which the two orders differ, if any.
    pub fn first_mismatch(&self, other: &FinalOrder) -> Option<usize> {
        self.labels
            .iter()
            .zip_longest(other.labels.iter())
            .position(|pair| match pair {
                EitherOrBoth::Both(a, b) => a != b,
                _ => true,
            })
    }
}

impl Display for FinalOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels.iter().join(" "))
    }
}
