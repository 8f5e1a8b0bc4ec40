use crate::config::ReadOrder;
use crate::error::{FoldError, ValidationError};
use crate::strip::{Folds, Label};
use log::debug;
use std::ops::Range;

/// 1-based position of `label` in the final order (counted from the bottom)
/// after the strip has been folded `folds` times.
///
/// Each fold either keeps or mirrors the relative order of a binary sub-block,
/// depending on the parity of the label. That makes the final order a
/// bit-reversal permutation of `(label - 1) >> 1`, complemented for even labels.
/// https://en.wikipedia.org/wiki/Bit-reversal_permutation
pub fn fold_position(label: Label, folds: Folds) -> Result<u64, FoldError> {
    fold_position_read(label, folds, ReadOrder::BottomUp)
}

/// Same as [`fold_position`], counted from the end of the stack given by `order`.
pub fn fold_position_read(label: Label, folds: Folds, order: ReadOrder) -> Result<u64, FoldError> {
    if !folds.contains(label) {
        return Err(ValidationError::LabelOutOfRange {
            label,
            folds: folds.get(),
        }
        .into());
    }

    let depth = match order {
        ReadOrder::BottomUp => fold_depth(label - 1, folds),
        ReadOrder::TopDown => folds.label_mask() - fold_depth(label - 1, folds),
    };
    let position = depth
        .checked_add(1)
        .ok_or(ValidationError::PositionUnrepresentable {
            label,
            folds: folds.get(),
        })?;

    debug!(
        "[FORMULA] label {} ends up at position {} ({:?}) after {} folds",
        label, position, order, folds
    );
    Ok(position)
}

/// 0-based depth of the 0-based label `z`.
pub fn fold_depth(z: Label, folds: Folds) -> Label {
    let reversed = reverse_low_bits(z >> 1, folds);
    match z % 2 == 1 {
        true => !reversed & folds.label_mask(),
        false => reversed,
    }
}

/// Reverses the `k` least significant bits of `v`, discarding everything above them.
pub fn reverse_low_bits(v: Label, folds: Folds) -> Label {
    v.reverse_bits() >> (Label::BITS - folds.get())
}

/// The final order, bottom to top, computed position by position by inverting
/// [`fold_depth`]. No simulation is involved.
/// Example: for 3 folds the iterator yields 1, 8, 5, 4, 3, 6, 7, 2
pub struct FoldOrderIter {
    folds: Folds,
    depths: Range<usize>,
}

impl FoldOrderIter {
    /// Fails for strips too long to be enumerated by index.
    pub fn new(folds: Folds) -> Result<Self, FoldError> {
        let len = folds.buffer_len("closed-form order")?;
        Ok(Self {
            folds,
            depths: 0..len,
        })
    }

    /// 0-based label sitting at 0-based `depth`.
    fn label_at(&self, depth: Label) -> Label {
        match depth % 2 == 1 {
            // odd depths hold the odd 0-based labels, complemented
            true => 2 * reverse_low_bits(!depth & self.folds.label_mask(), self.folds) + 1,
            false => 2 * reverse_low_bits(depth, self.folds),
        }
    }
}

impl Iterator for FoldOrderIter {
    type Item = Label;

    fn next(&mut self) -> Option<Self::Item> {
        let depth = self.depths.next()?;
        Some(self.label_at(depth as Label) + 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.depths.size_hint()
    }
}

impl ExactSizeIterator for FoldOrderIter {}
