use crate::error::FoldError;
use crate::simulate::FoldSimulator;
use crate::strip::{FinalOrder, Folds, Label};
use crate::util::assertions;
use itertools::Itertools;
use log::{debug, log_enabled, trace};

/// Marks a missing neighbour. Slot 0 of the layer table is never a label.
pub const NIL: usize = 0;

/// Neighbours of a single label within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub above: usize,
    pub below: usize,
}

impl Layer {
    pub const UNLINKED: Layer = Layer {
        above: NIL,
        below: NIL,
    };
}

/// Folds the strip literally: every label knows the label directly above and
/// below it, and each fold places every right column, turned upside down, on top
/// of its mirror image in the left half.
#[derive(Debug, Clone)]
pub struct LinkedFoldSimulator {
    folds: Folds,
    /// Indexed by label, slot 0 unused
    layers: Vec<Layer>,
    /// Number of columns in the current (partially folded) strip
    n_columns: usize,
    folds_done: u32,
}

impl LinkedFoldSimulator {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Labels of the column anchored at `col`, bottom to top.
    pub fn column(&self, col: usize) -> Vec<Label> {
        let mut labels = vec![];
        let mut current = col;
        while current != NIL {
            labels.push(current as Label);
            current = self.layers[current].above;
        }
        labels
    }

    fn top_of(&self, col: usize) -> usize {
        let mut top = col;
        while self.layers[top].above != NIL {
            top = self.layers[top].above;
        }
        top
    }

    /// Turns `right_col` upside down and puts it on top of `left_col`.
    fn merge_columns(&mut self, left_col: usize, right_col: usize) {
        let mut below = self.top_of(left_col);
        let mut next = self.top_of(right_col);

        // walk down the right column, relinking each label one layer higher up
        while next != NIL {
            self.layers[below].above = next;
            let old_below = self.layers[next].below;
            self.layers[next].below = below;
            below = next;
            next = old_below;
        }
        self.layers[below].above = NIL;
    }
}

impl FoldSimulator for LinkedFoldSimulator {
    const NAME: &'static str = "LINKED";

    fn new(folds: Folds) -> Result<Self, FoldError> {
        let exhausted = || FoldError::ResourceExhaustion {
            what: "layer table",
            folds: folds.get(),
        };
        let n_columns = folds.buffer_len("layer table")?;
        let n_slots = n_columns.checked_add(1).ok_or_else(exhausted)?;

        let mut layers = Vec::new();
        layers.try_reserve_exact(n_slots).map_err(|_| exhausted())?;
        layers.resize(n_slots, Layer::UNLINKED);

        Ok(Self {
            folds,
            layers,
            n_columns,
            folds_done: 0,
        })
    }

    fn fold_once(&mut self) -> Result<bool, FoldError> {
        if self.folds_done == self.folds.get() {
            return Ok(false);
        }
        let half = self.n_columns / 2;

        for left_col in 1..=half {
            let right_col = self.n_columns - left_col + 1;
            self.merge_columns(left_col, right_col);
        }
        self.n_columns = half;
        self.folds_done += 1;

        debug_assert!(assertions::layers_are_linked(&self.layers));
        debug!(
            "[LINKED] fold {}/{}: {} columns of {} labels",
            self.folds_done,
            self.folds,
            self.n_columns,
            1usize << self.folds_done
        );
        if log_enabled!(log::Level::Trace) {
            for col in 1..=self.n_columns {
                trace!("[LINKED] column {}: {}", col, self.column(col).iter().join(" "));
            }
        }
        Ok(true)
    }

    fn folds_done(&self) -> u32 {
        self.folds_done
    }

    fn into_order(self) -> FinalOrder {
        FinalOrder::new(self.column(1))
    }
}
