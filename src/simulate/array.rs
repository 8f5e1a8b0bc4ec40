use crate::error::FoldError;
use crate::simulate::FoldSimulator;
use crate::simulate::stack::FoldStack;
use crate::strip::{FinalOrder, Folds, Label};
use itertools::Itertools;
use log::{debug, log_enabled, trace};

/// Keeps the strip "linear": instead of stacking squares, every fold rearranges a
/// flat buffer so that reading it left to right gives the stack bottom to top.
///
/// The right half of the buffer (a fixed index range `[N/2, N)`) is flipped over by
/// pushing it onto a [`FoldStack`]. The popped labels are then re-inserted into the
/// left part in `2^(k-t)` passes of `2^(t-1)` consecutive labels each.
#[derive(Debug, Clone)]
pub struct ArrayFoldSimulator {
    folds: Folds,
    strip: Vec<Label>,
    stack: FoldStack,
    folds_done: u32,
}

impl ArrayFoldSimulator {
    pub fn strip(&self) -> &[Label] {
        &self.strip
    }

    pub fn stack(&self) -> &FoldStack {
        &self.stack
    }
}

impl FoldSimulator for ArrayFoldSimulator {
    const NAME: &'static str = "ARRAY";

    fn new(folds: Folds) -> Result<Self, FoldError> {
        let len = folds.buffer_len("strip buffer")?;

        let mut strip = Vec::new();
        strip
            .try_reserve_exact(len)
            .map_err(|_| FoldError::ResourceExhaustion {
                what: "strip buffer",
                folds: folds.get(),
            })?;
        strip.extend((1..=len).map(|label| label as Label));

        let stack = FoldStack::new(len / 2).map_err(|_| FoldError::ResourceExhaustion {
            what: "fold stack",
            folds: folds.get(),
        })?;

        Ok(Self {
            folds,
            strip,
            stack,
            folds_done: 0,
        })
    }

    fn fold_once(&mut self) -> Result<bool, FoldError> {
        if self.folds_done == self.folds.get() {
            return Ok(false);
        }
        let fold = self.folds_done + 1;
        let half = self.strip.len() / 2;

        for &label in &self.strip[half..] {
            self.stack.push(label)?;
        }
        if log_enabled!(log::Level::Trace) {
            trace!(
                "[ARRAY] stack before fold {} (top first): {}",
                fold,
                self.stack.iter_from_top().join(" ")
            );
        }

        let n_passes = 1usize << (self.folds.get() - fold);
        let n_consec_pops = 1usize << (fold - 1);

        let mut n_inserted = 0;
        for pass in 1..=n_passes {
            let mut at = pass * n_consec_pops + n_inserted;
            for _ in 0..n_consec_pops {
                let label = self.stack.pop()?;
                insert(&mut self.strip, label, at, half + n_inserted);
                n_inserted += 1;
                at += 1;
            }
        }
        debug_assert!(self.stack.is_empty());

        self.folds_done = fold;
        debug!(
            "[ARRAY] fold {}/{}: re-inserted {} labels in {} passes of {}",
            fold, self.folds, n_inserted, n_passes, n_consec_pops
        );
        if log_enabled!(log::Level::Trace) {
            trace!("[ARRAY] strip after fold {}: {}", fold, self.strip.iter().join(" "));
        }
        Ok(true)
    }

    fn folds_done(&self) -> u32 {
        self.folds_done
    }

    fn into_order(self) -> FinalOrder {
        FinalOrder::new(self.strip)
    }
}

/// Writes `label` at `at` after shifting `strip[at..end]` one slot to the right.
/// Whatever sat at `end` has already been pushed onto the stack and is overwritten.
fn insert(strip: &mut [Label], label: Label, at: usize, end: usize) {
    debug_assert!(at <= end && end < strip.len());
    strip.copy_within(at..end, at + 1);
    strip[at] = label;
}
