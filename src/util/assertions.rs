use crate::simulate::linked::{Layer, NIL};
use crate::strip::Label;

/// Every label of `1..=labels.len()` appears exactly once.
pub fn is_permutation(labels: &[Label]) -> bool {
    let mut seen = vec![false; labels.len()];
    for &label in labels {
        match label.checked_sub(1).map(|idx| idx as usize) {
            Some(idx) if idx < seen.len() && !seen[idx] => seen[idx] = true,
            _ => return false,
        }
    }
    true
}

/// Above and below references mirror each other: if `b` is above `a`, then `a` is below `b`.
pub fn layers_are_linked(layers: &[Layer]) -> bool {
    assert_eq!(layers.first(), Some(&Layer::UNLINKED), "slot 0 must stay unlinked");

    layers.iter().enumerate().skip(1).all(|(label, layer)| {
        let above_ok = layer.above == NIL || layers[layer.above].below == label;
        let below_ok = layer.below == NIL || layers[layer.below].above == label;
        above_ok && below_ok
    })
}
