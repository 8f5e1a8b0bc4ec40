use crate::error::InvariantViolation;
use crate::strip::Label;
use std::collections::TryReserveError;

/// Fixed-capacity LIFO buffer holding the right half of the strip while it is flipped over.
/// Pushing in left-to-right order and popping yields the labels right to left.
#[derive(Debug, Clone)]
pub struct FoldStack {
    items: Vec<Label>,
    capacity: usize,
}

impl FoldStack {
    pub fn new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    pub fn push(&mut self, label: Label) -> Result<(), InvariantViolation> {
        if self.items.len() >= self.capacity {
            return Err(InvariantViolation::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.items.push(label);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Label, InvariantViolation> {
        self.items.pop().ok_or(InvariantViolation::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Labels from the top of the stack down.
    pub fn iter_from_top(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().rev()
    }
}
