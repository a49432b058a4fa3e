use crate::Reflect;

// -----------------------------------------------------------------------------
// Tuple

/// A fixed-arity heterogeneous group.
///
/// Tuples traverse exactly like sequences (positional, unlabeled); the
/// separate interface exists because their arity is part of the type and
/// their slots differ in type.
pub trait Tuple: Reflect {
    fn slot_len(&self) -> usize;

    fn slot_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}
