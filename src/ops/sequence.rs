use crate::Reflect;

// -----------------------------------------------------------------------------
// Sequence

/// An ordered homogeneous collection.
///
/// Covers growable collections (`Vec`, `VecDeque`) and fixed-size arrays;
/// the difference surfaces only through [`resize_default`](Sequence::resize_default).
pub trait Sequence: Reflect {
    fn element_len(&self) -> usize;

    fn element_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Resizes to `len` default elements where the collection allows it.
    ///
    /// Returns `false` for fixed-size sequences, which keep their length;
    /// the reader then consumes exactly as many input elements as the
    /// target holds and reports exhaustion if the input runs short.
    fn resize_default(&mut self, len: usize) -> bool;
}
