use core::convert::Infallible;

use crate::ops::{Map, Scalar};
use crate::visit::Tag;

// -----------------------------------------------------------------------------
// Visitor (write side)

/// The callback interface a write backend implements.
///
/// [`apply`](crate::apply) drives one of these over a value: scalars arrive
/// through [`on_value`](Visitor::on_value), containers through paired
/// start/end calls. Each `*_start` returns a child visitor scoped to the
/// container's items; the parent receives the matching `*_end` after the
/// child is dropped. Backends that keep per-level state (an output node, a
/// borrowed subtree) hand it to the child; backends without level state
/// return a copy of themselves.
///
/// All methods receive the [`Tag`] describing the current position, so a
/// backend can emit a key for labeled items and skip it for positional ones.
pub trait Visitor: Sized {
    type Error;

    /// The visitor driven over this container's items.
    type Child<'c>: Visitor<Error = Self::Error>
    where
        Self: 'c;

    /// A scalar leaf.
    fn on_value(&mut self, value: &dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// An optional value. Returns whether to descend into the wrapped value;
    /// descent only happens when the value is also present.
    fn on_optional(&mut self, present: bool, tag: Tag<'_>) -> Result<bool, Self::Error>;

    /// A nullable reference. `present` is whether it points at a target;
    /// returns whether to descend into it.
    fn on_nullable(&mut self, present: bool, tag: Tag<'_>) -> Result<bool, Self::Error>;

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error>;

    fn on_struct_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// A sequence or tuple of `len` items, each visited as [`Tag::Element`].
    fn on_sequence_start(&mut self, len: usize, tag: Tag<'_>)
    -> Result<Self::Child<'_>, Self::Error>;

    fn on_sequence_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// A map of `len` entries, each visited as [`Tag::Entry`].
    fn on_map_start(&mut self, len: usize, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error>;

    fn on_map_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;
}

// -----------------------------------------------------------------------------
// VisitorMut (read side)

/// The callback interface a read backend implements.
///
/// [`apply_mut`](crate::apply_mut) drives one of these over a *target*
/// value: the traversal still follows the target's structure, but each
/// callback pulls from the backend's input instead of pushing output.
/// Scalars are filled in place through [`on_value`](VisitorMut::on_value);
/// `*_start` calls descend the backend's cursor and return the child visitor
/// for the container's items.
pub trait VisitorMut: Sized {
    type Error;

    type Child<'c>: VisitorMut<Error = Self::Error>
    where
        Self: 'c;

    /// Fills a scalar from the input at this position.
    fn on_value(&mut self, value: &mut dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// Presence test for an optional target. `true` means the input holds a
    /// value here and the traversal will descend; `false` (absent or null
    /// input) leaves the target untouched.
    ///
    /// At [`Tag::Element`] an absent answer must still consume the input
    /// position, so a null in the middle of an array does not shift later
    /// elements.
    fn on_optional(&mut self, tag: Tag<'_>) -> Result<bool, Self::Error>;

    /// Presence test for a nullable target, same contract as
    /// [`on_optional`](VisitorMut::on_optional). On `true` the engine resets
    /// the target to a fresh default and descends into it.
    fn on_nullable(&mut self, tag: Tag<'_>) -> Result<bool, Self::Error>;

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error>;

    fn on_struct_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// Descends into a sequence. Also reports the input length when the
    /// backend knows it, so the engine can resize the target before filling
    /// elements in place.
    fn on_sequence_start(
        &mut self,
        tag: Tag<'_>,
    ) -> Result<(Self::Child<'_>, Option<usize>), Self::Error>;

    fn on_sequence_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;

    /// Descends into a map. The backend seeds `map` with one default entry
    /// per input label (via [`Map::insert_default`]); the engine then reads
    /// each entry's value back keyed by its label.
    fn on_map_start(
        &mut self,
        map: &mut dyn Map,
        tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error>;

    fn on_map_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error>;
}

// -----------------------------------------------------------------------------
// NoopVisitor

/// A visitor that does nothing.
///
/// Walks the whole value on the write side and reads nothing on the read
/// side (every optional reports absent). Useful as a traversal smoke test
/// and as the inert half of composed backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopVisitor;

impl Visitor for NoopVisitor {
    type Error = Infallible;
    type Child<'c>
        = NoopVisitor
    where
        Self: 'c;

    fn on_value(&mut self, _value: &dyn Scalar, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_optional(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_nullable(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_struct_start(&mut self, _tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        Ok(NoopVisitor)
    }

    fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_sequence_start(
        &mut self,
        _len: usize,
        _tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        Ok(NoopVisitor)
    }

    fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_map_start(&mut self, _len: usize, _tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        Ok(NoopVisitor)
    }

    fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl VisitorMut for NoopVisitor {
    type Error = Infallible;
    type Child<'c>
        = NoopVisitor
    where
        Self: 'c;

    fn on_value(&mut self, _value: &mut dyn Scalar, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_optional(&mut self, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn on_nullable(&mut self, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn on_struct_start(&mut self, _tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        Ok(NoopVisitor)
    }

    fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_sequence_start(
        &mut self,
        _tag: Tag<'_>,
    ) -> Result<(Self::Child<'_>, Option<usize>), Self::Error> {
        Ok((NoopVisitor, None))
    }

    fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_map_start(
        &mut self,
        _map: &mut dyn Map,
        _tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        Ok(NoopVisitor)
    }

    fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
