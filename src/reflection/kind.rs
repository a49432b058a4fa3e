use core::fmt;

use crate::ops::{Map, Nullable, Optional, PairMut, PairRef, Scalar, Sequence, Struct, Tuple};

// -----------------------------------------------------------------------------
// Kind

/// The eight structural categories.
///
/// Classification is total and unambiguous: every [`Reflect`] type maps to
/// exactly one `Kind`, fixed by its [`shape`] implementation.
///
/// [`Reflect`]: crate::Reflect
/// [`shape`]: crate::Reflect::shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An indivisible leaf value: numbers, booleans, strings, `char`.
    ///
    /// String types land here even though they are iterable; the scalar
    /// reading always wins over the sequence reading.
    Scalar,
    /// An explicitly optional value (`Option<T>`).
    Optional,
    /// A transparent owning indirection (`Box`, `Rc`, `Arc`). Traversal
    /// passes through without adding a nesting level.
    Nullable,
    /// A homogeneous ordered collection, including fixed-size arrays.
    Sequence,
    /// A keyed collection. Map-ness wins over sequence-ness.
    Map,
    /// A key/value pair ([`Pair`](crate::Pair)) with position-dependent
    /// traversal rules.
    Pair,
    /// A fixed-arity heterogeneous group, traversed as a positional
    /// sequence.
    Tuple,
    /// A registered struct with named fields.
    Struct,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Scalar => "scalar",
            Kind::Optional => "optional",
            Kind::Nullable => "nullable",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Pair => "pair",
            Kind::Tuple => "tuple",
            Kind::Struct => "struct",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Shape

/// An immutable borrow of a value through its category interface.
///
/// Produced by [`Reflect::shape`](crate::Reflect::shape); consumed by the
/// write-direction driver ([`apply`](crate::apply)).
pub enum Shape<'a> {
    Scalar(&'a dyn Scalar),
    Optional(&'a dyn Optional),
    Nullable(&'a dyn Nullable),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn Map),
    Pair(PairRef<'a>),
    Tuple(&'a dyn Tuple),
    Struct(&'a dyn Struct),
}

impl Shape<'_> {
    /// The [`Kind`] this view belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Scalar(_) => Kind::Scalar,
            Shape::Optional(_) => Kind::Optional,
            Shape::Nullable(_) => Kind::Nullable,
            Shape::Sequence(_) => Kind::Sequence,
            Shape::Map(_) => Kind::Map,
            Shape::Pair(_) => Kind::Pair,
            Shape::Tuple(_) => Kind::Tuple,
            Shape::Struct(_) => Kind::Struct,
        }
    }
}

// -----------------------------------------------------------------------------
// ShapeMut

/// A mutable borrow of a value through its category interface.
///
/// Produced by [`Reflect::shape_mut`](crate::Reflect::shape_mut); consumed by
/// the read-direction driver ([`apply_mut`](crate::apply_mut)).
pub enum ShapeMut<'a> {
    Scalar(&'a mut dyn Scalar),
    Optional(&'a mut dyn Optional),
    Nullable(&'a mut dyn Nullable),
    Sequence(&'a mut dyn Sequence),
    Map(&'a mut dyn Map),
    Pair(PairMut<'a>),
    Tuple(&'a mut dyn Tuple),
    Struct(&'a mut dyn Struct),
}

impl ShapeMut<'_> {
    /// The [`Kind`] this view belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            ShapeMut::Scalar(_) => Kind::Scalar,
            ShapeMut::Optional(_) => Kind::Optional,
            ShapeMut::Nullable(_) => Kind::Nullable,
            ShapeMut::Sequence(_) => Kind::Sequence,
            ShapeMut::Map(_) => Kind::Map,
            ShapeMut::Pair(_) => Kind::Pair,
            ShapeMut::Tuple(_) => Kind::Tuple,
            ShapeMut::Struct(_) => Kind::Struct,
        }
    }
}
