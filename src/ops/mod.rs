//! Category interfaces the traversal engine dispatches through.
//!
//! ## Menu
//!
//! The following are the subtraits of [`Reflect`], one per structural
//! category that needs methods beyond classification:
//!
//! - [`Scalar`]: leaf values with a wire representation ([`ScalarValue`]).
//! - [`Optional`]: explicit optionality (`Option<T>`).
//! - [`Nullable`]: transparent owning indirections (`Box`, `Rc`, `Arc`).
//! - [`Sequence`]: ordered homogeneous collections, including `[T; N]`.
//! - [`Map`]: keyed collections with stringifiable keys.
//! - [`Tuple`]: fixed-arity positional groups.
//! - [`Struct`]: registered named-field access ([`FieldRef`], [`FieldMut`]).
//!
//! [`Pair`] is the odd one out: a concrete value type rather than an
//! interface, borrowed through [`PairRef`]/[`PairMut`] views because it has
//! exactly two parts and needs no dynamic dispatch of its own.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod map;
mod optional;
mod pair;
mod scalar;
mod sequence;
mod struct_ops;
mod tuple;

// -----------------------------------------------------------------------------
// Exports

pub use map::Map;
pub use optional::{Nullable, Optional};
pub use pair::{Pair, PairMut, PairRef};
pub use scalar::{Scalar, ScalarParseError, ScalarValue};
pub use sequence::Sequence;
pub use struct_ops::{FieldMut, FieldRef, Struct};
pub use tuple::Tuple;
