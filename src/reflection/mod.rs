//! The foundational reflection surface: the [`Reflect`] trait, structural
//! classification ([`Kind`]) and the category views ([`Shape`], [`ShapeMut`]).

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{Kind, Shape, ShapeMut};
pub use reflect::Reflect;
