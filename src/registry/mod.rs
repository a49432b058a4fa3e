//! Per-type field registration: ordered, immutable [`FieldRegistry`] data and
//! the [`adapt_struct!`](crate::adapt_struct) declarative surface.
//!
//! Registries are built once per type as `static` data and never change;
//! traversal order is exactly declaration order. Plain structs the user owns
//! register through [the derive macro](omniform_derive::Reflect); types
//! reachable only through accessors (or needing per-field mixing of the two
//! binding styles) register through `adapt_struct!`.

// -----------------------------------------------------------------------------
// Modules

mod adapt;
mod field;

// -----------------------------------------------------------------------------
// Exports

pub use field::{FieldDescriptor, FieldKind, FieldRegistry};
