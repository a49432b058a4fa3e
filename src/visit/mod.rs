//! The traversal engine: position tags, visitor contracts, and the two
//! recursive drivers.
//!
//! ## Menu
//!
//! - [`Tag`]: where the current value sits (root, named field, element,
//!   map entry).
//! - [`Visitor`] / [`VisitorMut`]: the callback interfaces write and read
//!   backends implement.
//! - [`apply`] / [`apply_mut`]: classify a value and drive a visitor over
//!   it, recursively.
//! - [`NoopVisitor`]: the inert backend.

mod apply;
mod tag;
mod visitor;

pub use apply::{apply, apply_mut};
pub use tag::Tag;
pub use visitor::{NoopVisitor, Visitor, VisitorMut};
