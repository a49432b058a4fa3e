#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// `omniform::` must resolve inside the crate itself: the derive macro and
// `adapt_struct!` expand to `::omniform` paths, and both are exercised by the
// crate's own tests.
extern crate self as omniform;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod json;
pub mod ops;
pub mod registry;
pub mod tree;
pub mod visit;
pub mod xml;

mod error;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::DecodeError;
pub use json::{from_json, to_json, to_json_named};
pub use ops::{FieldMut, FieldRef, Map, Nullable, Optional, Pair, PairMut, PairRef};
pub use ops::{Scalar, ScalarParseError, ScalarValue, Sequence, Struct, Tuple};
pub use reflection::{Kind, Reflect, Shape, ShapeMut};
pub use registry::{FieldDescriptor, FieldKind, FieldRegistry};
pub use tree::{Tree, from_tree, to_tree};
pub use visit::{NoopVisitor, Tag, Visitor, VisitorMut, apply, apply_mut};
pub use xml::{to_xml, to_xml_named};

pub use omniform_derive::Reflect;
