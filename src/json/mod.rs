//! The JSON backend.
//!
//! Writing goes through a token [`Generator`] owned behind a shared handle,
//! so [`to_json`] hands back a zero-copy [`Buffer`] and [`ChunkedWriter`] can
//! drain the same stream incrementally. Reading parses the text into the
//! [`Tree`](crate::tree::Tree) model first and materializes values from there.

mod chunked;
mod r#gen;
mod parse;
mod write;

pub use chunked::ChunkedWriter;
pub use r#gen::{Buffer, GenStatus, Generator, GeneratorError};
pub use parse::parse;
pub use write::{JsonWriter, to_json, to_json_named};

use crate::error::DecodeError;
use crate::reflection::Reflect;
use crate::tree::from_tree;

/// Deserializes a value from JSON text.
///
/// The value starts from its [`Default`] and is filled in field by field, so
/// anything the input does not mention keeps its default.
///
/// # Examples
///
/// ```
/// let nums: Vec<u32> = omniform::from_json("[3,5,8]")?;
/// assert_eq!(nums, [3, 5, 8]);
/// # Ok::<(), omniform::DecodeError>(())
/// ```
pub fn from_json<T: Reflect + Default>(text: &str) -> Result<T, DecodeError> {
    from_tree(&parse(text)?)
}
