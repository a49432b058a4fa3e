use core::fmt;

use crate::Reflect;

// -----------------------------------------------------------------------------
// ScalarValue

/// The wire-side reading of a [`Scalar`].
///
/// Writers match on this to pick their native representation; anything
/// without one travels as [`Text`](ScalarValue::Text), the generic lexical
/// fallback (emitted on the string path by the JSON writer, as plain text by
/// the tree and XML writers).
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    /// Lexical fallback for scalars without a native wire form.
    Text(String),
}

impl fmt::Display for ScalarValue<'_> {
    /// The lexical form: what the tree and XML backends store.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(v) => fmt::Display::fmt(v, f),
            ScalarValue::Int(v) => fmt::Display::fmt(v, f),
            ScalarValue::UInt(v) => fmt::Display::fmt(v, f),
            ScalarValue::F32(v) => fmt::Display::fmt(v, f),
            ScalarValue::F64(v) => fmt::Display::fmt(v, f),
            ScalarValue::Str(v) => f.write_str(v),
            ScalarValue::Text(v) => f.write_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value: one wire token out, one lexical parse in.
///
/// String types implement this and deliberately do not implement
/// [`Sequence`](crate::Sequence): the scalar reading of a string always wins
/// over its iterable reading.
pub trait Scalar: Reflect {
    /// Reads the current value for a writer.
    fn to_value(&self) -> ScalarValue<'_>;

    /// Replaces the current value by parsing its lexical form.
    ///
    /// This is the read-side half of the lexical contract: whatever a writer
    /// produced via [`ScalarValue`]'s `Display` must parse back here.
    fn parse_text(&mut self, text: &str) -> Result<(), ScalarParseError>;
}

// -----------------------------------------------------------------------------
// ScalarParseError

/// A lexical form that does not parse as the target scalar type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse `{text}` as {expected}")]
pub struct ScalarParseError {
    /// The target type name.
    pub expected: &'static str,
    /// The rejected input.
    pub text: String,
}

impl ScalarParseError {
    pub fn new(expected: &'static str, text: &str) -> Self {
        Self { expected, text: text.to_owned() }
    }
}
