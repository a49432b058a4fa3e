use thiserror::Error;

// -----------------------------------------------------------------------------
// DecodeError

/// A failure while reading a value out of parsed input.
///
/// Every structural variant carries the path of the position that failed,
/// rendered from the traversal tags (`messages[2].subject`, `root` at the
/// top). Decode errors are recoverable at the caller's discretion; the
/// half-filled target must be discarded, never used.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input was not parseable JSON at all.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A labeled lookup found no child with the requested name.
    #[error("missing field `{field}` at {path}")]
    MissingField { field: String, path: String },

    /// A leaf was present but its text does not parse as the target scalar.
    #[error("type mismatch at {path}: expected {expected}, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: String,
        path: String,
    },

    /// A positional read ran past the input's last element.
    #[error("no element at index {index} in {path}: input exhausted")]
    SequenceExhausted { index: usize, path: String },
}

#[cfg(test)]
mod tests {
    use super::DecodeError;

    #[test]
    fn messages_carry_paths() {
        let err = DecodeError::MissingField {
            field: "subject".into(),
            path: "messages[2]".into(),
        };
        assert_eq!(err.to_string(), "missing field `subject` at messages[2]");

        let err = DecodeError::TypeMismatch {
            expected: "u32",
            found: "fast".into(),
            path: "track.duration".into(),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at track.duration: expected u32, found `fast`",
        );

        let err = DecodeError::SequenceExhausted {
            index: 4,
            path: "grid[1]".into(),
        };
        assert_eq!(
            err.to_string(),
            "no element at index 4 in grid[1]: input exhausted",
        );
    }
}
