use core::cell::{Ref, RefCell};
use core::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Nesting levels the generator accepts before refusing further opens.
const MAX_DEPTH: usize = 128;

// -----------------------------------------------------------------------------
// Errors

/// Why the generator rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenStatus {
    /// A non-string token arrived where an object key belongs.
    KeysMustBeStrings,
    /// Nesting went past the generator's depth limit.
    MaxDepthExceeded,
    /// The root value is already complete; nothing more can be written.
    GenerationComplete,
    /// A float was not finite; JSON has no representation for it.
    InvalidNumber,
}

impl fmt::Display for GenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenStatus::KeysMustBeStrings => "keys must be strings",
            GenStatus::MaxDepthExceeded => "maximum nesting depth exceeded",
            GenStatus::GenerationComplete => "generation already complete",
            GenStatus::InvalidNumber => "number is not finite",
        })
    }
}

/// A write-side failure. Fatal for the current serialize call; the partial
/// buffer must be discarded, not used as valid-prefix JSON.
#[derive(Debug, Error)]
#[error("JSON generation failed: {status}")]
pub struct GeneratorError {
    status: GenStatus,
}

impl GeneratorError {
    pub(crate) fn new(status: GenStatus) -> Self {
        Self { status }
    }

    /// The generator state check that failed.
    #[inline]
    pub fn status(&self) -> GenStatus {
        self.status
    }
}

// -----------------------------------------------------------------------------
// Generator

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Inside an object. `expect_key` flips as keys and values alternate.
    Map { expect_key: bool, first: bool },
    /// Inside an array.
    Array { first: bool },
}

/// A streaming JSON token generator over a growing byte buffer.
///
/// Tokens are validated against the current nesting state: keys only where
/// keys belong, nothing after the root value completes, a bounded nesting
/// depth. A string sent where an object expects a key becomes that key;
/// everywhere else it is a value. Any rejected call leaves the buffer
/// untouched.
#[derive(Debug, Default)]
pub struct Generator {
    out: Vec<u8>,
    stack: Vec<Frame>,
    complete: bool,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes produced so far.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.out
    }

    /// Whether the root value has been fully written.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete && self.stack.is_empty()
    }

    /// Hands out everything produced so far, leaving the buffer empty but
    /// the nesting state intact. This is what incremental writers drain
    /// between chunks.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.out)
    }

    pub fn string(&mut self, text: &str) -> Result<(), GeneratorError> {
        if let Some(Frame::Map { expect_key, first }) = self.stack.last_mut() {
            if *expect_key {
                let first = core::mem::replace(first, false);
                *expect_key = false;
                if !first {
                    self.out.push(b',');
                }
                self.emit_json(&text)?;
                self.out.push(b':');
                return Ok(());
            }
        }
        self.begin_value()?;
        self.emit_json(&text)
    }

    pub fn int(&mut self, value: i64) -> Result<(), GeneratorError> {
        self.begin_value()?;
        self.emit_json(&value)
    }

    pub fn uint(&mut self, value: u64) -> Result<(), GeneratorError> {
        self.begin_value()?;
        self.emit_json(&value)
    }

    pub fn double(&mut self, value: f64) -> Result<(), GeneratorError> {
        if !value.is_finite() {
            return Err(GeneratorError::new(GenStatus::InvalidNumber));
        }
        self.begin_value()?;
        self.emit_json(&value)
    }

    pub fn bool(&mut self, value: bool) -> Result<(), GeneratorError> {
        self.begin_value()?;
        self.out
            .extend_from_slice(if value { b"true" } else { b"false" });
        Ok(())
    }

    pub fn null(&mut self) -> Result<(), GeneratorError> {
        self.begin_value()?;
        self.out.extend_from_slice(b"null");
        Ok(())
    }

    pub fn map_open(&mut self) -> Result<(), GeneratorError> {
        self.begin_container()?;
        self.stack.push(Frame::Map {
            expect_key: true,
            first: true,
        });
        self.out.push(b'{');
        Ok(())
    }

    pub fn map_close(&mut self) -> Result<(), GeneratorError> {
        match self.stack.last() {
            Some(Frame::Map { expect_key: true, .. }) => {
                self.stack.pop();
                self.out.push(b'}');
                self.settle();
                Ok(())
            }
            // Closing mid-entry would leave a dangling key.
            Some(Frame::Map { .. }) | Some(Frame::Array { .. }) => {
                Err(GeneratorError::new(GenStatus::KeysMustBeStrings))
            }
            None => Err(GeneratorError::new(GenStatus::GenerationComplete)),
        }
    }

    pub fn array_open(&mut self) -> Result<(), GeneratorError> {
        self.begin_container()?;
        self.stack.push(Frame::Array { first: true });
        self.out.push(b'[');
        Ok(())
    }

    pub fn array_close(&mut self) -> Result<(), GeneratorError> {
        match self.stack.last() {
            Some(Frame::Array { .. }) => {
                self.stack.pop();
                self.out.push(b']');
                self.settle();
                Ok(())
            }
            Some(Frame::Map { .. }) => Err(GeneratorError::new(GenStatus::KeysMustBeStrings)),
            None => Err(GeneratorError::new(GenStatus::GenerationComplete)),
        }
    }

    /// Validates that a value may start here and writes any separator.
    fn begin_value(&mut self) -> Result<(), GeneratorError> {
        match self.stack.last_mut() {
            None => {
                if self.complete {
                    return Err(GeneratorError::new(GenStatus::GenerationComplete));
                }
                self.complete = true;
                Ok(())
            }
            Some(Frame::Map { expect_key, first: _ }) => {
                if *expect_key {
                    return Err(GeneratorError::new(GenStatus::KeysMustBeStrings));
                }
                *expect_key = true;
                Ok(())
            }
            Some(Frame::Array { first }) => {
                let first = core::mem::replace(first, false);
                if !first {
                    self.out.push(b',');
                }
                Ok(())
            }
        }
    }

    fn begin_container(&mut self) -> Result<(), GeneratorError> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(GeneratorError::new(GenStatus::MaxDepthExceeded));
        }
        self.begin_value()
    }

    /// Bookkeeping after a container closes: with the stack empty the root
    /// value is done.
    fn settle(&mut self) {
        if self.stack.is_empty() {
            self.complete = true;
        }
    }

    fn emit_json<T: serde_core::ser::Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), GeneratorError> {
        // Writing primitives into a Vec cannot fail; non-finite floats were
        // rejected before reaching here.
        serde_json::to_writer(&mut self.out, value)
            .map_err(|_| GeneratorError::new(GenStatus::InvalidNumber))
    }
}

// -----------------------------------------------------------------------------
// Buffer

/// The produced JSON, sharing ownership of the generator's buffer.
///
/// Handed out by [`to_json`](crate::to_json); stays valid after the writer
/// that produced it is gone, without copying the bytes.
///
/// # Examples
///
/// ```
/// let out = omniform::to_json(&vec![1u8, 2, 3]).unwrap();
/// assert_eq!(&*out.bytes(), b"[1,2,3]");
/// assert_eq!(out.to_string(), "[1,2,3]");
/// ```
#[derive(Clone)]
pub struct Buffer {
    handle: Rc<RefCell<Generator>>,
}

impl Buffer {
    pub(crate) fn new(handle: Rc<RefCell<Generator>>) -> Self {
        Self { handle }
    }

    /// A borrow of the raw bytes, valid while the returned guard lives.
    pub fn bytes(&self) -> Ref<'_, [u8]> {
        Ref::map(self.handle.borrow(), Generator::output)
    }

    pub fn len(&self) -> usize {
        self.handle.borrow().output().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.bytes().as_ref()))
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Buffer")
            .field(&String::from_utf8_lossy(self.bytes().as_ref()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
