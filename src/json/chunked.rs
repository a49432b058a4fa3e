use core::cell::RefCell;
use std::rc::Rc;

use crate::json::r#gen::{Generator, GeneratorError};
use crate::json::write::JsonWriter;
use crate::reflection::Reflect;
use crate::visit::{Tag, apply};

/// Incremental serialization of a JSON array, one element per call.
///
/// Each [`feed`](ChunkedWriter::feed) appends one value to the array and
/// returns the bytes produced by that call alone; [`finish`](ChunkedWriter::finish)
/// closes the array and returns the tail. Concatenating every returned chunk
/// in order yields the same document a one-shot write of the whole sequence
/// would have produced, so the chunks can go straight onto a socket or into
/// a file without ever holding the full document in memory.
///
/// # Examples
///
/// ```
/// use omniform::json::ChunkedWriter;
///
/// let mut writer = ChunkedWriter::new();
/// let mut out = String::new();
/// for n in [1u32, 2, 3] {
///     out.push_str(&writer.feed(&n)?);
/// }
/// out.push_str(&writer.finish()?);
/// assert_eq!(out, "[1,2,3]");
/// # Ok::<(), omniform::json::GeneratorError>(())
/// ```
pub struct ChunkedWriter {
    r#gen: Rc<RefCell<Generator>>,
    root: Option<String>,
    started: bool,
}

impl ChunkedWriter {
    /// A writer producing a bare array.
    pub fn new() -> Self {
        Self {
            r#gen: Rc::new(RefCell::new(Generator::new())),
            root: None,
            started: false,
        }
    }

    /// A writer wrapping the array in a single-field object, like
    /// [`to_json_named`](crate::to_json_named): `{"<root>":[...]}`.
    pub fn named(root: &str) -> Self {
        Self {
            r#gen: Rc::new(RefCell::new(Generator::new())),
            root: Some(root.to_owned()),
            started: false,
        }
    }

    /// Opens the surrounding array on the first call.
    fn start(&mut self) -> Result<(), GeneratorError> {
        if self.started {
            return Ok(());
        }
        let mut r#gen = self.r#gen.borrow_mut();
        if let Some(root) = &self.root {
            r#gen.map_open()?;
            r#gen.string(root)?;
        }
        r#gen.array_open()?;
        self.started = true;
        Ok(())
    }

    fn drain(&self) -> String {
        String::from_utf8_lossy(&self.r#gen.borrow_mut().take_output()).into_owned()
    }

    /// Appends one element and returns the bytes this call produced.
    pub fn feed(&mut self, item: &dyn Reflect) -> Result<String, GeneratorError> {
        self.start()?;
        let mut writer = JsonWriter::new(Rc::clone(&self.r#gen));
        apply(item, Tag::Element, &mut writer)?;
        Ok(self.drain())
    }

    /// Closes the array and returns the remaining bytes. Feeding after this
    /// fails, the document being complete.
    pub fn finish(&mut self) -> Result<String, GeneratorError> {
        self.start()?;
        let mut r#gen = self.r#gen.borrow_mut();
        r#gen.array_close()?;
        if self.root.is_some() {
            r#gen.map_close()?;
        }
        drop(r#gen);
        Ok(self.drain())
    }
}

impl Default for ChunkedWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkedWriter;
    use crate::Reflect;
    use crate::json::GenStatus;

    #[derive(Reflect, Default)]
    struct Event {
        seq: u32,
        kind: String,
    }

    #[test]
    fn chunks_concatenate_into_one_array() {
        let mut writer = ChunkedWriter::new();
        let first = writer
            .feed(&Event {
                seq: 1,
                kind: "open".to_owned(),
            })
            .unwrap();
        let second = writer
            .feed(&Event {
                seq: 2,
                kind: "close".to_owned(),
            })
            .unwrap();
        let tail = writer.finish().unwrap();

        assert_eq!(first, r#"[{"seq":1,"kind":"open"}"#);
        assert_eq!(second, r#",{"seq":2,"kind":"close"}"#);
        assert_eq!(tail, "]");
        assert_eq!(
            format!("{first}{second}{tail}"),
            r#"[{"seq":1,"kind":"open"},{"seq":2,"kind":"close"}]"#,
        );
    }

    #[test]
    fn named_writer_wraps_the_array() {
        let mut writer = ChunkedWriter::named("events");
        let mut out = String::new();
        out.push_str(&writer.feed(&7u32).unwrap());
        out.push_str(&writer.feed(&8u32).unwrap());
        out.push_str(&writer.finish().unwrap());
        assert_eq!(out, r#"{"events":[7,8]}"#);
    }

    #[test]
    fn finishing_an_empty_writer_yields_an_empty_array() {
        let mut writer = ChunkedWriter::new();
        assert_eq!(writer.finish().unwrap(), "[]");
    }

    #[test]
    fn feeding_after_finish_fails() {
        let mut writer = ChunkedWriter::new();
        writer.feed(&1u32).unwrap();
        writer.finish().unwrap();
        let err = writer.feed(&2u32).unwrap_err();
        assert_eq!(err.status(), GenStatus::GenerationComplete);
    }
}
