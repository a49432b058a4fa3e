//! The XML backend.
//!
//! Write-only, and direct: elements go straight to the output string
//! without an intermediate tree. Named positions become elements of that
//! name, sequence elements become `<value>`, and the whole document is
//! wrapped in a single root element. Labels are emitted as element names
//! as-is; payload text is escaped.

use core::convert::Infallible;

use crate::ops::Scalar;
use crate::reflection::Reflect;
use crate::visit::{Tag, Visitor, apply};

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Element name for a position: the label where there is one, `value`
/// where there is none.
fn element_name(tag: Tag<'_>) -> &str {
    match tag {
        Tag::Named(label) | Tag::Entry(label) => label,
        Tag::Root | Tag::Element => "value",
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// The XML write backend. Absent optionals and nullables leave no element.
pub struct XmlWriter<'a> {
    out: &'a mut String,
}

impl<'a> XmlWriter<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }

    fn open(&mut self, name: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push('>');
    }

    fn close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }
}

impl Visitor for XmlWriter<'_> {
    type Error = Infallible;
    type Child<'c>
        = XmlWriter<'c>
    where
        Self: 'c;

    fn on_value(&mut self, value: &dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error> {
        let name = element_name(tag);
        self.open(name);
        escape_into(self.out, &value.to_value().to_string());
        self.close(name);
        Ok(())
    }

    fn on_optional(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_nullable(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        self.open(element_name(tag));
        Ok(XmlWriter::new(&mut *self.out))
    }

    fn on_struct_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
        self.close(element_name(tag));
        Ok(())
    }

    fn on_sequence_start(
        &mut self,
        _len: usize,
        tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        self.open(element_name(tag));
        Ok(XmlWriter::new(&mut *self.out))
    }

    fn on_sequence_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
        self.close(element_name(tag));
        Ok(())
    }

    fn on_map_start(&mut self, _len: usize, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        self.open(element_name(tag));
        Ok(XmlWriter::new(&mut *self.out))
    }

    fn on_map_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
        self.close(element_name(tag));
        Ok(())
    }
}

/// Serializes `value` to XML under the default root element `<root>`.
///
/// # Examples
///
/// ```
/// let xml = omniform::to_xml(&vec![1u8, 2]);
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root><value>1</value><value>2</value></root>",
/// );
/// ```
pub fn to_xml(value: &dyn Reflect) -> String {
    to_xml_named(value, "root")
}

/// Serializes `value` to XML under a caller-chosen root element.
pub fn to_xml_named(value: &dyn Reflect, root: &str) -> String {
    let mut out = String::from(HEADER);
    let mut writer = XmlWriter::new(&mut out);
    match apply(value, Tag::Named(root), &mut writer) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    out
}
