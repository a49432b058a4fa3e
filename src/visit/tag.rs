use core::fmt;

// -----------------------------------------------------------------------------
// Tag

/// The position of the value currently being visited.
///
/// Every visitor callback receives one. Backends use it to decide whether
/// the item carries a label (and must emit or look one up) or is addressed
/// purely by position.
///
/// # Examples
///
/// ```
/// use omniform::Tag;
///
/// assert_eq!(Tag::Named("title").label(), Some("title"));
/// assert_eq!(Tag::Element.label(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    /// The value handed to the traversal entry point. No enclosing label.
    Root,
    /// A struct field, labeled with its registered name.
    Named(&'a str),
    /// A sequence or tuple element. Addressed by position, no label.
    Element,
    /// A map entry, labeled with the stringified key.
    Entry(&'a str),
}

impl<'a> Tag<'a> {
    /// The label at this position, if it carries one.
    #[inline]
    pub fn label(&self) -> Option<&'a str> {
        match self {
            Tag::Named(name) | Tag::Entry(name) => Some(name),
            Tag::Root | Tag::Element => None,
        }
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Root => f.write_str("root"),
            Tag::Named(name) | Tag::Entry(name) => f.write_str(name),
            Tag::Element => f.write_str("element"),
        }
    }
}
