//! The labeled-tree model sitting between values and text formats.
//!
//! Every node carries an optional text payload plus an ordered list of
//! labeled children; sequence elements use the empty label. A node whose
//! payload is absent is the null node, which is how an explicit `null` in
//! the input stays distinguishable from an empty string.

mod read;
mod write;

pub use read::{TreeReader, from_tree};
pub use write::{TreeWriter, to_tree};

/// One node of the intermediate tree.
///
/// # Examples
///
/// ```
/// use omniform::Tree;
///
/// let mut point = Tree::new();
/// point.push("x", Tree::leaf("3"));
/// point.push("y", Tree::leaf("4"));
/// assert_eq!(point.get("y").and_then(|n| n.value()), Some("4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    value: Option<String>,
    children: Vec<(String, Tree)>,
}

impl Tree {
    /// An empty node: present, no payload text, no children.
    pub fn new() -> Self {
        Self {
            value: Some(String::new()),
            children: Vec::new(),
        }
    }

    /// A leaf carrying `text`.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// The null node.
    pub fn null() -> Self {
        Self {
            value: None,
            children: Vec::new(),
        }
    }

    /// Whether this is the null node.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// The payload text, `None` on the null node.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, text: impl Into<String>) {
        self.value = Some(text.into());
    }

    /// Appends a child under `label` and returns it for further building.
    pub fn push(&mut self, label: impl Into<String>, child: Tree) -> &mut Tree {
        self.children.push((label.into(), child));
        // Just pushed, so the vector cannot be empty.
        let index = self.children.len() - 1;
        &mut self.children[index].1
    }

    /// The first child under `label`, if any.
    pub fn get(&self, label: &str) -> Option<&Tree> {
        self.children
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, child)| child)
    }

    /// All children in insertion order.
    #[inline]
    pub fn children(&self) -> &[(String, Tree)] {
        &self.children
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
