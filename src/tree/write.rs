use core::convert::Infallible;

use crate::ops::Scalar;
use crate::reflection::Reflect;
use crate::tree::Tree;
use crate::visit::{Tag, Visitor, apply};

/// The tree write backend.
///
/// Scalars land as leaves in their lexical form, containers as child nodes;
/// labels come from the position, sequence elements using the empty label.
/// Absent optionals and nullables leave no node behind.
pub struct TreeWriter<'a> {
    node: &'a mut Tree,
}

impl<'a> TreeWriter<'a> {
    pub fn new(node: &'a mut Tree) -> Self {
        Self { node }
    }

    /// The node a child visitor should fill for `tag`: the current node at
    /// the root, a fresh child everywhere else.
    fn child_for(&mut self, tag: Tag<'_>) -> &mut Tree {
        match tag {
            Tag::Root => &mut *self.node,
            Tag::Named(label) | Tag::Entry(label) => self.node.push(label, Tree::new()),
            Tag::Element => self.node.push("", Tree::new()),
        }
    }
}

impl Visitor for TreeWriter<'_> {
    type Error = Infallible;
    type Child<'c>
        = TreeWriter<'c>
    where
        Self: 'c;

    fn on_value(&mut self, value: &dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error> {
        let text = value.to_value().to_string();
        match tag {
            Tag::Root => self.node.set_value(text),
            Tag::Named(label) | Tag::Entry(label) => {
                self.node.push(label, Tree::leaf(text));
            }
            Tag::Element => {
                self.node.push("", Tree::leaf(text));
            }
        }
        Ok(())
    }

    fn on_optional(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_nullable(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        Ok(TreeWriter::new(self.child_for(tag)))
    }

    fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_sequence_start(
        &mut self,
        _len: usize,
        tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        Ok(TreeWriter::new(self.child_for(tag)))
    }

    fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_map_start(&mut self, _len: usize, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        Ok(TreeWriter::new(self.child_for(tag)))
    }

    fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Serializes `value` into the intermediate tree.
pub fn to_tree(value: &dyn Reflect) -> Tree {
    let mut tree = Tree::new();
    let mut writer = TreeWriter::new(&mut tree);
    match apply(value, Tag::Root, &mut writer) {
        Ok(()) => tree,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::to_tree;
    use crate::tree::Tree;
    use crate::{Pair, Reflect};

    #[derive(Reflect, Default)]
    struct Reading {
        label: String,
        celsius: f64,
        samples: Vec<u32>,
        fallback: Option<i32>,
    }

    #[test]
    fn structs_become_labeled_children() {
        let tree = to_tree(&Reading {
            label: "roof".to_owned(),
            celsius: 42.5,
            samples: vec![7, 9],
            fallback: None,
        });

        assert_eq!(tree.value(), Some(""));
        assert_eq!(tree.get("label").and_then(|n| n.value()), Some("roof"));
        assert_eq!(tree.get("celsius").and_then(|n| n.value()), Some("42.5"));

        let samples = tree.get("samples").unwrap();
        let elements: Vec<&str> = samples
            .children()
            .iter()
            .map(|(label, child)| {
                assert!(label.is_empty());
                child.value().unwrap()
            })
            .collect();
        assert_eq!(elements, ["7", "9"]);

        assert_eq!(tree.get("fallback"), None);
    }

    #[test]
    fn whole_floats_take_their_short_lexical_form() {
        let tree = to_tree(&14.0f64);
        assert_eq!(tree, Tree::leaf("14"));
    }

    #[test]
    fn root_scalars_become_leaves() {
        assert_eq!(to_tree(&true), Tree::leaf("true"));
        assert_eq!(to_tree(&String::from("hi")), Tree::leaf("hi"));
    }

    #[test]
    fn map_entries_keep_their_keys() {
        let mut scores: BTreeMap<String, u32> = BTreeMap::new();
        scores.insert("alpha".to_owned(), 3);
        scores.insert("beta".to_owned(), 5);
        let tree = to_tree(&scores);
        assert_eq!(tree.get("alpha").and_then(|n| n.value()), Some("3"));
        assert_eq!(tree.get("beta").and_then(|n| n.value()), Some("5"));
    }

    #[test]
    fn pairs_in_sequences_flatten_to_an_entry() {
        let pairs = vec![Pair::new("watermark".to_owned(), 88u32)];
        let tree = to_tree(&pairs);
        assert_eq!(tree.get("watermark").and_then(|n| n.value()), Some("88"));
    }

    #[test]
    fn present_empty_containers_leave_an_empty_node() {
        let tree = to_tree(&Reading {
            label: String::new(),
            celsius: 0.0,
            samples: Vec::new(),
            fallback: Some(3),
        });
        let samples = tree.get("samples").unwrap();
        assert!(samples.children().is_empty());
        assert!(!samples.is_null());
        assert_eq!(tree.get("fallback").and_then(|n| n.value()), Some("3"));
    }
}
