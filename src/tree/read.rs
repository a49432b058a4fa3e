use std::rc::Rc;

use crate::error::DecodeError;
use crate::ops::{Map, Scalar};
use crate::reflection::Reflect;
use crate::tree::Tree;
use crate::visit::{Tag, VisitorMut, apply_mut};

// -----------------------------------------------------------------------------
// Error paths

enum Segment {
    Field(String),
    Index(usize),
}

/// One step of the breadcrumb trail, shared between child readers so a
/// deep error can render the full path without the readers borrowing each
/// other.
struct PathLink {
    parent: Option<Rc<PathLink>>,
    segment: Segment,
}

fn link(parent: &Option<Rc<PathLink>>, segment: Option<Segment>) -> Option<Rc<PathLink>> {
    match segment {
        Some(segment) => Some(Rc::new(PathLink {
            parent: parent.clone(),
            segment,
        })),
        None => parent.clone(),
    }
}

/// `"station.matrix[2]"` form; the empty trail renders as `"root"`.
fn render(path: &Option<Rc<PathLink>>) -> String {
    let mut segments = Vec::new();
    let mut cursor = path.as_ref();
    while let Some(step) = cursor {
        segments.push(&step.segment);
        cursor = step.parent.as_ref();
    }
    if segments.is_empty() {
        return "root".to_owned();
    }
    let mut out = String::new();
    for segment in segments.iter().rev() {
        match segment {
            Segment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Scalar targets have plain names, so the last path segment of the full
/// type name is the one worth showing.
fn short_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

// -----------------------------------------------------------------------------
// TreeReader

/// The tree read backend.
///
/// Labeled positions look their node up by label; positional ones consume
/// the cursor over the current node's children. Presence of an optional is
/// the absent-or-null rule: a missing node and the null node both read as
/// absent, while an empty leaf or an empty container is present.
pub struct TreeReader<'a> {
    node: &'a Tree,
    next: usize,
    path: Option<Rc<PathLink>>,
}

impl<'a> TreeReader<'a> {
    pub fn new(node: &'a Tree) -> Self {
        Self {
            node,
            next: 0,
            path: None,
        }
    }

    fn segment_for(&self, tag: Tag<'_>) -> Option<Segment> {
        match tag {
            Tag::Root => None,
            Tag::Named(label) | Tag::Entry(label) => Some(Segment::Field(label.to_owned())),
            Tag::Element => Some(Segment::Index(self.next)),
        }
    }

    /// The path of the slot `resolve` just consumed, for error reports.
    fn consumed_path(&self, tag: Tag<'_>) -> String {
        let segment = match tag {
            Tag::Root => None,
            Tag::Named(label) | Tag::Entry(label) => Some(Segment::Field(label.to_owned())),
            Tag::Element => Some(Segment::Index(self.next - 1)),
        };
        render(&link(&self.path, segment))
    }

    /// The input node for `tag`. Positional tags consume the cursor slot;
    /// labeled lookups are keyed and leave the cursor alone.
    fn resolve(&mut self, tag: Tag<'_>) -> Result<&'a Tree, DecodeError> {
        match tag {
            Tag::Root => Ok(self.node),
            Tag::Named(label) | Tag::Entry(label) => {
                self.node
                    .get(label)
                    .ok_or_else(|| DecodeError::MissingField {
                        field: label.to_owned(),
                        path: render(&self.path),
                    })
            }
            Tag::Element => match self.node.children().get(self.next) {
                Some((_, child)) => {
                    self.next += 1;
                    Ok(child)
                }
                None => Err(DecodeError::SequenceExhausted {
                    index: self.next,
                    path: render(&self.path),
                }),
            },
        }
    }

    /// The node `tag` refers to, without consuming anything.
    fn peek(&self, tag: Tag<'_>) -> Option<&'a Tree> {
        match tag {
            Tag::Root => Some(self.node),
            Tag::Named(label) | Tag::Entry(label) => self.node.get(label),
            Tag::Element => self.node.children().get(self.next).map(|(_, child)| child),
        }
    }

    /// Presence under the absent-or-null rule.
    ///
    /// A present value leaves the cursor alone: the value visit that follows
    /// consumes the slot. Only a null in a positional slot advances here,
    /// since nothing will come back for it.
    fn probe(&mut self, tag: Tag<'_>) -> bool {
        match self.peek(tag) {
            Some(node) if !node.is_null() => true,
            Some(_) => {
                if matches!(tag, Tag::Element) {
                    self.next += 1;
                }
                false
            }
            None => false,
        }
    }

    fn descend(&mut self, tag: Tag<'_>) -> Result<TreeReader<'a>, DecodeError> {
        let path = link(&self.path, self.segment_for(tag));
        let node = self.resolve(tag)?;
        Ok(TreeReader {
            node,
            next: 0,
            path,
        })
    }
}

impl<'a> VisitorMut for TreeReader<'a> {
    type Error = DecodeError;
    type Child<'c>
        = TreeReader<'a>
    where
        Self: 'c;

    fn on_value(&mut self, value: &mut dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error> {
        let node = self.resolve(tag)?;
        let Some(text) = node.value() else {
            return Err(DecodeError::TypeMismatch {
                expected: short_name(value.type_name()),
                found: "null".to_owned(),
                path: self.consumed_path(tag),
            });
        };
        value
            .parse_text(text)
            .map_err(|err| DecodeError::TypeMismatch {
                expected: err.expected,
                found: err.text,
                path: self.consumed_path(tag),
            })
    }

    fn on_optional(&mut self, tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(self.probe(tag))
    }

    fn on_nullable(&mut self, tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(self.probe(tag))
    }

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        self.descend(tag)
    }

    fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_sequence_start(
        &mut self,
        tag: Tag<'_>,
    ) -> Result<(Self::Child<'_>, Option<usize>), Self::Error> {
        let child = self.descend(tag)?;
        let hint = child.node.children().len();
        Ok((child, Some(hint)))
    }

    fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_map_start(
        &mut self,
        map: &mut dyn Map,
        tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        let child = self.descend(tag)?;
        for (label, _) in child.node.children() {
            map.insert_default(label)
                .map_err(|err| DecodeError::TypeMismatch {
                    expected: err.expected,
                    found: err.text,
                    path: render(&child.path),
                })?;
        }
        Ok(child)
    }

    fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Deserializes a value from the intermediate tree.
///
/// The value starts from its [`Default`]; nodes the input carries overwrite
/// the matching parts, everything else keeps its default. Labeled fields
/// must be present unless the target is an `Option`.
pub fn from_tree<T: Reflect + Default>(tree: &Tree) -> Result<T, DecodeError> {
    let mut value = T::default();
    let mut reader = TreeReader::new(tree);
    apply_mut(value.as_reflect_mut(), Tag::Root, &mut reader)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::from_tree;
    use crate::tree::{Tree, to_tree};
    use crate::visit::{Tag, apply_mut};
    use crate::{Pair, Reflect};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Inner {
        duration: u32,
        tags: Vec<String>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Outer {
        station: Inner,
        scale: f64,
        extremes: BTreeMap<String, Pair<String, i32>>,
        window: Option<Vec<u8>>,
    }

    fn sample() -> Outer {
        let mut extremes = BTreeMap::new();
        extremes.insert("hot".to_owned(), Pair::new("jul".to_owned(), 37));
        extremes.insert("cold".to_owned(), Pair::new("jan".to_owned(), -21));
        Outer {
            station: Inner {
                duration: 241,
                tags: vec!["ambient".to_owned(), String::new()],
            },
            scale: 42.5,
            extremes,
            window: Some(vec![1, 2, 3]),
        }
    }

    #[test]
    fn round_trips_through_the_tree() {
        let value = sample();
        let back: Outer = from_tree(&to_tree(&value)).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn root_scalars_read_from_leaves() {
        let n: u32 = from_tree(&Tree::leaf("7")).unwrap();
        assert_eq!(n, 7);
        let s: String = from_tree(&Tree::leaf("")).unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn null_and_empty_read_differently_into_options() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Slots {
            a: Option<String>,
            b: Option<String>,
            c: Option<String>,
        }

        let mut tree = Tree::new();
        tree.push("a", Tree::leaf(""));
        tree.push("b", Tree::null());

        let slots: Slots = from_tree(&tree).unwrap();
        assert_eq!(slots.a, Some(String::new()));
        assert_eq!(slots.b, None);
        assert_eq!(slots.c, None);
    }

    #[test]
    fn unmentioned_parts_keep_their_current_value() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Pref {
            kept: Option<u32>,
        }

        let mut target = Pref { kept: Some(41) };
        let empty = Tree::new();
        let mut reader = super::TreeReader::new(&empty);
        apply_mut(target.as_reflect_mut(), Tag::Root, &mut reader).unwrap();
        assert_eq!(target.kept, Some(41));
    }

    #[test]
    fn sequences_take_the_input_length() {
        let mut tree = Tree::new();
        tree.push("", Tree::leaf("5"));

        let mut target = vec![9u32, 9, 9];
        let mut reader = super::TreeReader::new(&tree);
        apply_mut(target.as_reflect_mut(), Tag::Root, &mut reader).unwrap();
        assert_eq!(target, [5]);
    }

    #[test]
    fn null_elements_leave_holes_absent() {
        let mut tree = Tree::new();
        let row = tree.push("", Tree::new());
        row.push("", Tree::leaf("1"));
        row.push("", Tree::null());
        row.push("", Tree::leaf("3"));

        let matrix: Vec<Vec<Option<i32>>> = from_tree(&tree).unwrap();
        assert_eq!(matrix, [vec![Some(1), None, Some(3)]]);
    }

    #[test]
    fn arrays_need_every_slot() {
        let mut tree = Tree::new();
        tree.push("", Tree::leaf("1"));
        tree.push("", Tree::leaf("2"));

        let err = from_tree::<[u8; 3]>(&tree).unwrap_err();
        assert_eq!(err.to_string(), "no element at index 2 in root: input exhausted");

        let ok: [u8; 2] = from_tree(&tree).unwrap();
        assert_eq!(ok, [1, 2]);
    }

    #[test]
    fn extra_elements_past_an_array_are_ignored() {
        let mut tree = Tree::new();
        tree.push("", Tree::leaf("1"));
        tree.push("", Tree::leaf("2"));
        tree.push("", Tree::leaf("3"));

        let ok: [u8; 2] = from_tree(&tree).unwrap();
        assert_eq!(ok, [1, 2]);
    }

    #[test]
    fn missing_fields_name_their_container() {
        let err = from_tree::<Inner>(&Tree::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing field `duration` at root");

        let mut tree = Tree::new();
        tree.push("station", Tree::new());
        tree.push("scale", Tree::leaf("1"));
        let err = from_tree::<Outer>(&tree).unwrap_err();
        assert_eq!(err.to_string(), "missing field `duration` at station");
    }

    #[test]
    fn mismatches_carry_the_full_path() {
        let mut tree = Tree::new();
        let station = tree.push("station", Tree::new());
        station.push("duration", Tree::leaf("fast"));

        let err = from_tree::<Outer>(&tree).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at station.duration: expected u32, found `fast`",
        );
    }

    #[test]
    fn element_paths_carry_their_indices() {
        let mut tree = Tree::new();
        let matrix = tree.push("matrix", Tree::new());
        matrix.push("", Tree::new()).push("", Tree::leaf("1"));
        matrix.push("", Tree::new()).push("", Tree::leaf("x"));

        #[derive(Reflect, Default, Debug)]
        struct Grid {
            matrix: Vec<Vec<i32>>,
        }

        let err = from_tree::<Grid>(&tree).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at matrix[1][0]: expected i32, found `x`",
        );
    }

    #[test]
    fn null_is_rejected_by_plain_scalars() {
        let err = from_tree::<u32>(&Tree::null()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at root: expected u32, found `null`",
        );
    }

    #[test]
    fn maps_seed_an_entry_per_label() {
        let mut tree = Tree::new();
        tree.push("beta", Tree::leaf("2"));
        tree.push("alpha", Tree::leaf("1"));

        let scores: BTreeMap<String, u32> = from_tree(&tree).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["alpha"], 1);
        assert_eq!(scores["beta"], 2);
    }

    #[test]
    fn unparseable_map_keys_are_mismatches() {
        let mut tree = Tree::new();
        tree.push("zz", Tree::leaf("1"));

        let err = from_tree::<BTreeMap<u32, u32>>(&tree).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at root: expected u32, found `zz`",
        );
    }

    #[test]
    fn absent_nullables_keep_the_current_allocation() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Holder {
            slot: Box<u32>,
        }

        let mut tree = Tree::new();
        tree.push("slot", Tree::null());
        let holder: Holder = from_tree(&tree).unwrap();
        assert_eq!(*holder.slot, 0);
    }
}
