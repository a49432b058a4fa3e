use crate::ops::{FieldMut, PairMut, PairRef, Struct};
use crate::reflection::{Reflect, Shape, ShapeMut};
use crate::visit::{Tag, Visitor, VisitorMut};

// -----------------------------------------------------------------------------
// Write traversal

/// Walks `value` and feeds it to a write backend.
///
/// Dispatch per category:
///
/// - scalars go straight to [`Visitor::on_value`];
/// - optionals and nullables are visited transparently, the wrapped value
///   keeping the wrapper's tag;
/// - structs visit each registered field as [`Tag::Named`], in registry
///   order;
/// - sequences and tuples visit items as [`Tag::Element`];
/// - maps visit entry values as [`Tag::Entry`] keyed by the stringified key;
/// - pairs traverse as a `{first, second}` struct at labeled positions and
///   at the root, and collapse to a single labeled item (second keyed by
///   first) at sequence-element positions.
///
/// # Examples
///
/// ```
/// use omniform::{NoopVisitor, Tag, apply};
///
/// let rows = vec![vec![1u8, 2], vec![3]];
/// apply(&rows, Tag::Root, &mut NoopVisitor).unwrap();
/// ```
pub fn apply<V: Visitor>(
    value: &dyn Reflect,
    tag: Tag<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match value.shape() {
        Shape::Scalar(scalar) => visitor.on_value(scalar, tag),
        Shape::Optional(optional) => {
            let descend = visitor.on_optional(optional.is_present(), tag)?;
            if descend {
                if let Some(inner) = optional.value() {
                    apply(inner, tag, visitor)?;
                }
            }
            Ok(())
        }
        Shape::Nullable(nullable) => match nullable.target() {
            Some(target) => {
                if visitor.on_nullable(true, tag)? {
                    apply(target, tag, visitor)?;
                }
                Ok(())
            }
            None => {
                visitor.on_nullable(false, tag)?;
                Ok(())
            }
        },
        Shape::Sequence(sequence) => {
            let len = sequence.element_len();
            let mut items = visitor.on_sequence_start(len, tag)?;
            for index in 0..len {
                if let Some(element) = sequence.element_at(index) {
                    apply(element, Tag::Element, &mut items)?;
                }
            }
            drop(items);
            visitor.on_sequence_end(tag)
        }
        Shape::Tuple(tuple) => {
            let len = tuple.slot_len();
            let mut items = visitor.on_sequence_start(len, tag)?;
            for index in 0..len {
                if let Some(slot) = tuple.slot_at(index) {
                    apply(slot, Tag::Element, &mut items)?;
                }
            }
            drop(items);
            visitor.on_sequence_end(tag)
        }
        Shape::Map(map) => {
            let mut items = visitor.on_map_start(map.entry_len(), tag)?;
            for (key, entry) in map.entries() {
                apply(entry, Tag::Entry(&key), &mut items)?;
            }
            drop(items);
            visitor.on_map_end(tag)
        }
        Shape::Pair(pair) => apply_pair(pair, tag, visitor),
        Shape::Struct(fields) => {
            let registry = fields.registry();
            let mut items = visitor.on_struct_start(tag)?;
            for index in 0..registry.len() {
                if let (Some(name), Some(field)) = (registry.name_at(index), fields.field_at(index))
                {
                    apply(field.as_reflect(), Tag::Named(name), &mut items)?;
                }
            }
            drop(items);
            visitor.on_struct_end(tag)
        }
    }
}

fn apply_pair<V: Visitor>(
    pair: PairRef<'_>,
    tag: Tag<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match tag {
        // An element position has no label of its own; the pair supplies one.
        Tag::Element => {
            let key = pair.key();
            apply(pair.second, Tag::Entry(&key), visitor)
        }
        Tag::Root | Tag::Named(_) | Tag::Entry(_) => {
            let mut items = visitor.on_struct_start(tag)?;
            items.on_value(pair.first, Tag::Named("first"))?;
            apply(pair.second, Tag::Named("second"), &mut items)?;
            drop(items);
            visitor.on_struct_end(tag)
        }
    }
}

// -----------------------------------------------------------------------------
// Read traversal

/// Walks `target` and fills it from a read backend.
///
/// The mirror of [`apply`]: the same dispatch, driven by the target's
/// structure, with each callback pulling from the backend's input. Absent
/// optionals and nullables leave the target untouched; sequences are resized
/// to the input length first (when the backend reports one and the target
/// supports it) and then filled element by element in place.
///
/// Struct fields read through an accessor are materialized as a snapshot of
/// the current value, filled, and committed back through the setter, so
/// parts the input does not mention keep their state.
pub fn apply_mut<V: VisitorMut>(
    target: &mut dyn Reflect,
    tag: Tag<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match target.shape_mut() {
        ShapeMut::Scalar(scalar) => visitor.on_value(scalar, tag),
        ShapeMut::Optional(optional) => {
            if visitor.on_optional(tag)? {
                apply_mut(optional.set_default(), tag, visitor)?;
            }
            Ok(())
        }
        ShapeMut::Nullable(nullable) => {
            if visitor.on_nullable(tag)? {
                apply_mut(nullable.reset_target(), tag, visitor)?;
            }
            Ok(())
        }
        ShapeMut::Sequence(sequence) => {
            let (mut items, len) = visitor.on_sequence_start(tag)?;
            if let Some(len) = len {
                sequence.resize_default(len);
            }
            for index in 0..sequence.element_len() {
                if let Some(element) = sequence.element_mut(index) {
                    apply_mut(element, Tag::Element, &mut items)?;
                }
            }
            drop(items);
            visitor.on_sequence_end(tag)
        }
        ShapeMut::Tuple(tuple) => {
            let (mut items, _) = visitor.on_sequence_start(tag)?;
            for index in 0..tuple.slot_len() {
                if let Some(slot) = tuple.slot_mut(index) {
                    apply_mut(slot, Tag::Element, &mut items)?;
                }
            }
            drop(items);
            visitor.on_sequence_end(tag)
        }
        ShapeMut::Map(map) => {
            let mut items = visitor.on_map_start(map, tag)?;
            for key in map.keys() {
                if let Some(entry) = map.entry_mut(&key) {
                    apply_mut(entry, Tag::Entry(&key), &mut items)?;
                }
            }
            drop(items);
            visitor.on_map_end(tag)
        }
        ShapeMut::Pair(pair) => apply_pair_mut(pair, tag, visitor),
        ShapeMut::Struct(fields) => {
            let mut items = visitor.on_struct_start(tag)?;
            let registry = fields.registry();
            for index in 0..registry.len() {
                let Some(name) = registry.name_at(index) else {
                    continue;
                };
                apply_field_mut(fields, index, name, &mut items)?;
            }
            drop(items);
            visitor.on_struct_end(tag)
        }
    }
}

fn apply_field_mut<V: VisitorMut>(
    fields: &mut dyn Struct,
    index: usize,
    name: &str,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let mut filled = None;
    match fields.field_at_mut(index) {
        Some(FieldMut::Place(place)) => {
            apply_mut(place, Tag::Named(name), visitor)?;
        }
        Some(FieldMut::Virtual(mut snapshot)) => {
            apply_mut(snapshot.as_reflect_mut(), Tag::Named(name), visitor)?;
            filled = Some(snapshot);
        }
        None => {}
    }
    if let Some(snapshot) = filled {
        // The snapshot came from field_at_mut, so its type always matches.
        let _ = fields.set_field(index, snapshot);
    }
    Ok(())
}

fn apply_pair_mut<V: VisitorMut>(
    pair: PairMut<'_>,
    tag: Tag<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match tag {
        // The current first supplies the label to look the value up under,
        // mirroring the write side.
        Tag::Element => {
            let key = pair.key();
            apply_mut(pair.second, Tag::Entry(&key), visitor)
        }
        Tag::Root | Tag::Named(_) | Tag::Entry(_) => {
            let mut items = visitor.on_struct_start(tag)?;
            items.on_value(pair.first, Tag::Named("first"))?;
            apply_mut(pair.second, Tag::Named("second"), &mut items)?;
            drop(items);
            visitor.on_struct_end(tag)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::collections::BTreeMap;

    use super::{apply, apply_mut};
    use crate::ops::{Map, Scalar};
    use crate::visit::{NoopVisitor, Tag, Visitor, VisitorMut};

    /// Records every callback as a flat line, child visitors included.
    struct Recorder<'a> {
        log: &'a mut Vec<String>,
    }

    impl Recorder<'_> {
        fn push(&mut self, what: &str, tag: Tag<'_>) {
            self.log.push(format!("{what} @ {tag}"));
        }
    }

    impl Visitor for Recorder<'_> {
        type Error = Infallible;
        type Child<'c>
            = Recorder<'c>
        where
            Self: 'c;

        fn on_value(&mut self, value: &dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error> {
            let rendered = value.to_value().to_string();
            self.log.push(format!("value {rendered} @ {tag}"));
            Ok(())
        }

        fn on_optional(&mut self, present: bool, tag: Tag<'_>) -> Result<bool, Self::Error> {
            self.push(if present { "some" } else { "none" }, tag);
            Ok(present)
        }

        fn on_nullable(&mut self, present: bool, tag: Tag<'_>) -> Result<bool, Self::Error> {
            self.push(if present { "ref" } else { "null" }, tag);
            Ok(present)
        }

        fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
            self.push("struct{", tag);
            Ok(Recorder { log: &mut *self.log })
        }

        fn on_struct_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
            self.push("}struct", tag);
            Ok(())
        }

        fn on_sequence_start(
            &mut self,
            len: usize,
            tag: Tag<'_>,
        ) -> Result<Self::Child<'_>, Self::Error> {
            self.log.push(format!("seq[{len} @ {tag}"));
            Ok(Recorder { log: &mut *self.log })
        }

        fn on_sequence_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
            self.push("]seq", tag);
            Ok(())
        }

        fn on_map_start(
            &mut self,
            len: usize,
            tag: Tag<'_>,
        ) -> Result<Self::Child<'_>, Self::Error> {
            self.log.push(format!("map<{len} @ {tag}"));
            Ok(Recorder { log: &mut *self.log })
        }

        fn on_map_end(&mut self, tag: Tag<'_>) -> Result<(), Self::Error> {
            self.push(">map", tag);
            Ok(())
        }
    }

    #[test]
    fn nested_sequences_visit_in_order() {
        let rows = vec![vec![1u8, 2], vec![3]];
        let mut log = Vec::new();
        apply(&rows, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(
            log,
            [
                "seq[2 @ root",
                "seq[2 @ element",
                "value 1 @ element",
                "value 2 @ element",
                "]seq @ element",
                "seq[1 @ element",
                "value 3 @ element",
                "]seq @ element",
                "]seq @ root",
            ],
        );
    }

    #[test]
    fn optionals_are_transparent() {
        let present: Option<u32> = Some(5);
        let absent: Option<u32> = None;
        let mut log = Vec::new();
        apply(&present, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        apply(&absent, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(log, ["some @ root", "value 5 @ root", "none @ root"]);
    }

    #[test]
    fn map_entries_carry_their_keys() {
        let mut scores: BTreeMap<String, u32> = BTreeMap::new();
        scores.insert("a".into(), 1);
        scores.insert("b".into(), 2);
        let mut log = Vec::new();
        apply(&scores, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(
            log,
            [
                "map<2 @ root",
                "value 1 @ a",
                "value 2 @ b",
                ">map @ root",
            ],
        );
    }

    #[test]
    fn pair_flattens_only_at_element_positions() {
        use crate::Pair;

        let named: Pair<String, u32> = Pair::new("k".into(), 9);
        let mut log = Vec::new();
        apply(&named, Tag::Named("slot"), &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(
            log,
            [
                "struct{ @ slot",
                "value k @ first",
                "value 9 @ second",
                "}struct @ slot",
            ],
        );

        let listed = vec![Pair::<String, u32>::new("k".into(), 9)];
        log.clear();
        apply(&listed, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(
            log,
            ["seq[1 @ root", "value 9 @ k", "]seq @ root"],
        );
    }

    #[test]
    fn tuples_walk_slots_as_elements() {
        let row = (1u8, String::from("two"));
        let mut log = Vec::new();
        apply(&row, Tag::Root, &mut Recorder { log: &mut log }).unwrap();
        assert_eq!(
            log,
            [
                "seq[2 @ root",
                "value 1 @ element",
                "value two @ element",
                "]seq @ root",
            ],
        );
    }

    /// Feeds fixed scalars into every slot and reports every sequence as two
    /// items long.
    struct TwoElements;

    impl VisitorMut for TwoElements {
        type Error = Infallible;
        type Child<'c>
            = TwoElements
        where
            Self: 'c;

        fn on_value(&mut self, value: &mut dyn Scalar, _tag: Tag<'_>) -> Result<(), Self::Error> {
            let _ = value.parse_text("7");
            Ok(())
        }

        fn on_optional(&mut self, _tag: Tag<'_>) -> Result<bool, Self::Error> {
            Ok(false)
        }

        fn on_nullable(&mut self, _tag: Tag<'_>) -> Result<bool, Self::Error> {
            Ok(false)
        }

        fn on_struct_start(&mut self, _tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
            Ok(TwoElements)
        }

        fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
            Ok(())
        }

        fn on_sequence_start(
            &mut self,
            _tag: Tag<'_>,
        ) -> Result<(Self::Child<'_>, Option<usize>), Self::Error> {
            Ok((TwoElements, Some(2)))
        }

        fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
            Ok(())
        }

        fn on_map_start(
            &mut self,
            map: &mut dyn Map,
            _tag: Tag<'_>,
        ) -> Result<Self::Child<'_>, Self::Error> {
            map.insert_default("seeded").unwrap();
            Ok(TwoElements)
        }

        fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn read_resizes_sequences_to_the_reported_length() {
        let mut numbers = vec![1u32, 2, 3, 4];
        apply_mut(&mut numbers, Tag::Root, &mut TwoElements).unwrap();
        assert_eq!(numbers, vec![7, 7]);
    }

    #[test]
    fn read_seeds_maps_before_filling() {
        let mut scores: BTreeMap<String, u32> = BTreeMap::new();
        apply_mut(&mut scores, Tag::Root, &mut TwoElements).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("seeded"), Some(&7));
    }

    #[test]
    fn absent_optionals_leave_the_target_alone() {
        let mut slot: Option<u32> = Some(41);
        apply_mut(&mut slot, Tag::Root, &mut TwoElements).unwrap();
        assert_eq!(slot, Some(41));
    }

    #[test]
    fn noop_visitor_walks_everything() {
        let mut scores: BTreeMap<String, Vec<Option<u32>>> = BTreeMap::new();
        scores.insert("a".into(), vec![Some(1), None]);
        apply(&scores, Tag::Root, &mut NoopVisitor).unwrap();

        let mut target: Vec<(u8, String)> = vec![(1, "x".into())];
        apply_mut(&mut target, Tag::Root, &mut NoopVisitor).unwrap();
        assert_eq!(target, vec![(1, String::from("x"))]);
    }
}
