use core::cell::RefCell;
use std::rc::Rc;

use crate::json::r#gen::{Buffer, Generator, GeneratorError};
use crate::ops::{Scalar, ScalarValue};
use crate::reflection::Reflect;
use crate::visit::{Tag, Visitor, apply};

// -----------------------------------------------------------------------------
// JsonWriter

/// The JSON write backend: visitor callbacks mapped onto generator tokens.
///
/// Labeled positions emit their key first, then the value; positional ones
/// emit the value alone. Absent optionals and nullables emit nothing at all,
/// so an absent named field is omitted rather than set to `null`.
///
/// All nesting levels share one generator; the child visitor is another
/// handle to it.
pub struct JsonWriter {
    r#gen: Rc<RefCell<Generator>>,
}

impl JsonWriter {
    pub fn new(r#gen: Rc<RefCell<Generator>>) -> Self {
        Self { r#gen }
    }

    /// Emits the key for labeled positions.
    fn key_for(&self, tag: Tag<'_>) -> Result<(), GeneratorError> {
        if let Some(label) = tag.label() {
            self.r#gen.borrow_mut().string(label)?;
        }
        Ok(())
    }
}

impl Visitor for JsonWriter {
    type Error = GeneratorError;
    type Child<'c>
        = JsonWriter
    where
        Self: 'c;

    /// Dispatches on the scalar's wire-side reading: numbers and booleans go
    /// through their native generator token, everything else through the
    /// string path (the lexical fallback included).
    fn on_value(&mut self, value: &dyn Scalar, tag: Tag<'_>) -> Result<(), Self::Error> {
        self.key_for(tag)?;
        let mut r#gen = self.r#gen.borrow_mut();
        match value.to_value() {
            ScalarValue::Bool(v) => r#gen.bool(v),
            ScalarValue::Int(v) => r#gen.int(v),
            ScalarValue::UInt(v) => r#gen.uint(v),
            ScalarValue::F32(v) => r#gen.double(f64::from(v)),
            ScalarValue::F64(v) => r#gen.double(v),
            ScalarValue::Str(v) => r#gen.string(v),
            ScalarValue::Text(v) => r#gen.string(&v),
        }
    }

    fn on_optional(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_nullable(&mut self, present: bool, _tag: Tag<'_>) -> Result<bool, Self::Error> {
        Ok(present)
    }

    fn on_struct_start(&mut self, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        self.key_for(tag)?;
        self.r#gen.borrow_mut().map_open()?;
        Ok(JsonWriter::new(Rc::clone(&self.r#gen)))
    }

    fn on_struct_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        self.r#gen.borrow_mut().map_close()
    }

    fn on_sequence_start(
        &mut self,
        _len: usize,
        tag: Tag<'_>,
    ) -> Result<Self::Child<'_>, Self::Error> {
        self.key_for(tag)?;
        self.r#gen.borrow_mut().array_open()?;
        Ok(JsonWriter::new(Rc::clone(&self.r#gen)))
    }

    fn on_sequence_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        self.r#gen.borrow_mut().array_close()
    }

    fn on_map_start(&mut self, _len: usize, tag: Tag<'_>) -> Result<Self::Child<'_>, Self::Error> {
        self.key_for(tag)?;
        self.r#gen.borrow_mut().map_open()?;
        Ok(JsonWriter::new(Rc::clone(&self.r#gen)))
    }

    fn on_map_end(&mut self, _tag: Tag<'_>) -> Result<(), Self::Error> {
        self.r#gen.borrow_mut().map_close()
    }
}

// -----------------------------------------------------------------------------
// Entry points

/// Serializes `value` to JSON.
///
/// The returned [`Buffer`] shares the generator's storage; it stays valid
/// however long the caller keeps it, without copying the bytes.
///
/// # Examples
///
/// ```
/// assert_eq!(omniform::to_json(&(1u8, 2.0f64)).unwrap().to_string(), "[1,2.0]");
/// ```
pub fn to_json(value: &dyn Reflect) -> Result<Buffer, GeneratorError> {
    let r#gen = Rc::new(RefCell::new(Generator::new()));
    let mut writer = JsonWriter::new(Rc::clone(&r#gen));
    apply(value, Tag::Root, &mut writer)?;
    Ok(Buffer::new(r#gen))
}

/// Serializes `value` wrapped in a single-field object, labeling a
/// top-level value that would otherwise be bare:
/// `to_json_named(&messages, "messages")` gives `{"messages":[...]}`.
pub fn to_json_named(value: &dyn Reflect, root: &str) -> Result<Buffer, GeneratorError> {
    let r#gen = Rc::new(RefCell::new(Generator::new()));
    r#gen.borrow_mut().map_open()?;
    let mut writer = JsonWriter::new(Rc::clone(&r#gen));
    apply(value, Tag::Named(root), &mut writer)?;
    r#gen.borrow_mut().map_close()?;
    Ok(Buffer::new(r#gen))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};
    use std::rc::Rc;

    use super::{to_json, to_json_named};
    use crate::{Pair, Reflect};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Probe {
        reading: f32,
        flags: VecDeque<bool>,
        count: usize,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Station {
        id: i32,
        probes: [Probe; 3],
        labels: BTreeMap<String, String>,
        matrix: Vec<Vec<i32>>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Report {
        station: Station,
        scale: f64,
        active: bool,
        window1: Option<Vec<i32>>,
        window2: Option<Vec<i32>>,
    }

    fn sample_report() -> Report {
        let probe = || Probe {
            reading: 42.5,
            flags: VecDeque::from([true, false]),
            count: 20,
        };
        let mut labels = BTreeMap::new();
        labels.insert("key1".to_owned(), "value1".to_owned());
        labels.insert("key2".to_owned(), "value2".to_owned());
        labels.insert("key3".to_owned(), String::new());
        labels.insert("key4".to_owned(), String::new());
        Report {
            station: Station {
                id: 100,
                probes: [probe(), probe(), probe()],
                labels,
                matrix: vec![vec![1, 2], vec![3, 4, 5], vec![6, 7, 8, 9], vec![10]],
            },
            scale: 14.0,
            active: true,
            window1: Some(Vec::new()),
            window2: None,
        }
    }

    #[test]
    fn nested_report_serializes_in_declaration_order() {
        let expected = concat!(
            "{",
            r#""station":{"#,
            r#""id":100,"#,
            r#""probes":[{"#,
            r#""reading":42.5,"#,
            r#""flags":[true,false],"#,
            r#""count":20"#,
            "},{",
            r#""reading":42.5,"#,
            r#""flags":[true,false],"#,
            r#""count":20"#,
            "},{",
            r#""reading":42.5,"#,
            r#""flags":[true,false],"#,
            r#""count":20"#,
            "}],",
            r#""labels":{"#,
            r#""key1":"value1","#,
            r#""key2":"value2","#,
            r#""key3":"","#,
            r#""key4":"""#,
            "},",
            r#""matrix":[[1,2],[3,4,5],[6,7,8,9],[10]]"#,
            "},",
            r#""scale":14.0,"#,
            r#""active":true,"#,
            r#""window1":[]"#,
            "}",
        );
        let out = to_json(&sample_report()).unwrap();
        assert_eq!(out.to_string(), expected);
    }

    #[test]
    fn absent_option_omits_the_field() {
        #[derive(Reflect, Default)]
        struct Slot {
            value: Option<i32>,
        }

        let absent = to_json(&Slot { value: None }).unwrap();
        assert_eq!(absent.to_string(), "{}");

        let present = to_json(&Slot { value: Some(0) }).unwrap();
        assert_eq!(present.to_string(), r#"{"value":0}"#);
    }

    #[test]
    fn tuples_render_as_arrays() {
        let row = (1i32, 2.0f64, String::from("ZZZ"));
        assert_eq!(to_json(&row).unwrap().to_string(), r#"[1,2.0,"ZZZ"]"#);

        let ints = (1i32, 2i32, String::from("ZZZ"));
        assert_eq!(to_json(&ints).unwrap().to_string(), r#"[1,2,"ZZZ"]"#);
    }

    #[test]
    fn strings_stay_scalars() {
        let text = String::from("abc");
        assert_eq!(to_json(&text).unwrap().to_string(), r#""abc""#);
    }

    #[test]
    fn named_root_wraps_the_value() {
        let messages = vec![1u32, 2, 3];
        let out = to_json_named(&messages, "messages").unwrap();
        assert_eq!(out.to_string(), r#"{"messages":[1,2,3]}"#);
    }

    #[test]
    fn map_keys_take_their_lexical_form() {
        let mut by_size: BTreeMap<u32, String> = BTreeMap::new();
        by_size.insert(2, "small".to_owned());
        by_size.insert(10, "large".to_owned());
        let out = to_json(&by_size).unwrap();
        assert_eq!(out.to_string(), r#"{"2":"small","10":"large"}"#);
    }

    #[test]
    fn pair_fields_keep_both_parts() {
        #[derive(Reflect, Default)]
        struct Extreme {
            hottest: Pair<String, i32>,
        }

        let record = Extreme {
            hottest: Pair::new("jul".to_owned(), 37),
        };
        assert_eq!(
            to_json(&record).unwrap().to_string(),
            r#"{"hottest":{"first":"jul","second":37}}"#,
        );
    }

    #[test]
    fn smart_pointers_are_transparent() {
        #[derive(Reflect, Default)]
        struct Wrapped {
            note: Rc<String>,
            deep: Box<Vec<u8>>,
        }

        let value = Wrapped {
            note: Rc::new("shared".to_owned()),
            deep: Box::new(vec![1, 2]),
        };
        assert_eq!(
            to_json(&value).unwrap().to_string(),
            r#"{"note":"shared","deep":[1,2]}"#,
        );
    }

    #[test]
    fn chars_travel_as_strings() {
        assert_eq!(to_json(&'Ж').unwrap().to_string(), r#""Ж""#);
    }

    #[test]
    fn buffer_outlives_the_write() {
        let bytes;
        {
            let out = to_json(&vec![7u8]).unwrap();
            bytes = out;
        }
        assert_eq!(bytes.to_string(), "[7]");
        assert_eq!(bytes.len(), 3);
    }

    #[test]
    fn round_trip_restores_the_report() {
        let report = sample_report();
        let json = to_json(&report).unwrap().to_string();
        let back: Report = crate::from_json(&json).unwrap();
        assert_eq!(back, report);
    }
}
