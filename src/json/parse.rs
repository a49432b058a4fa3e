use core::fmt;

use serde_core::de::{Deserialize, Deserializer, MapAccess, SeqAccess};

use crate::error::DecodeError;
use crate::tree::Tree;

/// Parses JSON text into the intermediate tree.
///
/// Scalars keep their lexical form: numbers and booleans become the text
/// they re-parse from, `null` becomes the null node. Arrays become children
/// under the empty label, objects children under their keys.
///
/// # Examples
///
/// ```
/// let tree = omniform::json::parse(r#"{"x":null}"#)?;
/// assert!(tree.get("x").is_some_and(|n| n.is_null()));
/// # Ok::<(), omniform::DecodeError>(())
/// ```
pub fn parse(text: &str) -> Result<Tree, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

struct NodeVisitor;

impl<'de> serde_core::de::Visitor<'de> for NodeVisitor {
    type Value = Tree;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Tree::leaf(if v { "true" } else { "false" }))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Tree::leaf(v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Tree::leaf(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Tree::leaf(v.to_string()))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Tree::leaf(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Tree::null())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut node = Tree::new();
        while let Some(child) = seq.next_element::<Tree>()? {
            node.push("", child);
        }
        Ok(node)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut node = Tree::new();
        while let Some((label, child)) = map.next_entry::<String, Tree>()? {
            node.push(label, child);
        }
        Ok(node)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::tree::Tree;

    #[test]
    fn scalars_keep_their_lexical_form() {
        assert_eq!(parse("true").unwrap(), Tree::leaf("true"));
        assert_eq!(parse("-17").unwrap(), Tree::leaf("-17"));
        assert_eq!(parse("42.5").unwrap(), Tree::leaf("42.5"));
        assert_eq!(parse(r#""hi there""#).unwrap(), Tree::leaf("hi there"));
    }

    #[test]
    fn null_and_empty_string_stay_distinct() {
        let null = parse("null").unwrap();
        assert!(null.is_null());
        assert_eq!(null.value(), None);

        let empty = parse(r#""""#).unwrap();
        assert!(!empty.is_null());
        assert_eq!(empty.value(), Some(""));
    }

    #[test]
    fn arrays_use_the_empty_label() {
        let tree = parse("[1,2,3]").unwrap();
        assert_eq!(tree.value(), Some(""));
        let labels: Vec<&str> = tree.children().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(labels, ["", "", ""]);
        assert_eq!(tree.children()[1].1.value(), Some("2"));
    }

    #[test]
    fn objects_keep_key_order() {
        let tree = parse(r#"{"b":1,"a":{"x":null}}"#).unwrap();
        let labels: Vec<&str> = tree.children().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(labels, ["b", "a"]);
        let inner = tree.get("a").unwrap();
        assert!(inner.get("x").unwrap().is_null());
    }

    #[test]
    fn empty_containers_are_present() {
        let tree = parse("{}").unwrap();
        assert!(!tree.is_null());
        assert!(tree.children().is_empty());
    }

    #[test]
    fn malformed_text_is_rejected() {
        let err = parse("{\"open\":").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON:"));
    }
}
