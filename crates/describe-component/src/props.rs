//! Component props.
//!
//! Props are an ordered string-keyed mapping. `set_props` shallow-merges into
//! it the way component state updates do: keys present in the update
//! overwrite, all other keys are left alone.

use std::collections::btree_map::{self, BTreeMap};

use serde_json::{Map, Number, Value};

use crate::markup;
use crate::node::{Element, Node};

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Explicit absence of a value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// String value
    Text(String),
    /// A single child node
    Node(Node),
    /// Several child nodes
    Nodes(Vec<Node>),
    /// List of arbitrary values
    List(Vec<PropValue>),
}

impl PropValue {
    /// Borrow as a string if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean value if this is a flag.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the number if this is numeric.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check for [`PropValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Nodes carried by this value, if any.
    #[must_use]
    pub fn nodes(&self) -> Vec<Node> {
        match self {
            Self::Node(node) => vec![node.clone()],
            Self::Nodes(nodes) => nodes.clone(),
            Self::Text(text) => vec![Node::text(text.clone())],
            Self::List(items) => items.iter().flat_map(Self::nodes).collect(),
            Self::Null | Self::Bool(_) | Self::Number(_) => Vec::new(),
        }
    }

    /// Render as an attribute string (scalars only).
    #[must_use]
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }

    /// Convert to JSON. Nodes are serialized as markup strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
            Self::Node(node) => Value::String(markup::to_markup(node)),
            Self::Nodes(nodes) => Value::String(markup::to_markup_all(nodes)),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Node> for PropValue {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Element> for PropValue {
    fn from(value: Element) -> Self {
        Self::Node(Node::Element(value))
    }
}

impl From<Vec<Node>> for PropValue {
    fn from(value: Vec<Node>) -> Self {
        Self::Nodes(value)
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            // Nested objects have no prop equivalent; keep them as their JSON text.
            Value::Object(map) => Self::Text(Value::Object(map).to_string()),
        }
    }
}

/// Ordered mapping of prop names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite a single prop.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        let _ = self.entries.insert(key.into(), value.into());
    }

    /// Look up a prop.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Look up a text prop.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Check whether a prop is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a prop, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    /// Shallow merge: keys in `other` win, other keys are untouched.
    pub fn merge(&mut self, other: Props) {
        self.entries.extend(other.entries);
    }

    /// Remove every prop.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of props.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no props are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prop names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.entries.iter()
    }

    /// Child nodes passed through the `children` prop.
    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.get("children").map(PropValue::nodes).unwrap_or_default()
    }

    /// Convert to a JSON object, mostly for logging.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

impl<K: Into<String>, V: Into<PropValue>, const N: usize> From<[(K, V); N]> for Props {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod prop_value_tests {
        use super::*;

        #[test]
        fn test_scalar_conversions() {
            assert_eq!(PropValue::from("red").as_str(), Some("red"));
            assert_eq!(PropValue::from(true).as_bool(), Some(true));
            assert_eq!(PropValue::from(3).as_f64(), Some(3.0));
            assert!(PropValue::Null.is_null());
        }

        #[test]
        fn test_attribute_values() {
            assert_eq!(PropValue::from(3).to_attribute_value().as_deref(), Some("3"));
            assert_eq!(PropValue::from(1.5).to_attribute_value().as_deref(), Some("1.5"));
            assert_eq!(PropValue::from(false).to_attribute_value().as_deref(), Some("false"));
            assert!(PropValue::Null.to_attribute_value().is_none());
        }

        #[test]
        fn test_from_json() {
            let value: PropValue = serde_json::json!(["a", 1, null]).into();
            assert_eq!(
                value,
                PropValue::List(vec![
                    PropValue::Text("a".into()),
                    PropValue::Number(1.0),
                    PropValue::Null
                ])
            );
        }

        #[test]
        fn test_node_json_is_markup() {
            let value = PropValue::from(Element::new("span").attr("id", "some-child"));
            assert_eq!(value.to_json(), Value::String("<span id=\"some-child\"></span>".into()));
        }

        #[test]
        fn test_text_value_yields_text_node() {
            assert_eq!(PropValue::from("hi").nodes(), vec![Node::text("hi")]);
        }
    }

    mod props_tests {
        use super::*;

        #[test]
        fn test_new_is_empty() {
            let props = Props::new();
            assert!(props.is_empty());
            assert_eq!(props.len(), 0);
        }

        #[test]
        fn test_merge_overwrites_and_keeps() {
            let mut props = Props::from([("color", "red"), ("size", "large")]);
            props.merge(Props::from([("color", "blue")]));
            assert_eq!(props.get_str("color"), Some("blue"));
            assert_eq!(props.get_str("size"), Some("large"));
        }

        #[test]
        fn test_clear() {
            let mut props = Props::new().with("color", "red");
            props.clear();
            assert!(props.is_empty());
        }

        #[test]
        fn test_children_from_node_and_list() {
            let single = Props::new().with("children", Element::new("span"));
            assert_eq!(single.children().len(), 1);

            let many = Props::new().with(
                "children",
                vec![Node::from(Element::new("b")), Node::text("x")],
            );
            assert_eq!(many.children().len(), 2);

            assert!(Props::new().children().is_empty());
        }

        #[test]
        fn test_to_json_object() {
            let props = Props::new().with("color", "red").with("count", 2);
            assert_eq!(props.to_json(), serde_json::json!({"color": "red", "count": 2.0}));
        }

        #[test]
        fn test_keys_sorted() {
            let props = Props::from([("b", 1), ("a", 2)]);
            let keys: Vec<_> = props.keys().collect();
            assert_eq!(keys, vec!["a", "b"]);
        }
    }

    proptest! {
        #[test]
        fn prop_merge_is_key_union_with_new_values_winning(
            base in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..8),
            update in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..8),
        ) {
            let mut props: Props = base.clone().into_iter().collect();
            props.merge(update.clone().into_iter().collect());

            let mut expected_keys: Vec<&String> = base.keys().chain(update.keys()).collect();
            expected_keys.sort();
            expected_keys.dedup();
            let keys: Vec<&str> = props.keys().collect();
            prop_assert_eq!(keys.len(), expected_keys.len());

            for (key, value) in &props {
                let want = update.get(key).or_else(|| base.get(key)).copied();
                prop_assert_eq!(value.as_f64(), want.map(f64::from));
            }
        }
    }
}
