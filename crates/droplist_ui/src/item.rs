//! Option items, groups and keys.
//!
//! The dropdown never inspects item types directly. Everything it needs from an
//! item goes through the [`OptionItem`] capability: named field lookup, a
//! whole-value key and a stable serialization. JSON values and plain
//! primitives implement it out of the box.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::constants::{
    CLASS_NAME_FIELD, DISABLED_FIELD, GROUP_ITEMS_FIELD, GROUP_MARKER_FIELD, GROUP_NAME_FIELD,
};

/// Comparable identity of an option.
///
/// Deserializes untagged, so `2`, `"b"` and `true` in a settings file all map
/// to the matching variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Key {
    /// Key for a JSON value. `null` has no key; objects and arrays use their
    /// serialized text.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Number(n) => Some(Key::Number(n.clone())),
            Value::String(s) => Some(Key::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Key::Text(value.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Number(n) => write!(f, "{}", n),
            Key::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

macro_rules! key_from_integer {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::Number(Number::from(value))
                }
            }
        )+
    };
}

key_from_integer!(i32, i64, u32, u64, usize);

/// Capability an item must offer to be listed in a dropdown.
pub trait OptionItem {
    /// Value of the named field, or `None` when the item has no such field or
    /// it is null.
    fn field(&self, name: &str) -> Option<Key>;

    /// Whether the item carries a non-null field with this name.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The whole item used as its own key.
    fn whole_key(&self) -> Key;

    /// Stable text serialization of the whole item.
    fn serialized(&self) -> String;

    /// Disabled items are listed but can't be selected.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Presentational class forwarded to the row.
    fn class_name(&self) -> Option<String> {
        None
    }
}

impl OptionItem for Value {
    fn field(&self, name: &str) -> Option<Key> {
        self.as_object()
            .and_then(|object| object.get(name))
            .and_then(Key::from_value)
    }

    fn whole_key(&self) -> Key {
        Key::from_value(self).unwrap_or_else(|| Key::Text(self.serialized()))
    }

    fn serialized(&self) -> String {
        // Map is ordered by key, so equal objects serialize identically.
        self.to_string()
    }

    fn is_disabled(&self) -> bool {
        self.get(DISABLED_FIELD)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn class_name(&self) -> Option<String> {
        self.get(CLASS_NAME_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl OptionItem for String {
    fn field(&self, _name: &str) -> Option<Key> {
        None
    }

    fn whole_key(&self) -> Key {
        Key::Text(self.clone())
    }

    fn serialized(&self) -> String {
        Value::String(self.clone()).to_string()
    }
}

impl OptionItem for &str {
    fn field(&self, _name: &str) -> Option<Key> {
        None
    }

    fn whole_key(&self) -> Key {
        Key::Text((*self).to_string())
    }

    fn serialized(&self) -> String {
        Value::String((*self).to_string()).to_string()
    }
}

macro_rules! integer_option_item {
    ($($ty:ty),+) => {
        $(
            impl OptionItem for $ty {
                fn field(&self, _name: &str) -> Option<Key> {
                    None
                }

                fn whole_key(&self) -> Key {
                    Key::from(*self)
                }

                fn serialized(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

integer_option_item!(i32, i64, u32, u64, usize);

/// A labelled run of items. The heading itself is not selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup<T> {
    pub label: String,
    pub class_name: Option<String>,
    pub items: Vec<T>,
}

impl<T> OptionGroup<T> {
    pub fn new(label: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            label: label.into(),
            class_name: None,
            items,
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// One entry of a possibly grouped option list.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionEntry<T> {
    Item(T),
    Group(OptionGroup<T>),
}

impl<T> OptionEntry<T> {
    pub fn item(item: T) -> Self {
        OptionEntry::Item(item)
    }

    pub fn group(label: impl Into<String>, items: Vec<T>) -> Self {
        OptionEntry::Group(OptionGroup::new(label, items))
    }
}

/// Wrap a flat list of items as ungrouped entries.
pub fn options_from_items<T>(items: impl IntoIterator<Item = T>) -> Vec<OptionEntry<T>> {
    items.into_iter().map(OptionEntry::Item).collect()
}

/// Build an option list from a JSON array.
///
/// Objects with `"isGroup": true` become groups headed by their `groupName`,
/// with members taken from `items`. Anything that isn't an array yields an
/// empty list.
pub fn options_from_json(value: &Value) -> Vec<OptionEntry<Value>> {
    let Some(entries) = value.as_array() else {
        log::warn!("Option list is not a JSON array, treating it as empty");
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| {
            let is_group = entry
                .get(GROUP_MARKER_FIELD)
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !is_group {
                return OptionEntry::Item(entry.clone());
            }

            let label = match entry.get(GROUP_NAME_FIELD) {
                Some(Value::String(name)) => name.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            let items = entry
                .get(GROUP_ITEMS_FIELD)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            OptionEntry::Group(OptionGroup {
                label,
                class_name: entry.class_name(),
                items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_lookup() {
        let item = json!({ "id": 1, "name": "A", "note": null });
        assert_eq!(item.field("id"), Some(Key::from(1)));
        assert_eq!(item.field("name"), Some(Key::from("A")));
        assert!(!item.has_field("note"));
        assert!(!item.has_field("missing"));
    }

    #[test]
    fn test_primitives_have_no_fields() {
        assert_eq!("apple".field("id"), None);
        assert_eq!(42_i64.field("id"), None);
        assert_eq!("apple".whole_key(), Key::from("apple"));
        assert_eq!(42_i64.whole_key(), Key::from(42_i64));
    }

    #[test]
    fn test_serialization_is_stable_for_equal_objects() {
        let a = json!({ "b": 2, "a": 1 });
        let b = json!({ "a": 1, "b": 2 });
        assert_eq!(a.serialized(), b.serialized());
    }

    #[test]
    fn test_disabled_and_class_name() {
        let item = json!({ "id": 3, "disabled": true, "className": "warn" });
        assert!(item.is_disabled());
        assert_eq!(item.class_name().as_deref(), Some("warn"));
        assert!(!json!({ "id": 4 }).is_disabled());
    }

    #[test]
    fn test_key_deserializes_untagged() {
        let keys: Vec<Key> = serde_json::from_str(r#"[2, "b", true]"#).unwrap();
        assert_eq!(keys, vec![Key::from(2), Key::from("b"), Key::from(true)]);
    }

    #[test]
    fn test_options_from_json_detects_groups() {
        let raw = json!([
            { "isGroup": true, "groupName": "Fruit", "className": "fruit", "items": ["apple", "pear"] },
            "bread"
        ]);
        let options = options_from_json(&raw);
        assert_eq!(options.len(), 2);
        match &options[0] {
            OptionEntry::Group(group) => {
                assert_eq!(group.label, "Fruit");
                assert_eq!(group.class_name.as_deref(), Some("fruit"));
                assert_eq!(group.items, vec![json!("apple"), json!("pear")]);
            }
            other => panic!("expected a group, got {:?}", other),
        }
        assert_eq!(options[1], OptionEntry::Item(json!("bread")));
    }

    #[test]
    fn test_options_from_json_rejects_non_arrays() {
        assert!(options_from_json(&json!({ "id": 1 })).is_empty());
    }
}
