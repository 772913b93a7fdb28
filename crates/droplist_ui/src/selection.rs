//! Key and label resolution over option lists.

use crate::item::{Key, OptionEntry, OptionGroup, OptionItem};

/// One row of a flattened option list.
#[derive(Debug, PartialEq)]
pub enum FlatEntry<'a, T> {
    /// Non-selectable group heading.
    Heading(&'a OptionGroup<T>),
    /// Selectable item.
    Item(&'a T),
}

impl<'a, T> FlatEntry<'a, T> {
    pub fn is_heading(&self) -> bool {
        matches!(self, FlatEntry::Heading(_))
    }

    pub fn item(&self) -> Option<&'a T> {
        match self {
            FlatEntry::Item(item) => Some(item),
            FlatEntry::Heading(_) => None,
        }
    }
}

// Manual impls: derives would require `T: Clone`.
impl<T> Clone for FlatEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FlatEntry<'_, T> {}

/// The resolved current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub key: Key,
    pub label: String,
}

/// Resolves items to keys and labels according to the configured field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    key_field: Option<String>,
    label_field: Option<String>,
}

impl SelectionModel {
    /// A blank field name means the field isn't configured.
    pub fn new(key_field: &str, label_field: &str) -> Self {
        Self {
            key_field: configured(key_field),
            label_field: configured(label_field),
        }
    }

    pub fn key_field(&self) -> Option<&str> {
        self.key_field.as_deref()
    }

    pub fn label_field(&self) -> Option<&str> {
        self.label_field.as_deref()
    }

    /// Key of an item. Never fails: without a key field the whole item is the
    /// key, and an item missing its key field falls back to its serialization.
    pub fn resolve_key<T: OptionItem>(&self, item: &T) -> Key {
        let Some(key_field) = self.key_field.as_deref() else {
            return item.whole_key();
        };
        item.field(key_field)
            .unwrap_or_else(|| Key::Text(item.serialized()))
    }

    /// Display label of an item: label field, then key field, then the
    /// serialization. Without a key field the item is its own label.
    pub fn resolve_label<T: OptionItem>(&self, item: &T) -> String {
        let Some(key_field) = self.key_field.as_deref() else {
            return item.whole_key().to_string();
        };
        self.label_field
            .as_deref()
            .and_then(|label_field| item.field(label_field))
            .or_else(|| item.field(key_field))
            .map(|key| key.to_string())
            .unwrap_or_else(|| item.serialized())
    }

    /// Walk the option list in order, emitting a heading before each group's members.
    pub fn flatten<T>(options: &[OptionEntry<T>]) -> Vec<FlatEntry<'_, T>> {
        let mut rows = Vec::with_capacity(options.len());
        for entry in options {
            match entry {
                OptionEntry::Item(item) => rows.push(FlatEntry::Item(item)),
                OptionEntry::Group(group) => {
                    rows.push(FlatEntry::Heading(group));
                    rows.extend(group.items.iter().map(FlatEntry::Item));
                }
            }
        }
        rows
    }

    /// First selectable item whose resolved key equals `key`.
    pub fn find<'a, T: OptionItem>(&self, options: &'a [OptionEntry<T>], key: &Key) -> Option<&'a T> {
        Self::flatten(options)
            .into_iter()
            .filter_map(|entry| entry.item())
            .find(|item| self.resolve_key(*item) == *key)
    }

    /// Resolve a controlled value against the option list. A missing value or
    /// one that matches no item resolves to no selection.
    pub fn resolve_selection<T: OptionItem>(
        &self,
        options: &[OptionEntry<T>],
        value: Option<&Key>,
    ) -> Option<Selection> {
        let item = self.find(options, value?)?;
        Some(self.selection_for(item))
    }

    /// Selection describing `item`.
    pub fn selection_for<T: OptionItem>(&self, item: &T) -> Selection {
        Selection {
            key: self.resolve_key(item),
            label: self.resolve_label(item),
        }
    }
}

fn configured(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
