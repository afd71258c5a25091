//! The ordered update list: what callers supply to rewrite a form.
//!
//! An update list is an append-only sequence of single-key entries; the
//! order is semantically significant, because updates sharing a name
//! consume same-named form fields oldest-first. Lists can be parsed from
//! a JSON array of single-key objects or built incrementally through
//! [`UpdateListBuilder`] — the FIFO-matching engine is agnostic to how
//! the list was produced.

use serde_json::Value;

use crate::document::{BoardRef, ImageRef, ModelRef};
use crate::error::UpdateParseError;

/// One entry of the ordered update list: a field identity (base name or
/// label) and the new value for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub key: String,
    pub value: Value,
}

impl FieldUpdate {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An ordered list of field updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateList {
    entries: Vec<FieldUpdate>,
}

impl UpdateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> UpdateListBuilder {
        UpdateListBuilder {
            list: UpdateList::new(),
        }
    }

    /// Parses a list from JSON text. A blank string is the empty list;
    /// anything else must be an array of single-key objects.
    pub fn from_json(text: &str) -> Result<Self, UpdateParseError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_json::from_str(text)
            .map_err(|e| UpdateParseError::JsonParseError(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Builds a list from an already-parsed JSON array of single-key
    /// objects.
    pub fn from_value(value: &Value) -> Result<Self, UpdateParseError> {
        let entries_value = value.as_array().ok_or_else(|| UpdateParseError::NotAnArray {
            found: json_type_name(value).to_string(),
        })?;

        let mut entries = Vec::with_capacity(entries_value.len());
        for (position, entry_value) in entries_value.iter().enumerate() {
            let object = entry_value
                .as_object()
                .ok_or_else(|| UpdateParseError::EntryNotObject {
                    position,
                    found: json_type_name(entry_value).to_string(),
                })?;
            if object.len() != 1 {
                return Err(UpdateParseError::EntryNotSingleKey {
                    position,
                    key_count: object.len(),
                });
            }
            // Exactly one pair, just checked.
            for (key, entry) in object {
                entries.push(FieldUpdate::new(key.clone(), entry.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Concatenates two lists, `first` entries before `second` entries.
    pub fn join(first: Self, second: Self) -> Self {
        let mut entries = first.entries;
        entries.extend(second.entries);
        Self { entries }
    }

    pub fn push(&mut self, update: FieldUpdate) {
        self.entries.push(update);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldUpdate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the list back into its wire form: a JSON array of
    /// single-key objects.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .map(|update| {
                    let mut object = serde_json::Map::new();
                    object.insert(update.key.clone(), update.value.clone());
                    Value::Object(object)
                })
                .collect(),
        )
    }
}

impl FromIterator<FieldUpdate> for UpdateList {
    fn from_iter<I: IntoIterator<Item = FieldUpdate>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Incremental builder for an [`UpdateList`], one typed append method per
/// value family.
pub struct UpdateListBuilder {
    list: UpdateList,
}

/// Defines the typed append methods whose values convert straight into
/// JSON.
macro_rules! typed_entries {
    ( $( ($method:ident, $value_type:ty) ),* $(,)? ) => {
        $(
            /// Appends one update carrying this value family.
            pub fn $method(self, name: impl Into<String>, value: $value_type) -> Self {
                self.entry(name, Value::from(value))
            }
        )*
    };
}

impl UpdateListBuilder {
    typed_entries! {
        (string, &str),
        (integer, i64),
        (float, f64),
        (boolean, bool),
        (strings, Vec<String>),
        (integers, Vec<i64>),
        (floats, Vec<f64>),
        (booleans, Vec<bool>),
    }

    /// Appends one update carrying an image reference.
    pub fn image(self, name: impl Into<String>, image: &ImageRef) -> Self {
        self.entry(name, Value::from(image))
    }

    /// Appends one update carrying a collection of image references.
    pub fn images<'a>(
        self,
        name: impl Into<String>,
        images: impl IntoIterator<Item = &'a ImageRef>,
    ) -> Self {
        let collection = images.into_iter().map(Value::from).collect::<Vec<_>>();
        self.entry(name, Value::Array(collection))
    }

    /// Appends one update carrying a board reference.
    pub fn board(self, name: impl Into<String>, board: &BoardRef) -> Self {
        self.entry(name, Value::from(board))
    }

    /// Appends one update carrying a model reference.
    pub fn model(self, name: impl Into<String>, model: &ModelRef) -> Self {
        self.entry(name, Value::from(model))
    }

    /// Appends one update carrying an arbitrary JSON value.
    pub fn entry(mut self, name: impl Into<String>, value: Value) -> Self {
        self.list.push(FieldUpdate::new(name, value));
        self
    }

    pub fn build(self) -> UpdateList {
        self.list
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
