use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;
use std::fmt;

mod flatten;
mod index;
mod validate;

pub use flatten::{FlattenedField, flatten};
pub use index::{FieldIndex, Take, normalize_identity};

use crate::document::{FieldKind, WorkflowDocument};
use crate::error::ApplyError;
use crate::updates::UpdateList;
use validate::validate_value;

/// The result of matching one update to a form field: the graph location
/// to patch and the validated value to patch it with.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOverride {
    pub node_id: String,
    pub input_name: String,
    pub value: Value,
}

/// Resolves ordered update lists against a workflow's flattened form.
///
/// A `Resolver` is created from a loaded [`WorkflowDocument`] and can be
/// used repeatedly; each [`apply`](Resolver::apply) call works on its own
/// FIFO state, so invocations never observe each other.
pub struct Resolver {
    fields: Vec<FlattenedField>,
    aliases: AHashMap<String, String>,
}

/// Builder for a [`Resolver`], allowing caller-registered identity
/// aliases on top of the form's own names and labels.
pub struct ResolverBuilder {
    fields: Vec<FlattenedField>,
    aliases: AHashMap<String, String>,
}

impl ResolverBuilder {
    pub fn new(document: &WorkflowDocument) -> Self {
        Self {
            fields: flatten(document.form()),
            aliases: AHashMap::new(),
        }
    }

    /// Registers an extra identity under which updates may address a
    /// field. Both sides are normalized, so `with_alias("W", "Width")`
    /// and `with_alias("w", "width")` are the same registration.
    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        self.aliases
            .insert(normalize_identity(alias), normalize_identity(target));
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            fields: self.fields,
            aliases: self.aliases,
        }
    }
}

impl Resolver {
    pub fn builder(document: &WorkflowDocument) -> ResolverBuilder {
        ResolverBuilder::new(document)
    }

    /// A resolver with no extra aliases.
    pub fn new(document: &WorkflowDocument) -> Self {
        Self::builder(document).build()
    }

    /// The flattened form fields, in document order.
    pub fn fields(&self) -> &[FlattenedField] {
        &self.fields
    }

    /// Resolves an ordered update list into overrides, strictly left to
    /// right.
    ///
    /// Each update consumes the oldest unconsumed form field matching its
    /// normalized identity (base name or label interchangeably), and its
    /// value is validated against that field's declared kind. Any failure
    /// aborts the whole batch — no partial override set escapes.
    ///
    /// When two updates land on the same `(node, input)` location (the
    /// same field exposed twice in the form), the later one wins at
    /// compile time.
    pub fn apply(&self, updates: &UpdateList) -> Result<Vec<ResolvedOverride>, ApplyError> {
        let mut field_index = FieldIndex::new(&self.fields);
        let mut overrides = Vec::with_capacity(updates.len());

        for (position, update) in updates.iter().enumerate() {
            let mut identity = normalize_identity(&update.key);
            if let Some(target) = self.aliases.get(&identity) {
                identity = target.clone();
            }

            let field = match field_index.take(&identity) {
                Take::Field(field_position) => &self.fields[field_position],
                Take::Exhausted { available } => {
                    return Err(ApplyError::IdentityExhausted {
                        identity,
                        position,
                        available,
                    });
                }
                Take::Unknown => {
                    return Err(ApplyError::UnknownIdentity { identity, position });
                }
            };

            validate_value(&update.key, &field.kind, &update.value)?;
            tracing::debug!(
                key = %update.key,
                node_id = %field.node_id,
                input = %field.input_name,
                form_position = field.position,
                "Resolved update",
            );

            overrides.push(ResolvedOverride {
                node_id: field.node_id.clone(),
                input_name: field.input_name.clone(),
                value: update.value.clone(),
            });
        }

        Ok(overrides)
    }

    /// Describes the form: an ordered listing of every exposed field,
    /// its kind, and its label when present.
    pub fn describe(&self) -> FormSummary {
        FormSummary {
            fields: self
                .fields
                .iter()
                .map(|field| FieldDescriptor {
                    position: field.position,
                    name: field.input_name.clone(),
                    label: field.label.clone(),
                    kind: field.kind.clone(),
                })
                .collect(),
        }
    }
}

/// An ordered listing of a form's exposed fields.
#[derive(Debug, Clone)]
pub struct FormSummary {
    fields: Vec<FieldDescriptor>,
}

/// One entry of a [`FormSummary`].
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub position: usize,
    pub name: String,
    pub label: Option<String>,
    pub kind: FieldKind,
}

impl FormSummary {
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for FormSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing = self
            .fields
            .iter()
            .map(|field| match &field.label {
                Some(label) => format!(
                    "[{}] {}: {} (label '{}')",
                    field.position, field.name, field.kind, label
                ),
                None => format!("[{}] {}: {}", field.position, field.name, field.kind),
            })
            .join("\n");
        write!(f, "{listing}")
    }
}
