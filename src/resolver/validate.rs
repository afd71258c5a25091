//! Per-kind value validation.
//!
//! The rules are strict on purpose: a mismatch is always an error, never
//! a silent coercion. Numeric strings stay strings, enum members compare
//! case-sensitively, and reference kinds demand fully-formed reference
//! objects — resolving a human-readable name into a reference happens
//! upstream of the engine.

use serde_json::Value;

use crate::document::{ElementKind, FieldKind};
use crate::error::ValidationError;

/// Validates `value` against the declared kind of the field resolved for
/// `identity` (the caller's key, used verbatim in error reports).
pub(crate) fn validate_value(
    identity: &str,
    kind: &FieldKind,
    value: &Value,
) -> Result<(), ValidationError> {
    match kind {
        FieldKind::String => expect(identity, kind, value, value.is_string()),
        FieldKind::Integer => expect(identity, kind, value, value.as_i64().is_some()),
        FieldKind::Float => expect(identity, kind, value, value.is_number()),
        FieldKind::Boolean => expect(identity, kind, value, value.is_boolean()),
        FieldKind::Enum { options } => match value.as_str() {
            // Exact, case-sensitive membership. No fuzzy matching.
            Some(member) if options.iter().any(|option| option == member) => Ok(()),
            _ => Err(ValidationError::NotInSet {
                identity: identity.to_string(),
                options: options.clone(),
                found: value.clone(),
            }),
        },
        FieldKind::Image => reference(identity, "image reference", value, is_image_ref(value)),
        FieldKind::Board => reference(identity, "board reference", value, is_board_ref(value)),
        FieldKind::Model => reference(identity, "model reference", value, is_model_ref(value)),
        FieldKind::Collection(element) => {
            let Some(elements) = value.as_array() else {
                return Err(ValidationError::KindMismatch {
                    identity: identity.to_string(),
                    expected: kind.to_string(),
                    found: value.clone(),
                });
            };
            for (index, element_value) in elements.iter().enumerate() {
                if !element_matches(*element, element_value) {
                    return Err(ValidationError::ElementMismatch {
                        identity: identity.to_string(),
                        index,
                        expected: element.to_string(),
                        found: element_value.clone(),
                    });
                }
            }
            Ok(())
        }
    }
}

fn expect(
    identity: &str,
    kind: &FieldKind,
    value: &Value,
    matches: bool,
) -> Result<(), ValidationError> {
    if matches {
        Ok(())
    } else {
        Err(ValidationError::KindMismatch {
            identity: identity.to_string(),
            expected: kind.to_string(),
            found: value.clone(),
        })
    }
}

fn reference(
    identity: &str,
    expected: &str,
    value: &Value,
    matches: bool,
) -> Result<(), ValidationError> {
    if matches {
        Ok(())
    } else {
        Err(ValidationError::MalformedReference {
            identity: identity.to_string(),
            expected: expected.to_string(),
            found: value.clone(),
        })
    }
}

fn element_matches(element: ElementKind, value: &Value) -> bool {
    match element {
        ElementKind::String => value.is_string(),
        ElementKind::Integer => value.as_i64().is_some(),
        ElementKind::Float => value.is_number(),
        ElementKind::Boolean => value.is_boolean(),
        ElementKind::Image => is_image_ref(value),
    }
}

fn is_image_ref(value: &Value) -> bool {
    value
        .get("image_name")
        .map(Value::is_string)
        .unwrap_or(false)
}

fn is_board_ref(value: &Value) -> bool {
    match value {
        // The backend's literal marker for the currently active board.
        Value::String(marker) => marker == "auto",
        Value::Object(object) => object.get("board_id").map(Value::is_string).unwrap_or(false),
        _ => false,
    }
}

fn is_model_ref(value: &Value) -> bool {
    value.get("key").map(Value::is_string).unwrap_or(false)
        && value.get("hash").map(Value::is_string).unwrap_or(false)
}
