use ahash::AHashMap;
use std::collections::VecDeque;

use super::flatten::FlattenedField;

/// Normalizes a field identity for matching: lowercased, with runs of
/// the separator characters (space, underscore, hyphen) collapsed to a
/// single space and stripped from the ends.
///
/// Two identities are equivalent iff their normalized forms are equal.
/// No other punctuation is touched.
pub fn normalize_identity(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for character in raw.chars() {
        if character == ' ' || character == '_' || character == '-' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !normalized.is_empty() {
            normalized.push(' ');
        }
        pending_separator = false;
        for lowered in character.to_lowercase() {
            normalized.push(lowered);
        }
    }
    normalized
}

/// The outcome of asking the index for the next field under an identity.
#[derive(Debug, PartialEq, Eq)]
pub enum Take {
    /// Position of the oldest unconsumed field under that identity.
    Field(usize),
    /// The identity exists but all its fields were already consumed;
    /// carries how many fields the identity had in total.
    Exhausted { available: usize },
    /// The identity does not appear in the form at all.
    Unknown,
}

/// Per-identity FIFO queues over a flattened field sequence.
///
/// A field is indexed under its base-name identity and, when a label is
/// present and normalizes differently, under its label identity as well.
/// Both queues hold the same underlying position, and a shared claim set
/// guarantees that consuming a field through one identity removes it
/// from the other.
#[derive(Debug)]
pub struct FieldIndex {
    queues: AHashMap<String, VecDeque<usize>>,
    /// How many fields each identity indexed in total, for error reports.
    totals: AHashMap<String, usize>,
    claimed: Vec<bool>,
}

impl FieldIndex {
    pub fn new(fields: &[FlattenedField]) -> Self {
        let mut queues: AHashMap<String, VecDeque<usize>> = AHashMap::new();
        for field in fields {
            let base = normalize_identity(&field.input_name);
            queues.entry(base.clone()).or_default().push_back(field.position);
            if let Some(label) = &field.label {
                let alias = normalize_identity(label);
                if alias != base {
                    queues.entry(alias).or_default().push_back(field.position);
                }
            }
        }
        let totals = queues
            .iter()
            .map(|(identity, queue)| (identity.clone(), queue.len()))
            .collect();
        Self {
            queues,
            totals,
            claimed: vec![false; fields.len()],
        }
    }

    /// Pops the oldest unconsumed field indexed under `identity`, which
    /// must already be normalized.
    pub fn take(&mut self, identity: &str) -> Take {
        let Some(queue) = self.queues.get_mut(identity) else {
            return Take::Unknown;
        };
        while let Some(position) = queue.pop_front() {
            if !self.claimed[position] {
                self.claimed[position] = true;
                return Take::Field(position);
            }
        }
        Take::Exhausted {
            available: self.totals.get(identity).copied().unwrap_or(0),
        }
    }
}
