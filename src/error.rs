use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading and structurally validating a
/// workflow document.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to parse workflow document JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to read workflow document '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Workflow document does not contain a form section")]
    MissingForm,

    #[error("Workflow document does not contain an execution graph")]
    MissingGraph,

    #[error("Form root element '{root_id}' not found or is not a container")]
    InvalidRootElement { root_id: String },

    #[error("Container '{container_id}' references unknown child element '{child_id}'")]
    UnknownChildElement {
        container_id: String,
        child_id: String,
    },

    #[error("Form element '{element_id}' is malformed: {message}")]
    MalformedElement { element_id: String, message: String },

    #[error(
        "Form field '{element_id}' references node '{node_id}', which does not exist in the execution graph"
    )]
    NodeNotFound { element_id: String, node_id: String },

    #[error("Node '{node_id}' has no input named '{field_name}'")]
    InputNotFound { node_id: String, field_name: String },

    #[error(
        "Cannot determine the kind of field '{field_name}' on node '{node_id}': no declared settings type and no usable default value"
    )]
    UnknownFieldKind { node_id: String, field_name: String },

    #[error("Override targets node '{node_id}', which does not exist in the execution graph")]
    OverrideTargetMissing { node_id: String },
}

/// Errors that can occur while parsing an ordered update list.
#[derive(Error, Debug, Clone)]
pub enum UpdateParseError {
    #[error("Failed to parse update list JSON: {0}")]
    JsonParseError(String),

    #[error("Expected a JSON array of updates, but found {found}")]
    NotAnArray { found: String },

    #[error("Update at position {position} must be a JSON object, but found {found}")]
    EntryNotObject { position: usize, found: String },

    #[error(
        "Update at position {position} must contain exactly one key-value pair, but contains {key_count}"
    )]
    EntryNotSingleKey { position: usize, key_count: usize },
}

/// Errors that can occur while resolving updates against the form's
/// flattened fields.
#[derive(Error, Debug, Clone)]
pub enum ApplyError {
    #[error(
        "Update at position {position} names field '{identity}', which is not exposed by the workflow's form"
    )]
    UnknownIdentity { identity: String, position: usize },

    #[error(
        "Too many updates for field '{identity}': all {available} matching form fields were already assigned when the update at position {position} was processed"
    )]
    IdentityExhausted {
        identity: String,
        position: usize,
        available: usize,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors that can occur while validating an update's value against the
/// target field's declared kind.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Field '{identity}' expects {expected}, but received value '{found}'")]
    KindMismatch {
        identity: String,
        expected: String,
        found: Value,
    },

    #[error("Field '{identity}' expects one of {options:?}, but received '{found}'")]
    NotInSet {
        identity: String,
        options: Vec<String>,
        found: Value,
    },

    #[error(
        "Element {index} of collection field '{identity}' expects {expected}, but received '{found}'"
    )]
    ElementMismatch {
        identity: String,
        index: usize,
        expected: String,
        found: Value,
    },

    #[error(
        "Field '{identity}' expects a fully-formed {expected}, but received '{found}' (name-to-reference resolution happens upstream of the engine)"
    )]
    MalformedReference {
        identity: String,
        expected: String,
        found: Value,
    },
}

/// Errors surfaced by the submission transport.
#[cfg(feature = "http")]
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Queue endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },
}
