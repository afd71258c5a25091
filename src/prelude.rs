//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the refire crate. Import
//! this module to get access to the whole pipeline without importing
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use refire::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = WorkflowDocument::from_file("payloads/upscale.json")?;
//! let resolver = Resolver::new(&document);
//!
//! let updates = UpdateList::from_json(r#"[{"seed": 42}, {"prompt": "dusk"}]"#)?;
//! let overrides = resolver.apply(&updates)?;
//! let payload = compile(&document, &overrides)?;
//!
//! println!("{}", payload.to_pretty_string());
//! # Ok(())
//! # }
//! ```

// Document model and loading
pub use crate::document::{
    BoardRef, DocumentShape, ElementKind, ExecutionGraph, FieldKind, FieldLeaf, FormElement,
    FormTree, GraphNode, ImageRef, ModelRef, WorkflowDocument,
};

// Form resolution
pub use crate::resolver::{
    FieldDescriptor, FlattenedField, FormSummary, ResolvedOverride, Resolver, ResolverBuilder,
    flatten, normalize_identity,
};

// Update lists
pub use crate::updates::{FieldUpdate, UpdateList, UpdateListBuilder};

// Payload compilation
pub use crate::payload::{BatchPayload, compile};

// Submission transport
#[cfg(feature = "http")]
pub use crate::client::{HttpQueueClient, QueueClient, SubmitOutcome, SubmitStatus};

// Error types
#[cfg(feature = "http")]
pub use crate::error::SubmitError;
pub use crate::error::{ApplyError, DocumentError, UpdateParseError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
