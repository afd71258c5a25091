//! # Refire - Workflow Replay and Payload Compilation Engine
//!
//! **Refire** lets one generation workflow invoke another: it takes a
//! previously-saved workflow document, rewrites the inputs exposed
//! through the workflow's linear form with new values, and compiles the
//! result into the wire payload the backend's batch-enqueue endpoint
//! expects.
//!
//! ## Core Workflow
//!
//! The engine is a strictly ordered pipeline with no suspension points:
//!
//! 1.  **Load**: Parse a workflow document with [`WorkflowDocument`]. Both
//!     raw saved-workflow files and previously-captured submission
//!     requests are accepted; structural problems (a form field pointing
//!     at a missing node or input) fail here, never later.
//! 2.  **Resolve**: Build a [`Resolver`] and apply an ordered
//!     [`UpdateList`]. Updates address fields by base name or label,
//!     case/separator-insensitively; duplicate names consume same-named
//!     form fields in document order, oldest first. Every value is
//!     validated against the target field's declared kind.
//! 3.  **Compile**: [`compile`] merges the resolved overrides into the
//!     execution graph as a copy-on-write patch and wraps it in the
//!     submission envelope (run count fixed at one).
//! 4.  **Submit**: Hand the payload to a [`QueueClient`]. The bundled
//!     HTTP client performs a single blocking `POST`; it only ever runs
//!     after compilation has fully succeeded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refire::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Load a saved workflow (or a captured submission request).
//!     let document = WorkflowDocument::from_file("payloads/txt2img.json")?;
//!
//!     // See what the workflow's form exposes.
//!     let resolver = Resolver::builder(&document).build();
//!     println!("{}", resolver.describe());
//!
//!     // Updates are matched FIFO per name: labels and base names are
//!     // interchangeable, and order decides which duplicate is hit.
//!     let updates = UpdateList::builder()
//!         .string("prompt", "a cat wearing a tiny hat")
//!         .integer("Num Steps", 30)
//!         .build();
//!
//!     let overrides = resolver.apply(&updates)?;
//!     let payload = compile(&document, &overrides)?;
//!
//!     // Submission happens only after compilation fully succeeded.
//!     let client = HttpQueueClient::new("http://localhost:9090");
//!     let outcome = client.enqueue(&payload)?;
//!     println!("{}: {}", outcome.status, outcome.message);
//!     Ok(())
//! }
//! ```

#[cfg(feature = "http")]
pub mod client;
pub mod document;
pub mod error;
pub mod payload;
pub mod prelude;
pub mod resolver;
pub mod updates;

#[cfg(feature = "http")]
pub use client::{HttpQueueClient, QueueClient};
pub use document::WorkflowDocument;
pub use payload::{BatchPayload, compile};
pub use resolver::Resolver;
pub use updates::UpdateList;
