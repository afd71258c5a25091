//! The payload compiler: merges resolved overrides into a document's
//! execution graph and emits the backend's submission-ready structure.
//!
//! The compiler is a pure function of `(document, overrides)` — a
//! copy-on-write patch over new structures, never in-place mutation of
//! the loaded document. Compiling with zero overrides reproduces the
//! graph's saved input values unchanged.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::document::{DocumentShape, WorkflowDocument};
use crate::error::DocumentError;
use crate::resolver::ResolvedOverride;

/// The wire structure submitted to the backend's batch-enqueue endpoint:
/// an execution graph with overrides baked into node input values,
/// enclosed in the submission envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPayload {
    body: Value,
}

impl BatchPayload {
    pub fn as_value(&self) -> &Value {
        &self.body
    }

    pub fn into_value(self) -> Value {
        self.body
    }

    /// The embedded execution graph, for inspection.
    pub fn graph(&self) -> Option<&Value> {
        self.body.pointer("/batch/graph")
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

impl Serialize for BatchPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// Compiles a document and its resolved overrides into a submission-ready
/// payload.
///
/// Workflow-shaped documents get a freshly-built envelope: the derived
/// graph (stamped with a new id), overrides baked in, run count fixed at
/// one, no batch-data axis, and no form/UI metadata. Payload-shaped
/// documents are cloned and patched in their embedded graph only — every
/// other part of the captured envelope is left untouched.
pub fn compile(
    document: &WorkflowDocument,
    overrides: &[ResolvedOverride],
) -> Result<BatchPayload, DocumentError> {
    let body = match document.shape() {
        DocumentShape::Workflow => compile_workflow(document, overrides)?,
        DocumentShape::Payload => compile_payload(document, overrides)?,
    };
    tracing::info!(
        shape = ?document.shape(),
        overrides = overrides.len(),
        "Compiled batch payload",
    );
    Ok(BatchPayload { body })
}

fn compile_workflow(
    document: &WorkflowDocument,
    overrides: &[ResolvedOverride],
) -> Result<Value, DocumentError> {
    let graph = document.graph();

    let mut node_objects = Map::new();
    for (node_id, node) in &graph.nodes {
        node_objects.insert(node_id.clone(), Value::Object(node.wire_object()));
    }
    patch_nodes(&mut node_objects, overrides)?;

    let edges: Vec<Value> = graph.edges.iter().map(|edge| edge.wire_object()).collect();

    // Every submission gets its own graph id.
    let graph_id = Uuid::new_v4().to_string();

    Ok(json!({
        "prepend": false,
        "batch": {
            "graph": {
                "id": graph_id,
                "nodes": node_objects,
                "edges": edges,
            },
            "runs": 1,
        },
    }))
}

fn compile_payload(
    document: &WorkflowDocument,
    overrides: &[ResolvedOverride],
) -> Result<Value, DocumentError> {
    let mut body = document.raw().clone();
    let nodes = body
        .pointer_mut("/batch/graph/nodes")
        .and_then(Value::as_object_mut)
        .ok_or(DocumentError::MissingGraph)?;
    patch_nodes(nodes, overrides)?;
    Ok(body)
}

/// Applies overrides to a map of wire node objects, in order — when two
/// overrides target the same location, the later write wins. Inserting a
/// previously absent key is deliberate: board inputs set to "Auto" are
/// omitted from the saved graph and materialize here.
fn patch_nodes(
    nodes: &mut Map<String, Value>,
    overrides: &[ResolvedOverride],
) -> Result<(), DocumentError> {
    for patch in overrides {
        let node_object = nodes
            .get_mut(&patch.node_id)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| DocumentError::OverrideTargetMissing {
                node_id: patch.node_id.clone(),
            })?;
        node_object.insert(patch.input_name.clone(), patch.value.clone());
    }
    Ok(())
}
