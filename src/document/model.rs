use ahash::AHashMap;
use serde_json::{Map, Value, json};

use super::form::FormTree;

/// The two accepted shapes of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// A raw saved-workflow file: node list, edge list, form.
    Workflow,
    /// A previously-captured submission request with the graph embedded
    /// in its envelope.
    Payload,
}

/// A saved workflow document, parsed and structurally validated.
///
/// Holds the raw JSON (payload-shaped documents are patched as a
/// copy-on-write clone of it at compile time) alongside the projected
/// execution graph and form tree the engine operates on. Immutable once
/// loaded; every pipeline stage produces new structures.
#[derive(Debug, Clone)]
pub struct WorkflowDocument {
    pub(crate) raw: Value,
    pub(crate) shape: DocumentShape,
    pub(crate) graph: ExecutionGraph,
    pub(crate) form: FormTree,
}

impl WorkflowDocument {
    pub fn shape(&self) -> DocumentShape {
        self.shape
    }

    pub fn graph(&self) -> &ExecutionGraph {
        &self.graph
    }

    pub fn form(&self) -> &FormTree {
        &self.form
    }

    /// The document as originally parsed.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// The execution graph: nodes keyed by stable id, each holding its
/// declared inputs with their saved default values, plus edges.
#[derive(Debug, Clone, Default)]
pub struct ExecutionGraph {
    /// Graph id, when the source document carried one.
    pub id: Option<String>,
    pub nodes: AHashMap<String, GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ExecutionGraph {
    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.get(node_id)
    }
}

/// One node of the execution graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub node_type: String,
    /// Declared inputs and their saved default values.
    pub inputs: Map<String, Value>,
    pub is_intermediate: bool,
    pub use_cache: bool,
}

impl GraphNode {
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }

    /// Serializes the node into the backend's flat wire object: meta keys
    /// first, then one key per input.
    pub(crate) fn wire_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.insert("type".to_string(), Value::String(self.node_type.clone()));
        object.insert("is_intermediate".to_string(), Value::Bool(self.is_intermediate));
        object.insert("use_cache".to_string(), Value::Bool(self.use_cache));
        for (name, value) in &self.inputs {
            object.insert(name.clone(), value.clone());
        }
        object
    }
}

/// One connection of the execution graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: EdgeEndpoint,
    pub destination: EdgeEndpoint,
}

impl GraphEdge {
    pub(crate) fn wire_object(&self) -> Value {
        json!({
            "source": { "node_id": self.source.node_id, "field": self.source.field },
            "destination": { "node_id": self.destination.node_id, "field": self.destination.field },
        })
    }
}

/// One end of a graph edge: a node and one of its output/input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeEndpoint {
    pub node_id: String,
    pub field: String,
}
