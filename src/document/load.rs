//! Parsing and structural validation of workflow documents.
//!
//! Both accepted shapes (raw saved-workflow files and captured submission
//! requests) are projected into the same [`ExecutionGraph`] + [`FormTree`]
//! pair here. Every structural invariant — containers referencing known
//! children, field leaves referencing nodes and inputs that exist in the
//! graph — is enforced at load time, so the later pipeline stages never
//! encounter a dangling reference.

use ahash::AHashMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::form::{ContainerElement, FieldKind, FieldLeaf, FormElement, FormTree};
use super::model::{
    DocumentShape, EdgeEndpoint, ExecutionGraph, GraphEdge, GraphNode, WorkflowDocument,
};
use crate::error::DocumentError;

/// Per-node map of input labels, keyed `node id -> input name -> label`.
type LabelMap = AHashMap<String, AHashMap<String, String>>;

impl WorkflowDocument {
    /// Loads a document from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DocumentError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "Loading workflow document");
        Self::from_str(&content)
    }

    /// Parses a document from JSON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        let raw: Value = serde_json::from_str(content)
            .map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
        Self::from_value(raw)
    }

    /// Builds a document from an already-parsed JSON value, detecting its
    /// shape and validating its structure.
    pub fn from_value(raw: Value) -> Result<Self, DocumentError> {
        let shape = detect_shape(&raw)?;
        let graph = match shape {
            DocumentShape::Payload => project_payload_graph(&raw)?,
            DocumentShape::Workflow => project_workflow_graph(&raw)?,
        };
        let labels = collect_input_labels(&raw, shape);
        let form_value = form_section(&raw, shape).ok_or(DocumentError::MissingForm)?;
        let form = parse_form(form_value, &graph, &labels)?;

        let field_count = form
            .elements
            .values()
            .filter(|element| matches!(element, FormElement::Field(_)))
            .count();
        tracing::info!(
            ?shape,
            nodes = graph.nodes.len(),
            exposed_fields = field_count,
            "Workflow document loaded",
        );

        Ok(WorkflowDocument {
            raw,
            shape,
            graph,
            form,
        })
    }
}

fn detect_shape(raw: &Value) -> Result<DocumentShape, DocumentError> {
    if raw.pointer("/batch/graph").is_some() {
        return Ok(DocumentShape::Payload);
    }
    if raw.get("nodes").is_some() && raw.get("form").is_some() {
        return Ok(DocumentShape::Workflow);
    }
    Err(DocumentError::JsonParseError(
        "document is neither workflow-shaped (nodes + form) nor payload-shaped (batch.graph)"
            .to_string(),
    ))
}

/// Locates the form section for the given shape.
fn form_section(raw: &Value, shape: DocumentShape) -> Option<&Value> {
    match shape {
        DocumentShape::Workflow => raw.get("form"),
        DocumentShape::Payload => raw.pointer("/batch/workflow/form"),
    }
    .filter(|form| form.is_object())
}

/// Projects the embedded submission graph of a payload-shaped document.
fn project_payload_graph(raw: &Value) -> Result<ExecutionGraph, DocumentError> {
    // Meta keys of the flat wire object; everything else is an input.
    const RESERVED: [&str; 4] = ["id", "type", "is_intermediate", "use_cache"];

    let graph_value = raw
        .pointer("/batch/graph")
        .and_then(Value::as_object)
        .ok_or(DocumentError::MissingGraph)?;
    let nodes_value = graph_value
        .get("nodes")
        .and_then(Value::as_object)
        .ok_or(DocumentError::MissingGraph)?;

    let mut nodes = AHashMap::with_capacity(nodes_value.len());
    for (node_id, node_value) in nodes_value {
        let node_object = node_value.as_object().ok_or_else(|| {
            DocumentError::JsonParseError(format!("graph node '{node_id}' is not an object"))
        })?;
        let node_type = node_object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DocumentError::JsonParseError(format!("graph node '{node_id}' has no type"))
            })?;

        let mut inputs = Map::new();
        for (key, value) in node_object {
            if !RESERVED.contains(&key.as_str()) {
                inputs.insert(key.clone(), value.clone());
            }
        }

        nodes.insert(
            node_id.clone(),
            GraphNode {
                id: node_id.clone(),
                node_type: node_type.to_string(),
                inputs,
                is_intermediate: bool_or(node_object.get("is_intermediate"), true),
                use_cache: bool_or(node_object.get("use_cache"), true),
            },
        );
    }

    let mut edges = Vec::new();
    if let Some(edges_value) = graph_value.get("edges").and_then(Value::as_array) {
        for edge_value in edges_value {
            let endpoint = |side: &str| -> Result<EdgeEndpoint, DocumentError> {
                let node_id = edge_value
                    .pointer(&format!("/{side}/node_id"))
                    .and_then(Value::as_str);
                let field = edge_value
                    .pointer(&format!("/{side}/field"))
                    .and_then(Value::as_str);
                match (node_id, field) {
                    (Some(node_id), Some(field)) => Ok(EdgeEndpoint {
                        node_id: node_id.to_string(),
                        field: field.to_string(),
                    }),
                    _ => Err(DocumentError::JsonParseError(format!(
                        "graph edge is missing its {side} endpoint"
                    ))),
                }
            };
            edges.push(GraphEdge {
                source: endpoint("source")?,
                destination: endpoint("destination")?,
            });
        }
    }

    Ok(ExecutionGraph {
        id: graph_value
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        nodes,
        edges,
    })
}

/// Derives an execution graph from a raw saved-workflow file: each node's
/// `data.inputs.<name>.value` becomes that input's default, and the
/// editor's edge format is converted to graph-edge form.
fn project_workflow_graph(raw: &Value) -> Result<ExecutionGraph, DocumentError> {
    let nodes_value = raw
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(DocumentError::MissingGraph)?;

    let mut nodes = AHashMap::with_capacity(nodes_value.len());
    for node_value in nodes_value {
        let data = node_value.get("data").and_then(Value::as_object);
        let node_id = node_value
            .get("id")
            .and_then(Value::as_str)
            .or_else(|| data.and_then(|d| d.get("id")).and_then(Value::as_str))
            .ok_or_else(|| {
                DocumentError::JsonParseError("workflow node has no id".to_string())
            })?;
        let Some(data) = data else {
            // Editor-only nodes (notes, current-image panes) carry no data
            // section and take no part in execution.
            continue;
        };
        let node_type = data.get("type").and_then(Value::as_str).ok_or_else(|| {
            DocumentError::JsonParseError(format!("workflow node '{node_id}' has no type"))
        })?;

        let mut inputs = Map::new();
        if let Some(declared) = data.get("inputs").and_then(Value::as_object) {
            for (name, input_value) in declared {
                // Inputs without a saved value are connection-driven and
                // carry no default.
                if let Some(default) = input_value.get("value") {
                    inputs.insert(name.clone(), default.clone());
                }
            }
        }

        nodes.insert(
            node_id.to_string(),
            GraphNode {
                id: node_id.to_string(),
                node_type: node_type.to_string(),
                inputs,
                is_intermediate: bool_or(data.get("isIntermediate"), true),
                use_cache: bool_or(data.get("useCache"), true),
            },
        );
    }

    let mut edges = Vec::new();
    if let Some(edges_value) = raw.get("edges").and_then(Value::as_array) {
        for edge_value in edges_value {
            let field = |key: &str| edge_value.get(key).and_then(Value::as_str);
            match (
                field("source"),
                field("sourceHandle"),
                field("target"),
                field("targetHandle"),
            ) {
                (Some(source), Some(source_handle), Some(target), Some(target_handle)) => {
                    edges.push(GraphEdge {
                        source: EdgeEndpoint {
                            node_id: source.to_string(),
                            field: source_handle.to_string(),
                        },
                        destination: EdgeEndpoint {
                            node_id: target.to_string(),
                            field: target_handle.to_string(),
                        },
                    });
                }
                _ => {
                    return Err(DocumentError::JsonParseError(
                        "workflow edge is missing source/target handles".to_string(),
                    ));
                }
            }
        }
    }

    Ok(ExecutionGraph {
        id: None,
        nodes,
        edges,
    })
}

/// Collects user-assigned input labels from the workflow's node metadata.
fn collect_input_labels(raw: &Value, shape: DocumentShape) -> LabelMap {
    let nodes_value = match shape {
        DocumentShape::Workflow => raw.get("nodes"),
        DocumentShape::Payload => raw.pointer("/batch/workflow/nodes"),
    }
    .and_then(Value::as_array);

    let Some(nodes_value) = nodes_value else {
        tracing::warn!("Workflow node metadata is missing; field labels will not be available");
        return LabelMap::new();
    };

    let mut labels = LabelMap::new();
    for node_value in nodes_value {
        let Some(node_id) = node_value.get("id").and_then(Value::as_str) else {
            continue;
        };
        let Some(inputs) = node_value
            .pointer("/data/inputs")
            .and_then(Value::as_object)
        else {
            continue;
        };
        for (name, input_value) in inputs {
            if let Some(label) = input_value.get("label").and_then(Value::as_str)
                && !label.is_empty()
            {
                labels
                    .entry(node_id.to_string())
                    .or_default()
                    .insert(name.clone(), label.to_string());
            }
        }
    }
    labels
}

/// Parses the form section into a validated [`FormTree`].
fn parse_form(
    form_value: &Value,
    graph: &ExecutionGraph,
    labels: &LabelMap,
) -> Result<FormTree, DocumentError> {
    let elements_value = form_value
        .get("elements")
        .and_then(Value::as_object)
        .ok_or(DocumentError::MissingForm)?;
    let root_id = form_value
        .get("rootElementId")
        .and_then(Value::as_str)
        .ok_or(DocumentError::MissingForm)?;

    let mut elements = AHashMap::with_capacity(elements_value.len());
    for (element_id, element_value) in elements_value {
        let element_type = element_value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DocumentError::MalformedElement {
                element_id: element_id.clone(),
                message: "missing element type".to_string(),
            })?;

        let element = match element_type {
            "container" => {
                let children = element_value
                    .pointer("/data/children")
                    .and_then(Value::as_array)
                    .map(|children| {
                        children
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                FormElement::Container(ContainerElement {
                    id: element_id.clone(),
                    children,
                })
            }
            "node-field" => {
                FormElement::Field(parse_field_leaf(element_id, element_value, graph, labels)?)
            }
            // Headings, dividers and other decorations are structural
            // only; they stay in the tree but never flatten.
            _ => FormElement::Static {
                id: element_id.clone(),
            },
        };
        elements.insert(element_id.clone(), element);
    }

    // The root must exist and be a container.
    match elements.get(root_id) {
        Some(FormElement::Container(_)) => {}
        _ => {
            return Err(DocumentError::InvalidRootElement {
                root_id: root_id.to_string(),
            });
        }
    }

    // The tree must be closed under children lists.
    for element in elements.values() {
        if let FormElement::Container(container) = element {
            for child_id in &container.children {
                if !elements.contains_key(child_id) {
                    return Err(DocumentError::UnknownChildElement {
                        container_id: container.id.clone(),
                        child_id: child_id.clone(),
                    });
                }
            }
        }
    }

    Ok(FormTree {
        root_id: root_id.to_string(),
        elements,
    })
}

/// Parses one `node-field` element, resolving its declared kind and
/// enforcing the structural invariant against the graph.
fn parse_field_leaf(
    element_id: &str,
    element_value: &Value,
    graph: &ExecutionGraph,
    labels: &LabelMap,
) -> Result<FieldLeaf, DocumentError> {
    let node_id = element_value
        .pointer("/data/fieldIdentifier/nodeId")
        .and_then(Value::as_str)
        .ok_or_else(|| DocumentError::MalformedElement {
            element_id: element_id.to_string(),
            message: "missing fieldIdentifier.nodeId".to_string(),
        })?;
    let field_name = element_value
        .pointer("/data/fieldIdentifier/fieldName")
        .and_then(Value::as_str)
        .ok_or_else(|| DocumentError::MalformedElement {
            element_id: element_id.to_string(),
            message: "missing fieldIdentifier.fieldName".to_string(),
        })?;

    let node = graph.node(node_id).ok_or_else(|| DocumentError::NodeNotFound {
        element_id: element_id.to_string(),
        node_id: node_id.to_string(),
    })?;

    let declared = element_value
        .pointer("/data/settings")
        .and_then(FieldKind::from_settings);

    let kind = match node.input(field_name) {
        Some(default) => declared
            .or_else(|| FieldKind::infer_from_default(default))
            .or_else(|| FieldKind::infer_from_name(field_name))
            .ok_or_else(|| DocumentError::UnknownFieldKind {
                node_id: node_id.to_string(),
                field_name: field_name.to_string(),
            })?,
        None => {
            // A board input set to "Auto" is omitted from the graph node
            // entirely; overriding it inserts the key. Every other kind
            // must reference an existing input.
            let fallback = declared.or_else(|| FieldKind::infer_from_name(field_name));
            match fallback {
                Some(FieldKind::Board) => FieldKind::Board,
                _ => {
                    return Err(DocumentError::InputNotFound {
                        node_id: node_id.to_string(),
                        field_name: field_name.to_string(),
                    });
                }
            }
        }
    };

    let label = labels
        .get(node_id)
        .and_then(|node_labels| node_labels.get(field_name))
        .cloned();

    Ok(FieldLeaf {
        element_id: element_id.to_string(),
        node_id: node_id.to_string(),
        field_name: field_name.to_string(),
        label,
        kind,
    })
}

fn bool_or(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}
