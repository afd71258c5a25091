use ahash::AHashMap;
use serde_json::Value;
use std::fmt;

/// The user-authored linear form of a workflow: a tree of elements keyed
/// by element id, rooted at a designated container.
///
/// Containers carry ordered children and no field of their own; field
/// leaves reference exactly one `(node, input)` pair in the execution
/// graph. Decorative elements (headings, dividers) are kept as `Static`
/// entries so the tree stays closed under its children lists, but they
/// never produce a flattened field.
#[derive(Debug, Clone)]
pub struct FormTree {
    pub root_id: String,
    pub elements: AHashMap<String, FormElement>,
}

/// One element of the form tree.
#[derive(Debug, Clone)]
pub enum FormElement {
    Container(ContainerElement),
    Field(FieldLeaf),
    Static { id: String },
}

impl FormElement {
    pub fn id(&self) -> &str {
        match self {
            FormElement::Container(container) => &container.id,
            FormElement::Field(leaf) => &leaf.element_id,
            FormElement::Static { id } => id,
        }
    }
}

/// A container element: panels, columns, rows. Children are stored in
/// authored order, which is the order the linear UI renders them in.
#[derive(Debug, Clone)]
pub struct ContainerElement {
    pub id: String,
    pub children: Vec<String>,
}

/// A single addressable input exposed through the form.
#[derive(Debug, Clone)]
pub struct FieldLeaf {
    /// Id of the form element this leaf was parsed from.
    pub element_id: String,
    /// Id of the graph node the field belongs to.
    pub node_id: String,
    /// The input's base name on that node (e.g. `value`, `prompt`).
    pub field_name: String,
    /// Optional user-assigned label (e.g. `Num Steps`).
    pub label: Option<String>,
    /// The declared type/shape of the underlying input.
    pub kind: FieldKind,
}

/// The declared type/shape of a form field's underlying node input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Enumerated string with a closed, case-sensitive value set.
    Enum { options: Vec<String> },
    /// Structured image reference (`{"image_name": ...}`).
    Image,
    /// Structured board reference (`{"board_id": ...}` or the `"auto"` marker).
    Board,
    /// Structured model identifier reference.
    Model,
    /// Homogeneous collection of one element kind.
    Collection(ElementKind),
}

/// Element kinds allowed inside a collection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    String,
    Integer,
    Float,
    Boolean,
    Image,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "a string"),
            FieldKind::Integer => write!(f, "an integer"),
            FieldKind::Float => write!(f, "a number"),
            FieldKind::Boolean => write!(f, "a boolean"),
            FieldKind::Enum { .. } => write!(f, "an enumerated string"),
            FieldKind::Image => write!(f, "image reference"),
            FieldKind::Board => write!(f, "board reference"),
            FieldKind::Model => write!(f, "model reference"),
            FieldKind::Collection(element) => write!(f, "a collection of {element} elements"),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::String => write!(f, "string"),
            ElementKind::Integer => write!(f, "integer"),
            ElementKind::Float => write!(f, "number"),
            ElementKind::Boolean => write!(f, "boolean"),
            ElementKind::Image => write!(f, "image"),
        }
    }
}

impl FieldKind {
    /// Maps a declared form settings block to a field kind.
    ///
    /// Returns `None` when the settings carry no recognized type, which
    /// sends the caller down the inference path.
    pub(crate) fn from_settings(settings: &Value) -> Option<FieldKind> {
        let type_name = settings.get("type")?.as_str()?;
        match type_name {
            "string-field-config" => Some(FieldKind::String),
            "integer-field-config" => Some(FieldKind::Integer),
            "float-field-config" => Some(FieldKind::Float),
            "boolean-field-config" => Some(FieldKind::Boolean),
            "image-field-config" => Some(FieldKind::Image),
            "board-field-config" => Some(FieldKind::Board),
            "model-field-config" => Some(FieldKind::Model),
            "enum-field-config" => {
                let options = settings
                    .get("options")?
                    .as_array()?
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                Some(FieldKind::Enum { options })
            }
            "string-collection-field-config" => Some(FieldKind::Collection(ElementKind::String)),
            "integer-collection-field-config" => Some(FieldKind::Collection(ElementKind::Integer)),
            "float-collection-field-config" => Some(FieldKind::Collection(ElementKind::Float)),
            "boolean-collection-field-config" => Some(FieldKind::Collection(ElementKind::Boolean)),
            "image-collection-field-config" => Some(FieldKind::Collection(ElementKind::Image)),
            // Generic collections carry no element kind; infer it from
            // the graph default instead.
            "collection-field-config" => None,
            _ => None,
        }
    }

    /// Infers a field kind from the input's default value in the graph.
    pub(crate) fn infer_from_default(default: &Value) -> Option<FieldKind> {
        match default {
            Value::Bool(_) => Some(FieldKind::Boolean),
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    Some(FieldKind::Integer)
                } else {
                    Some(FieldKind::Float)
                }
            }
            Value::String(_) => Some(FieldKind::String),
            Value::Array(elements) => {
                let element = match elements.first() {
                    Some(Value::Bool(_)) => ElementKind::Boolean,
                    Some(Value::Number(number)) if number.is_i64() || number.is_u64() => {
                        ElementKind::Integer
                    }
                    Some(Value::Number(_)) => ElementKind::Float,
                    Some(Value::Object(object)) if object.contains_key("image_name") => {
                        ElementKind::Image
                    }
                    // Empty collections and string collections look alike.
                    _ => ElementKind::String,
                };
                Some(FieldKind::Collection(element))
            }
            Value::Object(object) => {
                if object.contains_key("image_name") {
                    Some(FieldKind::Image)
                } else if object.contains_key("board_id") {
                    Some(FieldKind::Board)
                } else if object.contains_key("hash") {
                    Some(FieldKind::Model)
                } else {
                    None
                }
            }
            Value::Null => None,
        }
    }

    /// Last-resort inference from the input's name alone.
    pub(crate) fn infer_from_name(field_name: &str) -> Option<FieldKind> {
        let lowered = field_name.to_lowercase();
        if lowered == "board" {
            Some(FieldKind::Board)
        } else if lowered == "model" || lowered.ends_with("_model") {
            Some(FieldKind::Model)
        } else {
            None
        }
    }
}
