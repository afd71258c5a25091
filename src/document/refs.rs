use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A fully-formed image reference, as the backend stores it on a node
/// input. The engine never resolves a bare image name into one of these;
/// that resolution happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image_name: String,
}

impl ImageRef {
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
        }
    }
}

impl From<&ImageRef> for Value {
    fn from(image: &ImageRef) -> Value {
        json!({ "image_name": image.image_name })
    }
}

/// A board reference: either a concrete board id or the backend's literal
/// marker for "whichever board is currently active".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardRef {
    Auto,
    Board(String),
}

impl BoardRef {
    pub fn board(board_id: impl Into<String>) -> Self {
        BoardRef::Board(board_id.into())
    }
}

impl From<&BoardRef> for Value {
    fn from(board: &BoardRef) -> Value {
        match board {
            BoardRef::Auto => Value::String("auto".to_string()),
            BoardRef::Board(board_id) => json!({ "board_id": board_id }),
        }
    }
}

/// A model identifier reference. `key` and `hash` are what the backend
/// requires to locate the model; the remaining fields are carried along
/// when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub key: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

impl ModelRef {
    pub fn new(key: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            hash: hash.into(),
            name: None,
            base: None,
            model_type: None,
        }
    }
}

impl From<&ModelRef> for Value {
    fn from(model: &ModelRef) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("key".to_string(), Value::String(model.key.clone()));
        object.insert("hash".to_string(), Value::String(model.hash.clone()));
        if let Some(name) = &model.name {
            object.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(base) = &model.base {
            object.insert("base".to_string(), Value::String(base.clone()));
        }
        if let Some(model_type) = &model.model_type {
            object.insert("type".to_string(), Value::String(model_type.clone()));
        }
        Value::Object(object)
    }
}
