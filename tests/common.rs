//! Common test utilities for building workflow documents and update lists.
use refire::prelude::*;
use serde_json::{Value, json};

/// Loads a fixture JSON value into a validated document.
#[allow(dead_code)]
pub fn document(value: Value) -> WorkflowDocument {
    WorkflowDocument::from_value(value).expect("fixture document should load")
}

/// A small workflow-shaped document.
///
/// Graph: a prompt node, a width primitive feeding a noise node. The form
/// exposes `prompt` (labeled "Main Prompt") and the width primitive's
/// `value` input (labeled "Width"), separated by a heading element.
#[allow(dead_code)]
pub fn simple_workflow_json() -> Value {
    json!({
        "name": "txt2img small",
        "meta": { "version": "3.0.0", "category": "user" },
        "nodes": [
            {
                "id": "positive_prompt",
                "type": "invocation",
                "data": {
                    "id": "positive_prompt",
                    "type": "compel",
                    "version": "1.2.0",
                    "inputs": {
                        "prompt": { "name": "prompt", "label": "Main Prompt", "value": "a serene lake" }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            },
            {
                "id": "width_node",
                "type": "invocation",
                "data": {
                    "id": "width_node",
                    "type": "integer",
                    "version": "1.0.1",
                    "inputs": {
                        "value": { "name": "value", "label": "Width", "value": 1024 }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            },
            {
                "id": "noise_node",
                "type": "invocation",
                "data": {
                    "id": "noise_node",
                    "type": "noise",
                    "version": "1.0.2",
                    "inputs": {
                        "seed": { "name": "seed", "label": "", "value": 0 },
                        "height": { "name": "height", "label": "", "value": 1024 }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            }
        ],
        "edges": [
            {
                "source": "width_node",
                "sourceHandle": "value",
                "target": "noise_node",
                "targetHandle": "width"
            }
        ],
        "form": {
            "rootElementId": "root",
            "elements": {
                "root": {
                    "id": "root",
                    "type": "container",
                    "data": { "layout": "column", "children": ["field_prompt", "heading_size", "field_width"] }
                },
                "heading_size": {
                    "id": "heading_size",
                    "type": "heading",
                    "data": { "content": "Size" }
                },
                "field_prompt": {
                    "id": "field_prompt",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "positive_prompt", "fieldName": "prompt" },
                        "settings": { "type": "string-field-config" }
                    }
                },
                "field_width": {
                    "id": "field_width",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "width_node", "fieldName": "value" },
                        "settings": { "type": "integer-field-config" }
                    }
                }
            }
        }
    })
}

/// A workflow whose form exposes two integer primitives that both use the
/// default base name `value`, in document order A then B. B carries the
/// label "Num Steps".
#[allow(dead_code)]
pub fn duplicate_value_workflow_json() -> Value {
    json!({
        "name": "two primitives",
        "nodes": [
            {
                "id": "int_a",
                "type": "invocation",
                "data": {
                    "id": "int_a",
                    "type": "integer",
                    "inputs": { "value": { "name": "value", "label": "", "value": 7 } },
                    "isIntermediate": true,
                    "useCache": true
                }
            },
            {
                "id": "int_b",
                "type": "invocation",
                "data": {
                    "id": "int_b",
                    "type": "integer",
                    "inputs": { "value": { "name": "value", "label": "Num Steps", "value": 20 } },
                    "isIntermediate": true,
                    "useCache": true
                }
            }
        ],
        "edges": [],
        "form": {
            "rootElementId": "root",
            "elements": {
                "root": {
                    "id": "root",
                    "type": "container",
                    "data": { "children": ["field_a", "field_b"] }
                },
                "field_a": {
                    "id": "field_a",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "int_a", "fieldName": "value" },
                        "settings": { "type": "integer-field-config" }
                    }
                },
                "field_b": {
                    "id": "field_b",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "int_b", "fieldName": "value" },
                        "settings": { "type": "integer-field-config" }
                    }
                }
            }
        }
    })
}

/// A workflow exposing one `num_steps` integer field and one enumerated
/// `scheduler` field with a lowercase value set.
#[allow(dead_code)]
pub fn sampler_workflow_json() -> Value {
    json!({
        "name": "sampler settings",
        "nodes": [
            {
                "id": "sampler_node",
                "type": "invocation",
                "data": {
                    "id": "sampler_node",
                    "type": "denoise_latents",
                    "inputs": {
                        "num_steps": { "name": "num_steps", "label": "", "value": 30 },
                        "scheduler": { "name": "scheduler", "label": "", "value": "euler" }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            }
        ],
        "edges": [],
        "form": {
            "rootElementId": "root",
            "elements": {
                "root": {
                    "id": "root",
                    "type": "container",
                    "data": { "children": ["field_steps", "field_scheduler"] }
                },
                "field_steps": {
                    "id": "field_steps",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "sampler_node", "fieldName": "num_steps" },
                        "settings": { "type": "integer-field-config" }
                    }
                },
                "field_scheduler": {
                    "id": "field_scheduler",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "sampler_node", "fieldName": "scheduler" },
                        "settings": { "type": "enum-field-config", "options": ["euler", "ddpm", "lms"] }
                    }
                }
            }
        }
    })
}

/// A workflow exercising the reference and collection kinds: an image
/// input, a board input omitted from the node (saved as "Auto"), a model
/// input, and a string collection. The collection field declares no
/// settings, so its kind is inferred from the saved default.
#[allow(dead_code)]
pub fn reference_workflow_json() -> Value {
    json!({
        "name": "references",
        "nodes": [
            {
                "id": "load_image",
                "type": "invocation",
                "data": {
                    "id": "load_image",
                    "type": "image",
                    "inputs": {
                        "image": { "name": "image", "label": "", "value": { "image_name": "seed.png" } }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            },
            {
                "id": "save_image",
                "type": "invocation",
                "data": {
                    "id": "save_image",
                    "type": "save_image",
                    "inputs": {
                        "board": { "name": "board", "label": "" }
                    },
                    "isIntermediate": false,
                    "useCache": false
                }
            },
            {
                "id": "main_model",
                "type": "invocation",
                "data": {
                    "id": "main_model",
                    "type": "main_model_loader",
                    "inputs": {
                        "model": {
                            "name": "model",
                            "label": "",
                            "value": { "key": "abc123", "hash": "blake3:aaaa", "name": "base-xl", "base": "sdxl", "type": "main" }
                        }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            },
            {
                "id": "prompt_list",
                "type": "invocation",
                "data": {
                    "id": "prompt_list",
                    "type": "string_collection",
                    "inputs": {
                        "collection": { "name": "collection", "label": "", "value": ["dawn", "dusk"] }
                    },
                    "isIntermediate": true,
                    "useCache": true
                }
            }
        ],
        "edges": [],
        "form": {
            "rootElementId": "root",
            "elements": {
                "root": {
                    "id": "root",
                    "type": "container",
                    "data": { "children": ["field_image", "field_board", "field_model", "field_collection"] }
                },
                "field_image": {
                    "id": "field_image",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "load_image", "fieldName": "image" },
                        "settings": { "type": "image-field-config" }
                    }
                },
                "field_board": {
                    "id": "field_board",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "save_image", "fieldName": "board" },
                        "settings": { "type": "board-field-config" }
                    }
                },
                "field_model": {
                    "id": "field_model",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "main_model", "fieldName": "model" },
                        "settings": { "type": "model-field-config" }
                    }
                },
                "field_collection": {
                    "id": "field_collection",
                    "type": "node-field",
                    "data": {
                        "fieldIdentifier": { "nodeId": "prompt_list", "fieldName": "collection" }
                    }
                }
            }
        }
    })
}

/// A payload-shaped document: the same prompt/width graph as
/// [`simple_workflow_json`], captured as a submission request.
#[allow(dead_code)]
pub fn payload_document_json() -> Value {
    json!({
        "prepend": false,
        "batch": {
            "graph": {
                "id": "graph-000",
                "nodes": {
                    "positive_prompt": {
                        "id": "positive_prompt",
                        "type": "compel",
                        "is_intermediate": true,
                        "use_cache": true,
                        "prompt": "a serene lake"
                    },
                    "width_node": {
                        "id": "width_node",
                        "type": "integer",
                        "is_intermediate": true,
                        "use_cache": true,
                        "value": 1024
                    }
                },
                "edges": [
                    {
                        "source": { "node_id": "width_node", "field": "value" },
                        "destination": { "node_id": "positive_prompt", "field": "width" }
                    }
                ]
            },
            "workflow": {
                "name": "txt2img small",
                "nodes": [
                    {
                        "id": "positive_prompt",
                        "data": {
                            "inputs": {
                                "prompt": { "name": "prompt", "label": "Main Prompt", "value": "a serene lake" }
                            }
                        }
                    },
                    {
                        "id": "width_node",
                        "data": {
                            "inputs": {
                                "value": { "name": "value", "label": "Width", "value": 1024 }
                            }
                        }
                    }
                ],
                "form": {
                    "rootElementId": "root",
                    "elements": {
                        "root": {
                            "id": "root",
                            "type": "container",
                            "data": { "children": ["field_prompt", "field_width"] }
                        },
                        "field_prompt": {
                            "id": "field_prompt",
                            "type": "node-field",
                            "data": {
                                "fieldIdentifier": { "nodeId": "positive_prompt", "fieldName": "prompt" },
                                "settings": { "type": "string-field-config" }
                            }
                        },
                        "field_width": {
                            "id": "field_width",
                            "type": "node-field",
                            "data": {
                                "fieldIdentifier": { "nodeId": "width_node", "fieldName": "value" },
                                "settings": { "type": "integer-field-config" }
                            }
                        }
                    }
                }
            },
            "runs": 1
        }
    })
}
