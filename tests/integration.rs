//! End-to-end tests: load, resolve, compile, and hand off to a transport.
mod common;
use common::*;
use refire::prelude::*;
use serde_json::{Value, json};
use std::result::Result;
use std::cell::RefCell;

#[test]
fn test_end_to_end_prompt_and_width_scenario() {
    // A two-field form [prompt: string, width: integer] where the width
    // field's base name is the primitive default `value`.
    let document = document(simple_workflow_json());
    let resolver = Resolver::new(&document);

    let updates = UpdateList::from_json(r#"[{"prompt": "a cat"}, {"value": 512}]"#).unwrap();
    let overrides = resolver.apply(&updates).unwrap();
    let payload = compile(&document, &overrides).unwrap();

    let nodes = &payload.as_value()["batch"]["graph"]["nodes"];
    assert_eq!(nodes["positive_prompt"]["prompt"], json!("a cat"));
    assert_eq!(nodes["width_node"]["value"], json!(512));
    // Every other node input equals its saved default.
    assert_eq!(nodes["noise_node"]["seed"], json!(0));
    assert_eq!(nodes["noise_node"]["height"], json!(1024));
    assert_eq!(payload.as_value()["batch"]["runs"], json!(1));
}

#[test]
fn test_end_to_end_replaying_a_captured_submission() {
    let document = document(payload_document_json());
    let resolver = Resolver::new(&document);

    // Labels address the same fields as base names.
    let updates = UpdateList::builder()
        .string("Main Prompt", "a lighthouse at dawn")
        .integer("Width", 768)
        .build();
    let overrides = resolver.apply(&updates).unwrap();
    let payload = compile(&document, &overrides).unwrap();

    let nodes = &payload.as_value()["batch"]["graph"]["nodes"];
    assert_eq!(
        nodes["positive_prompt"]["prompt"],
        json!("a lighthouse at dawn")
    );
    assert_eq!(nodes["width_node"]["value"], json!(768));
}

#[test]
fn test_resolution_failure_prevents_any_submission() {
    let document = document(sampler_workflow_json());
    let resolver = Resolver::new(&document);

    let updates = UpdateList::from_json(r#"[{"num_steps": 10}, {"bogus": 1}]"#).unwrap();
    // The whole batch aborts; no override set (and thus no payload) is
    // ever produced for a partially-resolved update list.
    assert!(resolver.apply(&updates).is_err());
}

/// A transport double that records what it was asked to enqueue.
struct RecordingClient {
    seen: RefCell<Option<Value>>,
}

impl QueueClient for RecordingClient {
    fn enqueue(&self, payload: &BatchPayload) -> Result<SubmitOutcome, SubmitError> {
        *self.seen.borrow_mut() = Some(payload.as_value().clone());
        Ok(SubmitOutcome {
            status: SubmitStatus::Success,
            message: "queued as item 17".to_string(),
        })
    }
}

#[test]
fn test_compiled_payload_is_handed_to_the_transport_verbatim() {
    let document = document(simple_workflow_json());
    let resolver = Resolver::new(&document);
    let updates = UpdateList::builder().integer("value", 640).build();
    let overrides = resolver.apply(&updates).unwrap();
    let payload = compile(&document, &overrides).unwrap();

    let client = RecordingClient {
        seen: RefCell::new(None),
    };
    let outcome = client.enqueue(&payload).unwrap();

    assert_eq!(outcome.status, SubmitStatus::Success);
    assert_eq!(outcome.message, "queued as item 17");
    assert_eq!(client.seen.borrow().as_ref(), Some(payload.as_value()));
}

#[test]
fn test_transport_failures_fold_into_the_outcome_pair() {
    let failure: Result<SubmitOutcome, SubmitError> = Err(SubmitError::Api {
        status: 503,
        body: "queue is paused".to_string(),
    });
    let outcome = SubmitOutcome::from_result(failure);

    assert_eq!(outcome.status, SubmitStatus::Failed);
    assert!(outcome.message.contains("503"));
    assert!(outcome.message.contains("queue is paused"));
}
