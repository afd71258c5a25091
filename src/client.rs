//! HTTP submission transport for compiled payloads.
//!
//! The engine never talks to the network itself: compilation must fully
//! succeed before anything here runs, so a resolution or validation
//! failure can never produce a partial submission. Timeout policy lives
//! here; retries do not exist — a failed submission is surfaced to the
//! caller as-is.

use serde_json::Value;
use std::time::Duration;

use crate::error::SubmitError;
use crate::payload::BatchPayload;

/// Outcome status of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Success,
    Failed,
}

impl std::fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitStatus::Success => write!(f, "Success"),
            SubmitStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// The status/message pair a caller surfaces as its own output, without
/// interpretation.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub status: SubmitStatus,
    pub message: String,
}

impl SubmitOutcome {
    /// Folds a submission result into the caller-facing outcome pair.
    pub fn from_result(result: Result<SubmitOutcome, SubmitError>) -> Self {
        result.unwrap_or_else(|error| SubmitOutcome {
            status: SubmitStatus::Failed,
            message: error.to_string(),
        })
    }
}

/// A transport that can enqueue a compiled payload on the backend.
pub trait QueueClient {
    fn enqueue(&self, payload: &BatchPayload) -> Result<SubmitOutcome, SubmitError>;
}

/// Blocking HTTP client for the backend's batch-enqueue endpoint.
pub struct HttpQueueClient {
    client: reqwest::blocking::Client,
    base_url: String,
    queue_id: String,
    timeout: Duration,
}

impl HttpQueueClient {
    /// Creates a client for a backend instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:9090`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            queue_id: "default".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Targets a queue other than `default`.
    pub fn with_queue(mut self, queue_id: impl Into<String>) -> Self {
        self.queue_id = queue_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1/queue/{}/enqueue_batch",
            self.base_url.trim_end_matches('/'),
            self.queue_id,
        )
    }
}

impl QueueClient for HttpQueueClient {
    /// Performs a single `POST` of the payload to the enqueue endpoint.
    ///
    /// A non-2xx response becomes an opaque [`SubmitError::Api`] carrying
    /// the status code and body text. On success, the backend's
    /// `message` field is surfaced when the body is JSON.
    fn enqueue(&self, payload: &BatchPayload) -> Result<SubmitOutcome, SubmitError> {
        let url = self.endpoint();
        tracing::info!(%url, "Submitting batch payload");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(payload.as_value())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), "Queue endpoint rejected the submission");
            return Err(SubmitError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let message = response
            .json::<Value>()
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Batch enqueued".to_string());

        tracing::info!(status = status.as_u16(), "Batch enqueued");
        Ok(SubmitOutcome {
            status: SubmitStatus::Success,
            message,
        })
    }
}
