//! Intake service client
//!
//! The controller talks to the service through [`IntakeClient`] so tests can
//! script responses. [`HttpIntakeClient`] is the real implementation.

use async_trait::async_trait;
use qg_common::{PriorityScore, WaitlistSubmission};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Intake client errors
///
/// Every variant is treated the same by the controller: generic message,
/// back to the first step.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with a non-2xx status
    #[error("Service returned status {0}")]
    Status(u16),

    /// 2xx body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

/// The parts of a 2xx response the form cares about
///
/// Lenient on purpose: a missing `position` is not a decode error, it is the
/// case that triggers the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    #[serde(default)]
    pub position: Option<u64>,
    #[serde(default)]
    pub priority_score: Option<PriorityScore>,
}

/// Submits a finished form to the intake service
#[async_trait]
pub trait IntakeClient: Send + Sync {
    async fn submit(&self, submission: &WaitlistSubmission) -> Result<IntakeReceipt, ClientError>;
}

/// reqwest-backed client for `POST {base_url}/api/waitlist`
///
/// No timeout is configured: a hung service leaves the caller waiting.
pub struct HttpIntakeClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpIntakeClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("qg-form/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/api/waitlist", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IntakeClient for HttpIntakeClient {
    async fn submit(&self, submission: &WaitlistSubmission) -> Result<IntakeReceipt, ClientError> {
        debug!(endpoint = %self.endpoint, "Submitting waitlist form");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
