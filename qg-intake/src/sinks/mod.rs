//! Waitlist sinks - external destinations that receive a copy of each entry
//!
//! Two sinks exist: a Google Sheets spreadsheet and a Formspree-style
//! webhook. Both are optional and independent; see [`crate::fanout`] for how
//! their outcomes are combined.

use crate::entry::WaitlistEntry;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod formspree;
pub mod google_sheets;

pub use formspree::FormspreeSink;
pub use google_sheets::GoogleSheetsSink;

const USER_AGENT: &str = concat!("qg-intake/", env!("CARGO_PKG_VERSION"));

/// Sink delivery errors
///
/// Never escapes a request: the fan-out maps every variant to `"error"`.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Credentials rejected or token exchange failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Destination returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse a destination response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Sink configuration unusable at call time (e.g. malformed key)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        SinkError::Network(e.to_string())
    }
}

/// A destination for waitlist entries
#[async_trait]
pub trait WaitlistSink: Send + Sync {
    /// Sink identifier used in logs (e.g. "google_sheets")
    fn sink_id(&self) -> &'static str;

    /// Deliver one entry
    ///
    /// # Returns
    /// * `Ok(())` - destination accepted the entry
    /// * `Err(_)` - delivery failed (recorded, never aborts the sibling sink)
    async fn deliver(&self, entry: &WaitlistEntry) -> Result<(), SinkError>;
}

/// Shared outbound HTTP client for the sinks
///
/// The client-level timeout matches the per-sink bound applied by the fan-out.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SinkError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| SinkError::Config(e.to_string()))
}

/// Turn a non-success response into `SinkError::Api`
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SinkError::Api(status.as_u16(), body))
}
