//! Formspree webhook sink
//!
//! One JSON `POST` per entry. The `_subject` field becomes the subject line
//! of the notification email Formspree sends.

use super::{check_status, SinkError, WaitlistSink};
use crate::config::WebhookConfig;
use crate::entry::WaitlistEntry;
use async_trait::async_trait;
use qg_common::{PriorityScore, ProfileFields};
use serde::Serialize;
use tracing::debug;

const SUBJECT_PREFIX: &str = "New Quickgage Waitlist Signup";

/// Webhook request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    email: &'a str,
    timestamp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_timestamp: Option<&'a str>,
    #[serde(flatten)]
    profile: &'a ProfileFields,
    priority_score: PriorityScore,
    position: u64,
    #[serde(rename = "_subject")]
    subject: String,
}

/// Subject line for the notification, e.g. `New Quickgage Waitlist Signup #12 (priority)`
pub fn subject_line(entry: &WaitlistEntry) -> String {
    match entry.priority_score {
        PriorityScore::WithProfile => {
            format!("{} #{} (priority)", SUBJECT_PREFIX, entry.position)
        }
        PriorityScore::EmailOnly => format!("{} #{}", SUBJECT_PREFIX, entry.position),
    }
}

/// Formspree-style webhook sink
pub struct FormspreeSink {
    http_client: reqwest::Client,
    endpoint: String,
}

impl FormspreeSink {
    pub fn new(config: WebhookConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl WaitlistSink for FormspreeSink {
    fn sink_id(&self) -> &'static str {
        "formspree"
    }

    async fn deliver(&self, entry: &WaitlistEntry) -> Result<(), SinkError> {
        let payload = WebhookPayload {
            email: &entry.email,
            timestamp: &entry.timestamp,
            client_timestamp: entry.client_timestamp.as_deref(),
            profile: &entry.profile,
            priority_score: entry.priority_score,
            position: entry.position,
            subject: subject_line(entry),
        };

        debug!(endpoint = %self.endpoint, position = entry.position, "Posting to webhook");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
