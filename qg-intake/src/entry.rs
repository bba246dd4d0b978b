//! Waitlist entry handed to every sink

use chrono::{DateTime, Utc};
use qg_common::{PriorityScore, ProfileField, ProfileFields, WaitlistSubmission};

/// One accepted submission, as seen by the sinks
///
/// Never persisted by this service; each sink receives its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub email: String,
    /// Server receive time (ISO-8601, authoritative)
    pub timestamp: String,
    /// Timestamp the client put in the payload, if any
    pub client_timestamp: Option<String>,
    pub profile: ProfileFields,
    pub priority_score: PriorityScore,
    pub position: u64,
}

impl WaitlistEntry {
    /// Build an entry from a validated submission
    pub fn new(
        email: String,
        submission: WaitlistSubmission,
        position: u64,
        received_at: DateTime<Utc>,
    ) -> Self {
        let priority_score = submission.profile.priority_score();
        Self {
            email,
            timestamp: qg_common::time::to_iso8601(&received_at),
            client_timestamp: submission.timestamp.filter(|t| !t.is_empty()),
            profile: submission.profile,
            priority_score,
            position,
        }
    }

    /// Profile value for a column, empty string when absent
    pub fn profile_value(&self, field: ProfileField) -> &str {
        self.profile.get(field).unwrap_or("")
    }
}
