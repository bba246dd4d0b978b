//! Shared API request/response types
//!
//! JSON field names are camelCase to match what the landing page has always
//! sent (`useCase`, `referralSource`, `priorityScore`, ...).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ========================================
// Profile
// ========================================

/// Optional profile collected on the second form step
///
/// Every field is optional; a field that is present but empty counts as
/// not supplied for scoring purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
}

/// Identifies one profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Company,
    Role,
    UseCase,
    ReferralSource,
    Social,
}

impl ProfileField {
    /// All fields in form order
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Name,
        ProfileField::Company,
        ProfileField::Role,
        ProfileField::UseCase,
        ProfileField::ReferralSource,
        ProfileField::Social,
    ];

    /// Human-readable label (also used as the sheet column header)
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Company => "Company",
            ProfileField::Role => "Role",
            ProfileField::UseCase => "Use Case",
            ProfileField::ReferralSource => "Referral Source",
            ProfileField::Social => "Social",
        }
    }
}

impl ProfileFields {
    /// Borrow the value of one field
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::Name => &self.name,
            ProfileField::Company => &self.company,
            ProfileField::Role => &self.role,
            ProfileField::UseCase => &self.use_case,
            ProfileField::ReferralSource => &self.referral_source,
            ProfileField::Social => &self.social,
        };
        value.as_deref()
    }

    /// Replace the value of one field
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Company => &mut self.company,
            ProfileField::Role => &mut self.role,
            ProfileField::UseCase => &mut self.use_case,
            ProfileField::ReferralSource => &mut self.referral_source,
            ProfileField::Social => &mut self.social,
        };
        *slot = Some(value.into());
    }

    /// True iff at least one field is a non-empty string
    pub fn has_any(&self) -> bool {
        ProfileField::ALL
            .iter()
            .any(|field| self.get(*field).is_some_and(|v| !v.is_empty()))
    }

    /// Priority score derived from profile completeness
    pub fn priority_score(&self) -> PriorityScore {
        if self.has_any() {
            PriorityScore::WithProfile
        } else {
            PriorityScore::EmailOnly
        }
    }
}

// ========================================
// Priority score
// ========================================

/// Coarse 1-or-2 ranking: did the submitter supply any profile information
///
/// Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityScore {
    /// Email only (1)
    EmailOnly,
    /// At least one profile field supplied (2)
    WithProfile,
}

impl PriorityScore {
    pub fn value(&self) -> u8 {
        match self {
            PriorityScore::EmailOnly => 1,
            PriorityScore::WithProfile => 2,
        }
    }
}

impl fmt::Display for PriorityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for PriorityScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for PriorityScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(PriorityScore::EmailOnly),
            2 => Ok(PriorityScore::WithProfile),
            other => Err(serde::de::Error::custom(format!(
                "priority score must be 1 or 2, got {}",
                other
            ))),
        }
    }
}

// ========================================
// Request
// ========================================

/// `POST /api/waitlist` request body
///
/// `email` is required by the service but deserialized as optional so that
/// its absence can be answered with a 400 rather than a JSON rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub profile: ProfileFields,

    /// Client-side submission time (ISO-8601), informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

// ========================================
// Responses
// ========================================

/// Outcome of delivering one entry to one sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkOutcome {
    Success,
    Error,
    NotConfigured,
}

impl SinkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SinkOutcome::Success)
    }
}

/// Per-sink outcomes plus the position assigned to the entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkResults {
    pub google_sheets: SinkOutcome,
    pub formspree: SinkOutcome,
    pub position: u64,
}

impl SinkResults {
    /// True if at least one sink accepted the entry
    pub fn any_success(&self) -> bool {
        self.google_sheets.is_success() || self.formspree.is_success()
    }
}

/// 200 response body for an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistSuccess {
    pub success: bool,
    pub message: String,
    pub position: u64,
    pub priority_score: PriorityScore,
    pub results: SinkResults,
}

/// 500 response body when no sink accepted the submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistFailure {
    pub success: bool,
    pub error: String,
    pub priority_score: PriorityScore,
    pub results: SinkResults,
}

/// `GET /api/health` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
