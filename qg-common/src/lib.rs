//! # Quickgage Common Library
//!
//! Shared code for the waitlist intake service and the signup form client:
//! - Wire types for `POST /api/waitlist` and `GET /api/health`
//! - Email syntax validation
//! - Priority scoring
//! - Timestamp helpers

pub mod api;
pub mod email;
pub mod time;

pub use api::types::{
    HealthResponse, PriorityScore, ProfileField, ProfileFields, SinkOutcome, SinkResults,
    WaitlistFailure, WaitlistSubmission, WaitlistSuccess,
};
pub use email::validate_email;
