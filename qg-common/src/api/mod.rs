//! API module for the shared HTTP contract
//!
//! Types exchanged between the signup form client and the intake service.
//! This module contains ONLY serde types and pure helpers; each side wraps
//! them with its own HTTP framework (axum on the server, reqwest on the client).

pub mod types;

pub use types::{
    HealthResponse, PriorityScore, ProfileField, ProfileFields, SinkOutcome, SinkResults,
    WaitlistFailure, WaitlistSubmission, WaitlistSuccess,
};
