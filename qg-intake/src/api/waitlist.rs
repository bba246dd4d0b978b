//! Waitlist intake endpoint
//!
//! `POST /api/waitlist`: validate the required email, take a position,
//! score the profile, fan out to the sinks and report the aggregate.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use qg_common::{WaitlistFailure, WaitlistSubmission, WaitlistSuccess};
use tracing::{error, info, warn};

use crate::entry::WaitlistEntry;
use crate::error::{ApiError, ApiResult};
use crate::{fanout, AppState};

pub const EMAIL_REQUIRED: &str = "Email is required";
const SUCCESS_MESSAGE: &str = "Successfully added to waitlist";
const FAILURE_MESSAGE: &str = "Failed to save email";

/// POST /api/waitlist
///
/// * 400 - email missing or empty; no position consumed, no sink called
/// * 200 - at least one sink accepted the entry
/// * 500 - every sink failed or none is configured
pub async fn submit_waitlist(
    State(state): State<AppState>,
    payload: Result<Json<WaitlistSubmission>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(mut submission) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected waitlist payload");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let email = match submission.email.take() {
        Some(email) if !email.is_empty() => email,
        _ => {
            warn!("Waitlist submission without email");
            return Err(ApiError::BadRequest(EMAIL_REQUIRED.to_string()));
        }
    };

    let position = state.counter.next_position();
    let entry = WaitlistEntry::new(email, submission, position, qg_common::time::now());

    info!(
        email = %entry.email,
        position,
        priority_score = entry.priority_score.value(),
        "Waitlist submission received"
    );

    let results = fanout::dispatch(&state.sinks, &entry).await;

    if results.any_success() {
        let body = WaitlistSuccess {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            position,
            priority_score: entry.priority_score,
            results,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    } else {
        error!(
            email = %entry.email,
            position,
            google_sheets = ?results.google_sheets,
            formspree = ?results.formspree,
            "No sink accepted the submission"
        );
        let body = WaitlistFailure {
            success: false,
            error: FAILURE_MESSAGE.to_string(),
            priority_score: entry.priority_score,
            results,
        };
        Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
    }
}

/// Build waitlist routes
pub fn waitlist_routes() -> Router<AppState> {
    Router::new().route("/api/waitlist", post(submit_waitlist))
}
