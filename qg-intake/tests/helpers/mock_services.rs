//! Local stand-ins for the Google OAuth/Sheets APIs and a Formspree endpoint

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ACCESS_TOKEN: &str = "test-access-token";

/// Everything the mock Google APIs observed
#[derive(Debug, Default)]
pub struct SheetState {
    pub token_requests: Vec<HashMap<String, String>>,
    pub header: Option<Vec<Value>>,
    pub header_writes: usize,
    pub appended_rows: Vec<Vec<Value>>,
    pub unauthorized_requests: usize,
    /// Make the append call fail with this status
    pub fail_append_with: Option<u16>,
    /// Answer this many otherwise valid requests with 401, as for a revoked token
    pub revoked_requests: usize,
}

pub type SharedSheetState = Arc<Mutex<SheetState>>;

fn authorized(headers: &HeaderMap, state: &SharedSheetState) -> bool {
    let ok = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN));
    let mut state = state.lock().unwrap();
    if ok && state.revoked_requests > 0 {
        state.revoked_requests -= 1;
        state.unauthorized_requests += 1;
        return false;
    }
    if !ok {
        state.unauthorized_requests += 1;
    }
    ok
}

async fn token(
    State(state): State<SharedSheetState>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    state.lock().unwrap().token_requests.push(form);
    Json(json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
}

async fn get_values(
    State(state): State<SharedSheetState>,
    Path((_sheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers, &state) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let state = state.lock().unwrap();
    let body = match &state.header {
        Some(header) => json!({ "range": range, "majorDimension": "ROWS", "values": [header] }),
        None => json!({ "range": range, "majorDimension": "ROWS" }),
    };
    Ok(Json(body))
}

async fn put_values(
    State(state): State<SharedSheetState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers, &state) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let mut state = state.lock().unwrap();
    let row = body["values"][0].as_array().cloned().unwrap_or_default();
    state.header = Some(row);
    state.header_writes += 1;
    Ok(Json(json!({ "updatedRows": 1 })))
}

async fn append_values(
    State(state): State<SharedSheetState>,
    Path((_sheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers, &state) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if !range.ends_with(":append") {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut state = state.lock().unwrap();
    if let Some(status) = state.fail_append_with {
        return Err(StatusCode::from_u16(status).unwrap());
    }
    let row = body["values"][0].as_array().cloned().unwrap_or_default();
    state.appended_rows.push(row);
    Ok(Json(json!({ "updates": { "updatedRows": 1 } })))
}

/// Router serving `/token` and `/v4/spreadsheets/:id/values/:range`
pub fn google_router(state: SharedSheetState) -> Router {
    Router::new()
        .route("/token", post(token))
        .route(
            "/v4/spreadsheets/:sheet_id/values/:range",
            get(get_values).put(put_values).post(append_values),
        )
        .with_state(state)
}

/// Everything the mock webhook observed
#[derive(Debug, Default)]
pub struct WebhookState {
    pub bodies: Vec<Value>,
    pub accept_headers: Vec<String>,
    /// Respond with this status instead of 200
    pub respond_with: Option<u16>,
}

pub type SharedWebhookState = Arc<Mutex<WebhookState>>;

async fn webhook(
    State(state): State<SharedWebhookState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.bodies.push(body);
    state.accept_headers.push(
        headers
            .get("accept")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    );
    match state.respond_with {
        Some(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({ "error": "mock" })),
        ),
        None => (StatusCode::OK, Json(json!({ "ok": true }))),
    }
}

/// Router serving `POST /f/test-form`
pub fn webhook_router(state: SharedWebhookState) -> Router {
    Router::new()
        .route("/f/test-form", post(webhook))
        .with_state(state)
}
