//! qg-intake library - Waitlist Intake Service
//!
//! Validates waitlist submissions, assigns a process-local position and a
//! priority score, and fans each entry out to the Google Sheets and
//! Formspree sinks.

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod api;
pub mod config;
pub mod counter;
pub mod entry;
pub mod error;
pub mod fanout;
pub mod sinks;

use config::IntakeConfig;
use counter::PositionCounter;
use fanout::SinkSet;
use sinks::{FormspreeSink, GoogleSheetsSink, SinkError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Position counter, one per service instance
    pub counter: Arc<PositionCounter>,
    /// Configured sinks
    pub sinks: Arc<SinkSet>,
}

impl AppState {
    /// Create new application state with a fresh counter
    pub fn new(sinks: SinkSet) -> Self {
        Self::with_counter(sinks, Arc::new(PositionCounter::new()))
    }

    /// Create application state around an existing counter
    pub fn with_counter(sinks: SinkSet, counter: Arc<PositionCounter>) -> Self {
        Self {
            counter,
            sinks: Arc::new(sinks),
        }
    }

    /// Build the real sinks described by `config`
    pub fn from_config(config: &IntakeConfig) -> Result<Self, SinkError> {
        let http_client = sinks::build_http_client(config.sink_timeout)?;
        let mut sink_set = SinkSet::empty(config.sink_timeout);

        match &config.sheets {
            Some(sheets) => {
                info!(sheet_id = %sheets.sheet_id, "Google Sheets: Configured");
                sink_set = sink_set.with_google_sheets(Arc::new(GoogleSheetsSink::new(
                    sheets.clone(),
                    http_client.clone(),
                )));
            }
            None => info!("Google Sheets: Not configured"),
        }

        match &config.webhook {
            Some(webhook) => {
                info!("Formspree: Configured");
                sink_set = sink_set
                    .with_formspree(Arc::new(FormspreeSink::new(webhook.clone(), http_client)));
            }
            None => info!("Formspree: Not configured"),
        }

        Ok(Self::new(sink_set))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::waitlist_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
