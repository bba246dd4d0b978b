//! qg-intake - Waitlist Intake Service
//!
//! Single-endpoint relay: `POST /api/waitlist` forwards each signup to Google
//! Sheets and a Formspree webhook, whichever are configured.

use anyhow::{Context, Result};
use clap::Parser;
use qg_intake::config::{IntakeArgs, IntakeConfig};
use qg_intake::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qg_intake=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Quickgage waitlist intake (qg-intake) v{} built {} ({})",
        env!("QG_BUILD_VERSION"),
        env!("QG_BUILT_AT"),
        env!("QG_BUILD_PROFILE")
    );

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let args = IntakeArgs::parse();
    let config = IntakeConfig::from_args(&args);

    let state = AppState::from_config(&config).context("Failed to initialize sinks")?;
    if state.sinks.configured_count() == 0 {
        warn!("No sinks configured: every submission will be answered with 500");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    info!("qg-intake listening on http://{}", config.listen_addr);
    info!("Health check: http://{}/api/health", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
