//! Configuration for qg-intake
//!
//! Every option can come from a command-line flag or an environment variable
//! (a `.env` file is loaded first by the binary). All sink settings are
//! absence-tolerant: a sink whose settings are missing is simply not
//! configured.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default Google Sheets REST base URL
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
/// Default Google OAuth token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Command-line arguments for qg-intake
#[derive(Parser, Debug, Clone)]
#[command(name = "qg-intake")]
#[command(about = "Waitlist intake service for the Quickgage landing page")]
#[command(version)]
pub struct IntakeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3001", env = "PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: IpAddr,

    /// Spreadsheet identifier for the Google Sheets sink
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    pub google_sheet_id: Option<String>,

    /// Service-account email for the Google Sheets sink
    #[arg(long, env = "GOOGLE_CLIENT_EMAIL")]
    pub google_client_email: Option<String>,

    /// Service-account private key (PEM; literal `\n` sequences are accepted)
    #[arg(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true)]
    pub google_private_key: Option<String>,

    /// Google Sheets API base URL
    #[arg(long, default_value = DEFAULT_SHEETS_API_BASE, env = "GOOGLE_SHEETS_API_BASE")]
    pub google_sheets_api_base: String,

    /// Google OAuth token endpoint
    #[arg(long, default_value = DEFAULT_TOKEN_URL, env = "GOOGLE_TOKEN_URL")]
    pub google_token_url: String,

    /// Webhook endpoint for the Formspree sink
    #[arg(long, env = "FORMSPREE_ENDPOINT")]
    pub formspree_endpoint: Option<String>,

    /// Upper bound on each sink call, in seconds
    #[arg(long, default_value = "10", env = "SINK_TIMEOUT_SECS")]
    pub sink_timeout_secs: u64,
}

/// Google Sheets sink settings
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub client_email: String,
    /// PEM-encoded RSA private key with real newlines
    pub private_key: String,
    pub api_base: String,
    pub token_url: String,
}

impl SheetsConfig {
    /// Build from optional parts; `None` unless id, email and key are all non-empty
    pub fn from_parts(
        sheet_id: Option<&str>,
        client_email: Option<&str>,
        private_key: Option<&str>,
    ) -> Option<Self> {
        let sheet_id = non_empty(sheet_id)?;
        let client_email = non_empty(client_email)?;
        let private_key = non_empty(private_key)?;

        Some(Self {
            sheet_id: sheet_id.to_string(),
            client_email: client_email.to_string(),
            private_key: unescape_newlines(private_key),
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        })
    }

    /// Override the API and token endpoints
    pub fn with_endpoints(
        mut self,
        api_base: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.token_url = token_url.into();
        self
    }
}

/// Webhook sink settings
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub endpoint: String,
}

impl WebhookConfig {
    pub fn from_endpoint(endpoint: Option<&str>) -> Option<Self> {
        non_empty(endpoint).map(|endpoint| Self {
            endpoint: endpoint.to_string(),
        })
    }
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub listen_addr: SocketAddr,
    pub sheets: Option<SheetsConfig>,
    pub webhook: Option<WebhookConfig>,
    pub sink_timeout: Duration,
}

impl IntakeConfig {
    pub fn from_args(args: &IntakeArgs) -> Self {
        let sheets = SheetsConfig::from_parts(
            args.google_sheet_id.as_deref(),
            args.google_client_email.as_deref(),
            args.google_private_key.as_deref(),
        )
        .map(|c| c.with_endpoints(&args.google_sheets_api_base, &args.google_token_url));

        Self {
            listen_addr: SocketAddr::new(args.host, args.port),
            sheets,
            webhook: WebhookConfig::from_endpoint(args.formspree_endpoint.as_deref()),
            sink_timeout: Duration::from_secs(args.sink_timeout_secs.max(1)),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3001),
            sheets: None,
            webhook: None,
            sink_timeout: Duration::from_secs(10),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Private keys pasted into env files usually carry `\n` escapes
fn unescape_newlines(key: &str) -> String {
    key.replace("\\n", "\n")
}
