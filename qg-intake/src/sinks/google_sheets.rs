//! Google Sheets sink
//!
//! Authenticates as a service account (RS256-signed JWT exchanged for an
//! OAuth access token), makes sure the sheet starts with a header row, then
//! appends one data row per entry.
//!
//! The header check, header write and append are three separate API calls.
//! The sequence is best effort: two concurrent first submissions may both
//! write the header, which is harmless since the header write overwrites the
//! same cells.

use super::{check_status, SinkError, WaitlistSink};
use crate::config::SheetsConfig;
use crate::entry::WaitlistEntry;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use qg_common::ProfileField;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh the cached token this long before Google says it expires
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

const HEADER_RANGE: &str = "Sheet1!A1:J1";
const DATA_RANGE: &str = "Sheet1!A:J";

/// Column headers, in row order
pub const HEADER_ROW: [&str; 10] = [
    "Timestamp",
    "Email",
    "Name",
    "Company",
    "Role",
    "Use Case",
    "Referral Source",
    "Social",
    "Priority Score",
    "Position",
];

/// Service-account assertion claims
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    TOKEN_LIFETIME_SECS as u64
}

/// `values.get` response; `values` is omitted entirely for an empty range
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// Google Sheets sink
pub struct GoogleSheetsSink {
    http_client: reqwest::Client,
    config: SheetsConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsSink {
    pub fn new(config: SheetsConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config,
            token: Mutex::new(None),
        }
    }

    /// Return a valid access token, exchanging a fresh assertion if needed
    async fn access_token(&self) -> Result<String, SinkError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let assertion = self.sign_assertion()?;

        debug!(token_url = %self.config.token_url, "Requesting Google access token");

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let response = check_status(response).await.map_err(|e| match e {
            SinkError::Api(status, body) => {
                SinkError::Auth(format!("token endpoint returned {}: {}", status, body))
            }
            other => other,
        })?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SinkError::Parse(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
        });

        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> Result<String, SinkError> {
        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())
            .map_err(|e| SinkError::Config(format!("invalid service-account key: {}", e)))?;

        let iat = qg_common::time::now().timestamp();
        let claims = Claims {
            iss: &self.config.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.config.token_url,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SinkError::Auth(format!("failed to sign assertion: {}", e)))
    }

    async fn forget_token(&self) {
        *self.token.lock().await = None;
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.config.api_base, self.config.sheet_id, range
        )
    }

    /// Write the header row if the first row is empty
    async fn ensure_header(&self, token: &str) -> Result<(), SinkError> {
        let response = self
            .http_client
            .get(self.values_url(HEADER_RANGE))
            .bearer_auth(token)
            .send()
            .await?;
        let existing: ValueRange = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Parse(e.to_string()))?;

        if !row_is_empty(existing.values.first()) {
            return Ok(());
        }

        info!(sheet_id = %self.config.sheet_id, "Sheet has no header row, writing one");

        let response = self
            .http_client
            .put(self.values_url(HEADER_RANGE))
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [HEADER_ROW] }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn append_row(&self, token: &str, entry: &WaitlistEntry) -> Result<(), SinkError> {
        let response = self
            .http_client
            .post(format!("{}:append", self.values_url(DATA_RANGE)))
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [data_row(entry)] }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn write_entry(&self, entry: &WaitlistEntry) -> Result<(), SinkError> {
        let token = self.access_token().await?;
        self.ensure_header(&token).await?;
        self.append_row(&token, entry).await
    }
}

#[async_trait]
impl WaitlistSink for GoogleSheetsSink {
    fn sink_id(&self) -> &'static str {
        "google_sheets"
    }

    async fn deliver(&self, entry: &WaitlistEntry) -> Result<(), SinkError> {
        let result = self.write_entry(entry).await;
        if let Err(SinkError::Api(401, _)) = &result {
            // Token revoked or expired early; the next delivery re-authenticates
            self.forget_token().await;
        }
        result
    }
}

fn row_is_empty(row: Option<&Vec<Value>>) -> bool {
    match row {
        None => true,
        Some(cells) => cells
            .iter()
            .all(|cell| cell.is_null() || cell.as_str().is_some_and(|s| s.trim().is_empty())),
    }
}

/// Data row in `HEADER_ROW` order
pub fn data_row(entry: &WaitlistEntry) -> Vec<Value> {
    let mut row = vec![json!(entry.timestamp), json!(entry.email)];
    row.extend(
        ProfileField::ALL
            .iter()
            .map(|field| json!(entry.profile_value(*field))),
    );
    row.push(json!(entry.priority_score.value()));
    row.push(json!(entry.position));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qg_common::WaitlistSubmission;

    #[test]
    fn test_data_row_matches_header_order() {
        let mut submission = WaitlistSubmission::default();
        submission.profile.set(ProfileField::Name, "Jane");
        submission.profile.set(ProfileField::Social, "@jane");
        let entry = WaitlistEntry::new("jane@example.com".into(), submission, 5, Utc::now());

        let row = data_row(&entry);
        assert_eq!(row.len(), HEADER_ROW.len());
        assert_eq!(row[1], "jane@example.com");
        assert_eq!(row[2], "Jane");
        assert_eq!(row[3], "");
        assert_eq!(row[7], "@jane");
        assert_eq!(row[8], 2);
        assert_eq!(row[9], 5);
    }

    #[test]
    fn test_row_is_empty() {
        assert!(row_is_empty(None));
        assert!(row_is_empty(Some(&vec![])));
        assert!(row_is_empty(Some(&vec![json!(""), json!("  ")])));
        assert!(!row_is_empty(Some(&vec![json!("Timestamp")])));
    }

    #[test]
    fn test_value_range_without_values() {
        let parsed: ValueRange =
            serde_json::from_value(json!({ "range": "Sheet1!A1:J1", "majorDimension": "ROWS" }))
                .unwrap();
        assert!(parsed.values.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_key_is_config_error() {
        let config = SheetsConfig::from_parts(Some("sheet"), Some("svc@x.iam"), Some("not a key"))
            .unwrap()
            .with_endpoints("http://127.0.0.1:9/v4", "http://127.0.0.1:9/token");
        let sink = GoogleSheetsSink::new(
            config,
            crate::sinks::build_http_client(Duration::from_secs(1)).unwrap(),
        );
        let entry = WaitlistEntry::new(
            "a@b.co".into(),
            WaitlistSubmission::default(),
            1,
            Utc::now(),
        );

        let err = sink.deliver(&entry).await.unwrap_err();
        assert!(matches!(err, SinkError::Config(_)));
    }
}
