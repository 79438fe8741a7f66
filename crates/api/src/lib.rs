//! REST client for the LendScope lending backend: loan lead listings, the
//! date-bounded refinement query, and per-lead lender offers.
//!
//! The client is an opaque async collaborator from the table engine's point
//! of view — it either returns raw rows or fails with an [`ApiError`], and
//! callers keep their last-good state on failure.

use chrono::NaiveDate;
use lendscope_core::record::Record;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "LENDSCOPE_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Failure modes of a backend call. None of these panic; the rendering layer
/// shows the message and keeps the previous dataset.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}

/// Thin wrapper over `reqwest::Client` bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    /// Base URL from `LENDSCOPE_API_URL`, falling back to the local dev
    /// backend.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All loan lead rows.
    pub async fn loan_details(&self) -> Result<Vec<Record>, ApiError> {
        self.get_rows("/loan-details", &[]).await
    }

    /// Loan lead rows whose timestamp falls within `[from, to]` — the remote
    /// refinement fetch behind the date-range filter.
    pub async fn loans_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Record>, ApiError> {
        let query = [
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        self.get_rows("/loan-details", &query).await
    }

    /// Lender offers prepared for one lead.
    pub async fn offers(&self, lead_id: &str) -> Result<Vec<Record>, ApiError> {
        self.get_rows(&format!("/offers/{lead_id}"), &[]).await
    }

    async fn get_rows(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Record>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching rows");
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body: Value = response.json().await?;
        rows_from_payload(body)
    }
}

/// Extract record rows from a backend payload. The backend is inconsistent
/// about envelopes: some endpoints return a bare array, others wrap it as
/// `{ "data": [...] }` or `{ "offers": [...] }`.
pub fn rows_from_payload(body: Value) -> Result<Vec<Record>, ApiError> {
    let rows = match body {
        Value::Array(rows) => rows,
        Value::Object(mut envelope) => {
            let inner = envelope
                .remove("data")
                .or_else(|| envelope.remove("offers"))
                .ok_or(ApiError::Shape("object without data/offers array"))?;
            match inner {
                Value::Array(rows) => rows,
                _ => return Err(ApiError::Shape("envelope field is not an array")),
            }
        }
        _ => return Err(ApiError::Shape("neither array nor envelope object")),
    };

    rows.into_iter()
        .map(|row| match row {
            Value::Object(fields) => Ok(Record::from_map(fields)),
            _ => Err(ApiError::Shape("row is not an object")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_payloads_decode() {
        let rows = rows_from_payload(json!([{"leadId": "L0001"}, {"leadId": "L0002"}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("leadId"), "L0001");
    }

    #[test]
    fn data_and_offers_envelopes_decode() {
        let rows = rows_from_payload(json!({"data": [{"leadId": "L0001"}]})).unwrap();
        assert_eq!(rows.len(), 1);

        let rows = rows_from_payload(json!({"offers": [{"lenderId": 3}]})).unwrap();
        assert_eq!(rows[0].text("lenderId"), "3");
    }

    #[test]
    fn malformed_payloads_are_shape_errors() {
        assert!(matches!(rows_from_payload(json!("nope")), Err(ApiError::Shape(_))));
        assert!(matches!(rows_from_payload(json!({"ok": true})), Err(ApiError::Shape(_))));
        assert!(matches!(rows_from_payload(json!({"data": 5})), Err(ApiError::Shape(_))));
        assert!(matches!(rows_from_payload(json!([1, 2])), Err(ApiError::Shape(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = Client::new("http://example.com/api/");
        assert_eq!(client.base_url(), "http://example.com/api");
    }
}
