//! Google Sheets REST transport for [`SheetValues`].
//!
//! Speaks the v4 `spreadsheets.values` endpoints with a bearer token; the
//! credential handshake that produces the token is deployment-side.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::SheetError;
use crate::store::SheetValues;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Authenticated Google Sheets values client.
pub struct GoogleSheetsValues {
    http: reqwest::Client,
    base: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsValues {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: Url::parse(SHEETS_API_BASE).expect("sheets API base URL is valid"),
            token: token.into(),
        }
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL has a path")
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
        url
    }

    async fn check(&self, resp: reqwest::Response) -> Result<reqwest::Response, SheetError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(SheetError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// The API returns whatever cell type the sheet holds; ledger cells are
/// treated as text.
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetValues for GoogleSheetsValues {
    async fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let resp = self
            .http
            .get(self.values_url(spreadsheet_id, range))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = self.check(resp).await?;
        let body: ValueRange = resp.json().await?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> Result<(), SheetError> {
        let mut url = self.values_url(spreadsheet_id, &format!("{range}:append"));
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "majorDimension": "ROWS", "values": [row] }))
            .send()
            .await?;
        self.check(resp).await?;
        Ok(())
    }

    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> Result<(), SheetError> {
        let mut url = self.values_url(spreadsheet_id, range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "majorDimension": "ROWS", "values": [row] }))
            .send()
            .await?;
        self.check(resp).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
