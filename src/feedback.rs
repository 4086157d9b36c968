//! Read access to the hosted `feedback` table.
//!
//! Goes through the store's REST interface (`/rest/v1/feedback?select=*`)
//! with the anonymous key. Rows are returned as-is.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::FeedbackError;

pub const FEEDBACK_TABLE: &str = "feedback";

pub struct FeedbackClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FeedbackClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, FeedbackError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FeedbackError> {
        let url = config
            .supabase_url
            .as_deref()
            .ok_or(FeedbackError::NotConfigured("SUPABASE_URL"))?;
        let key = config
            .supabase_key
            .as_deref()
            .ok_or(FeedbackError::NotConfigured("SUPABASE_ANON_KEY"))?;
        Self::new(url, key)
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{FEEDBACK_TABLE}", self.base_url)
    }

    /// Every row of the feedback table, unfiltered.
    pub async fn fetch_all(&self) -> Result<Vec<Value>, FeedbackError> {
        let url = self.table_url();
        debug!("Fetching: {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("").to_string();
            warn!(status = status.as_u16(), "feedback query failed: {status_text}");
            return Err(FeedbackError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        let rows: Vec<Value> = response.json().await?;
        debug!(rows = rows.len(), "feedback loaded");
        Ok(rows)
    }
}
