use anyhow::{anyhow, Context, Result};
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::inventory::Item;
use crate::store::types::{ItemRow, ParticipantRow, ResponseRow, ResultRow};

/// Client for the hosted data service (PostgREST-style HTTP API).
///
/// Every write is an idempotent upsert so a retried request can never
/// duplicate a row; resubmitting a questionnaire overwrites the previous
/// result for the same participant.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Retry strategy shared by all requests: exponential backoff with 3 attempts
fn retry_strategy() -> impl Iterator<Item = std::time::Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3)
}

/// Translate an HTTP error status into a message the participant can act on.
fn status_error(status: reqwest::StatusCode, table: &str) -> anyhow::Error {
    match status.as_u16() {
        401 | 403 => anyhow!(
            "Data service rejected the API key while accessing '{}'. The key may be invalid or expired.",
            table
        ),
        404 => anyhow!(
            "Table '{}' not found on the data service. Check the store URL and schema.",
            table
        ),
        429 => anyhow!("Data service rate limit exceeded. Wait a few minutes and try again."),
        _ => anyhow!("Data service error on '{}': HTTP {}", table, status),
    }
}

impl StoreClient {
    /// Create a client for the data service at `base_url` authenticated with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(StoreClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
    }

    fn upsert(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Prefer", "resolution=merge-duplicates")
    }

    /// Fetch the full item bank, ordered by position.
    pub async fn fetch_items(&self) -> Result<Vec<Item>> {
        let url = format!(
            "{}?select=id,text,category,position&order=position.asc",
            self.endpoint("items")
        );

        let rows: Vec<ItemRow> = Retry::spawn(retry_strategy(), || async {
            let response = self
                .get(&url)
                .send()
                .await
                .context("Failed to reach the data service")?;

            if !response.status().is_success() {
                return Err(status_error(response.status(), "items"));
            }

            response
                .json::<Vec<ItemRow>>()
                .await
                .context("Failed to parse item bank JSON")
        })
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Create or refresh the participant row for this session identity.
    pub async fn upsert_participant(&self, row: &ParticipantRow) -> Result<()> {
        let url = self.endpoint("participants");

        Retry::spawn(retry_strategy(), || async {
            let response = self
                .upsert(&url)
                .json(&[row])
                .send()
                .await
                .context("Failed to reach the data service")?;

            if !response.status().is_success() {
                return Err(status_error(response.status(), "participants"));
            }
            Ok(())
        })
        .await
    }

    /// Write the complete response set in one batch.
    pub async fn insert_responses(&self, rows: &[ResponseRow]) -> Result<()> {
        let url = self.endpoint("responses");

        Retry::spawn(retry_strategy(), || async {
            let response = self
                .upsert(&url)
                .json(rows)
                .send()
                .await
                .context("Failed to reach the data service")?;

            if !response.status().is_success() {
                return Err(status_error(response.status(), "responses"));
            }
            Ok(())
        })
        .await
    }

    /// Store the computed result, replacing any previous row for the same
    /// participant.
    pub async fn upsert_result(&self, row: &ResultRow) -> Result<()> {
        let url = self.endpoint("results");

        Retry::spawn(retry_strategy(), || async {
            let response = self
                .upsert(&url)
                .json(&[row])
                .send()
                .await
                .context("Failed to reach the data service")?;

            if !response.status().is_success() {
                return Err(status_error(response.status(), "results"));
            }
            Ok(())
        })
        .await
    }

    /// Fetch the most recent stored result for a participant, if any.
    pub async fn fetch_result(&self, participant_id: &str) -> Result<Option<ResultRow>> {
        let url = format!(
            "{}?participant_id=eq.{}&select=*&order=created_at.desc&limit=1",
            self.endpoint("results"),
            participant_id
        );

        let rows: Vec<ResultRow> = Retry::spawn(retry_strategy(), || async {
            let response = self
                .get(&url)
                .send()
                .await
                .context("Failed to reach the data service")?;

            if !response.status().is_success() {
                return Err(status_error(response.status(), "results"));
            }

            response
                .json::<Vec<ResultRow>>()
                .await
                .context("Failed to parse result JSON")
        })
        .await?;

        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = StoreClient::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            client.endpoint("items"),
            "https://example.supabase.co/rest/v1/items"
        );
    }

    #[test]
    fn test_status_error_messages() {
        let auth = status_error(reqwest::StatusCode::UNAUTHORIZED, "items");
        assert!(auth.to_string().contains("API key"));

        let missing = status_error(reqwest::StatusCode::NOT_FOUND, "results");
        assert!(missing.to_string().contains("'results'"));

        let limited = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "items");
        assert!(limited.to_string().contains("rate limit"));
    }

    #[test]
    fn test_retry_strategy_bounded() {
        assert_eq!(retry_strategy().count(), 3);
    }
}
