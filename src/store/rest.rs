//! PostgREST store client.
//!
//! Talks to a Supabase-style `/rest/v1` endpoint. The access key is sent
//! both as `apikey` and as a bearer token.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{Filter, Store};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

const REST_PATH: &str = "rest/v1";

/// Store client over a PostgREST HTTP API.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl RestStore {
    /// Create a client for the configured store.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), &config.url, &config.key)
    }

    /// Create a client with a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str, key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    /// URL of a table endpoint.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.base_url)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Turn a non-2xx response into [`Error::Store`] carrying the body.
    async fn check(table: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::Store {
            table: table.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

impl Store for RestStore {
    async fn insert<T: Serialize + Sync>(&self, table: &str, record: &T) -> Result<Option<Value>> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let rows: Vec<Value> = Self::check(table, response).await?.json().await?;
        debug!(table, returned = rows.len(), "insert");
        Ok(rows.into_iter().next())
    }

    async fn upsert<T: Serialize + Sync>(
        &self,
        table: &str,
        records: &[T],
        on_conflict: &str,
    ) -> Result<()> {
        let response = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(records)
            .send()
            .await?;

        Self::check(table, response).await?;
        debug!(table, rows = records.len(), on_conflict, "upsert");
        Ok(())
    }

    async fn update<T: Serialize + Sync>(
        &self,
        table: &str,
        patch: &T,
        filter: &Filter,
    ) -> Result<()> {
        let condition = format!("eq.{}", filter.value());
        let response = self
            .request(Method::PATCH, table)
            .query(&[(filter.column(), condition.as_str())])
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        Self::check(table, response).await?;
        debug!(table, column = filter.column(), value = filter.value(), "update");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str) -> RestStore {
        RestStore::with_client(reqwest::Client::new(), url, "secret")
    }

    #[test]
    fn test_table_url() {
        let store = store("https://example.supabase.co");
        assert_eq!(
            store.table_url("decks"),
            "https://example.supabase.co/rest/v1/decks"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let store = store("https://example.supabase.co/");
        assert_eq!(
            store.table_url("raw_cards"),
            "https://example.supabase.co/rest/v1/raw_cards"
        );
    }

    #[test]
    fn test_request_carries_credentials() {
        let store = store("https://example.supabase.co");
        let request = store.request(Method::POST, "decks").build().unwrap();

        assert_eq!(request.headers()["apikey"], "secret");
        assert_eq!(request.headers()["authorization"], "Bearer secret");
        assert_eq!(request.method(), Method::POST);
    }
}
