//! # HTTP Remote Table Client
//!
//! `ProductTable` implementation against a PostgREST-style endpoint
//! (the hosted deployment uses Supabase, which speaks this dialect).
//!
//! ## Request Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select_all  GET    /rest/v1/<table>                                   │
//! │                     ?select=*&order=sortOrder.asc.nullslast,id.asc     │
//! │  insert      POST   /rest/v1/<table>              body: [rows]         │
//! │  update      PATCH  /rest/v1/<table>?id=eq.<id>   body: {changes}      │
//! │  delete      DELETE /rest/v1/<table>?id=eq.<id>                        │
//! │  upsert      POST   /rest/v1/<table>?on_conflict=id                    │
//! │                     Prefer: resolution=merge-duplicates  body: [rows]  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every non-2xx response is surfaced as `RemoteError::Rejected` carrying
//! the response body verbatim. Timeouts and retries beyond the client-level
//! request timeout are NOT this component's concern.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::remote::ProductTable;
use async_trait::async_trait;
use folio_core::{Product, ProductPatch};

/// Request timeout for every remote table call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for the remote table.
///
/// Built by the composition root; the library never reads the environment
/// itself.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,

    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,

    /// Logical table name.
    pub table: String,
}

impl RemoteConfig {
    /// Creates a config for the default `products` table.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RemoteConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: "products".to_string(),
        }
    }

    /// Overrides the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The fully-qualified table endpoint.
    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

// =============================================================================
// HTTP Product Table
// =============================================================================

/// PostgREST-style HTTP implementation of [`ProductTable`].
#[derive(Debug, Clone)]
pub struct HttpProductTable {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl HttpProductTable {
    /// Builds the client with auth headers and a fixed request timeout.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| RemoteError::InvalidResponse(format!("invalid api key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RemoteError::InvalidResponse(format!("invalid api key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(HttpProductTable { client, config })
    }

    /// Maps a non-2xx response to `Rejected`, preserving the body verbatim.
    async fn check(resp: Response) -> RemoteResult<Response> {
        let status: StatusCode = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ProductTable for HttpProductTable {
    async fn select_all(&self) -> RemoteResult<Vec<Product>> {
        debug!(table = %self.config.table, "select_all");
        let resp = self
            .client
            .get(self.config.table_url())
            .query(&[
                ("select", "*"),
                ("order", "sortOrder.asc.nullslast,id.asc"),
            ])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let rows = resp
            .json::<Vec<Product>>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        debug!(count = rows.len(), "select_all returned rows");
        Ok(rows)
    }

    async fn insert(&self, rows: &[Product]) -> RemoteResult<()> {
        debug!(count = rows.len(), "insert");
        let resp = self
            .client
            .post(self.config.table_url())
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn update(&self, id: &str, changes: &ProductPatch) -> RemoteResult<()> {
        debug!(id = %id, "update");
        let resp = self
            .client
            .patch(self.config.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(changes)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        debug!(id = %id, "delete");
        let resp = self
            .client
            .delete(self.config.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn upsert(&self, rows: &[Product]) -> RemoteResult<()> {
        debug!(count = rows.len(), "upsert");
        let resp = self
            .client
            .post(self.config.table_url())
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let config = RemoteConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(
            config.table_url(),
            "https://abc.supabase.co/rest/v1/products"
        );
    }

    #[test]
    fn test_with_table_overrides_default() {
        let config = RemoteConfig::new("https://abc.supabase.co", "key").with_table("catalog");
        assert_eq!(config.table_url(), "https://abc.supabase.co/rest/v1/catalog");
    }

    #[test]
    fn test_client_builds_with_plain_api_key() {
        let table = HttpProductTable::new(RemoteConfig::new("https://abc.supabase.co", "anon-key"));
        assert!(table.is_ok());
    }
}
