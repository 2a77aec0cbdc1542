use crate::models::Listing;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the listing backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Where listing snapshots come from
///
/// The ranker only ever sees plain `Listing` values; this is the seam the
/// HTTP layer uses to get them.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Every listing currently published
    async fn fetch_listings(&self) -> Result<Vec<Listing>, BackendError>;

    /// A single listing by id
    async fn get_listing(&self, id: &str) -> Result<Listing, BackendError>;

    /// Bump the listing's view counter
    async fn record_view(&self, id: &str) -> Result<(), BackendError>;
}

/// REST client for the hosted backend
///
/// Talks to a PostgREST-style API:
/// - `GET  /rest/v1/{table}?select=*` for the listing snapshot
/// - `GET  /rest/v1/{table}?id=eq.{id}&select=*` for one listing
/// - `POST /rest/v1/rpc/{views_function}` to count a view
pub struct BackendClient {
    base_url: String,
    api_key: String,
    listings_table: String,
    views_function: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        base_url: String,
        api_key: String,
        listings_table: String,
        views_function: String,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            listings_table,
            views_function,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.listings_table
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn fetch_rows(&self, url: &str, what: &str) -> Result<Vec<Value>, BackendError> {
        let response = self
            .authorized(self.client.get(url))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch {}: {} - {}", what, status, body);
            return Err(BackendError::ApiError(format!("Failed to fetch {}: {}", what, status)));
        }

        let json: Value = response.json().await?;

        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(BackendError::InvalidResponse("Expected an array of rows".into())),
        }
    }
}

#[async_trait]
impl ListingSource for BackendClient {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, BackendError> {
        let url = format!("{}?select=*", self.table_url());

        tracing::debug!("Fetching listings from: {}", url);

        let rows = self.fetch_rows(&url, "listings").await?;
        let total = rows.len();

        let listings: Vec<Listing> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<Listing>(row) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!("Skipping malformed listing row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} listings ({} rows)", listings.len(), total);

        Ok(listings)
    }

    async fn get_listing(&self, id: &str) -> Result<Listing, BackendError> {
        let url = format!(
            "{}?id=eq.{}&select=*",
            self.table_url(),
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching listing: {}", id);

        let rows = self.fetch_rows(&url, "listing").await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("Listing {} not found", id)))?;

        serde_json::from_value(row)
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse listing: {}", e)))
    }

    async fn record_view(&self, id: &str) -> Result<(), BackendError> {
        let url = format!(
            "{}/rest/v1/rpc/{}",
            self.base_url.trim_end_matches('/'),
            self.views_function
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "listing_id": id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to record view: {}",
                response.status()
            )));
        }

        tracing::debug!("Recorded view for listing {}", id);

        Ok(())
    }
}
