use serde::{Deserialize, Serialize};
use crate::core::SearchResult;
use crate::models::domain::{Listing, RankedListing};

/// Response for the search and rank endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListingsResponse {
    pub listings: Vec<RankedListing>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub page_window: Vec<usize>,
    /// Listings considered before filtering
    pub total_listings: usize,
}

impl From<SearchResult> for SearchListingsResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            listings: result.page.items,
            page: result.page.page,
            page_size: result.page.page_size,
            total_items: result.page.total_items,
            total_pages: result.page.total_pages,
            page_window: result.page_window,
            total_listings: result.total_listings,
        }
    }
}

/// Response for the single listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub listing: Listing,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Cache refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
}
