//! Rental Ranker - listing filter, geo ranking and pagination for a rental marketplace
//!
//! The core is pure: a facet filter, a great-circle distance, and a stable
//! ranking and paging engine. Around it sits a small HTTP service that pulls
//! listing snapshots from the hosted backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Ranker, SearchResult, distance::haversine_distance, pagination::{page_window, paginate}};
pub use models::{Listing, FilterCriteria, GeoPosition, RankedListing, Page, SearchListingsRequest, SearchListingsResponse};
