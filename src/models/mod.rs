// Model exports
pub mod domain;
pub mod normalize;
pub mod requests;
pub mod responses;

pub use domain::{AdvancedFilter, FilterCriteria, FurnishedState, GeoPosition, Listing, Page, PriceBucket, RankedListing, SimpleFilter};
pub use requests::{AdvancedFilterForm, CriteriaRequest, GeoPositionRequest, RankListingsRequest, SearchListingsRequest, SimpleFilterRequest};
pub use responses::{ErrorResponse, HealthResponse, ListingResponse, RefreshResponse, SearchListingsResponse};
