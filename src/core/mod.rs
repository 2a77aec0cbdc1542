// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod pagination;
pub mod ranker;

pub use distance::{distance_to, haversine_distance, EARTH_RADIUS_KM};
pub use filters::{matches_advanced, matches_criteria, matches_simple};
pub use pagination::{page_window, paginate, total_pages, DEFAULT_PAGE_SIZE, PAGE_WINDOW_WIDTH};
pub use ranker::{Ranker, SearchResult};
