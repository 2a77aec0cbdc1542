// Service exports
pub mod backend;
pub mod cache;

pub use backend::{BackendClient, BackendError, ListingSource};
pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
