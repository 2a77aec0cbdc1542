use std::cmp::Ordering;

use crate::core::{
    distance::distance_to,
    filters::matches_criteria,
    pagination::{page_window, paginate, DEFAULT_PAGE_SIZE},
};
use crate::models::{FilterCriteria, GeoPosition, Listing, Page, RankedListing};

/// Result of one search pass
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub page: Page<RankedListing>,
    pub page_window: Vec<usize>,
    pub total_listings: usize,
}

/// Listing search orchestrator - filters, orders and pages a listing snapshot
///
/// # Pipeline Stages
/// 1. Facet filtering (simple or advanced mode)
/// 2. Distance annotation when a position is known
/// 3. Stable ordering by distance, or by price without a position
/// 4. Pagination and page-number window
///
/// The ranker holds no state besides its page size; every call starts from
/// scratch, so identical inputs always give identical pages.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    page_size: usize,
}

impl Ranker {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filter, rank and page a listing snapshot
    ///
    /// # Arguments
    /// * `listings` - Everything the caller currently holds
    /// * `criteria` - Active filter mode
    /// * `geo` - User position, if the browser shared one
    /// * `page` - 1-indexed page number
    pub fn search(
        &self,
        listings: &[Listing],
        criteria: &FilterCriteria,
        geo: Option<GeoPosition>,
        page: usize,
    ) -> SearchResult {
        let total_listings = listings.len();

        let filtered: Vec<Listing> = listings
            .iter()
            .filter(|listing| matches_criteria(listing, criteria))
            .cloned()
            .collect();

        let ranked = self.rank(filtered, geo);
        let page = paginate(ranked, page, self.page_size);
        let page_window = page_window(page.total_pages, page.page);

        SearchResult {
            page,
            page_window,
            total_listings,
        }
    }

    /// Order listings for display.
    ///
    /// With a position: ascending distance, listings without a usable
    /// distance last. Without: ascending price. Both sorts are stable.
    pub fn rank(&self, listings: Vec<Listing>, geo: Option<GeoPosition>) -> Vec<RankedListing> {
        match geo {
            Some(origin) => {
                let mut ranked: Vec<RankedListing> = listings
                    .into_iter()
                    .map(|listing| RankedListing {
                        distance_km: distance_to(&origin, &listing),
                        listing,
                    })
                    .collect();

                ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
                ranked
            }
            None => {
                let mut ranked: Vec<RankedListing> = listings
                    .into_iter()
                    .map(|listing| RankedListing {
                        listing,
                        distance_km: None,
                    })
                    .collect();

                ranked.sort_by(|a, b| compare_value(a.listing.price, b.listing.price));
                ranked
            }
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Known distances ascending, unknown ones after all of them
#[inline]
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_value(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order on floats where `-0.0` and `0.0` tie
#[inline]
fn compare_value(a: f64, b: f64) -> Ordering {
    let canonical = |x: f64| if x == 0.0 { 0.0 } else { x };
    canonical(a).total_cmp(&canonical(b))
}
