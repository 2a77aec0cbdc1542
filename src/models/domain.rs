use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize::{lenient_date, lenient_furnished, lenient_id, null_as_default};

/// Rental property listing as held by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub beds: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bathrooms: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kitchen: bool,
    #[serde(default, alias = "size_sqm")]
    pub size_sqm: Option<f64>,
    #[serde(default, alias = "property_type", deserialize_with = "null_as_default")]
    pub property_type: String,
    #[serde(default, deserialize_with = "lenient_furnished")]
    pub furnished: FurnishedState,
    #[serde(default, alias = "available_from", deserialize_with = "lenient_date")]
    pub available_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "views_count", deserialize_with = "null_as_default")]
    pub views_count: u64,
}

impl Listing {
    /// Minimal listing with everything optional left empty
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            address: String::new(),
            area: String::new(),
            price,
            beds: 0,
            bathrooms: 0,
            kitchen: false,
            size_sqm: None,
            property_type: String::new(),
            furnished: FurnishedState::default(),
            available_from: None,
            amenities: Vec::new(),
            latitude: None,
            longitude: None,
            views_count: 0,
        }
    }

    /// Coordinates as `(lat, lon)`, only when both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

/// How much furniture comes with the property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnishedState {
    Full,
    Half,
    #[default]
    #[serde(rename = "none")]
    Unfurnished,
}

impl FurnishedState {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "full" => Some(Self::Full),
            "half" => Some(Self::Half),
            "none" => Some(Self::Unfurnished),
            _ => None,
        }
    }
}

/// User position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

/// Coarse price band used by the simple search box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBucket {
    #[default]
    All,
    Low,
    Mid,
    High,
}

impl PriceBucket {
    pub const LOW_THRESHOLD: f64 = 500.0;
    pub const HIGH_THRESHOLD: f64 = 1000.0;

    /// Both thresholds belong to `Mid`.
    #[inline]
    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceBucket::All => true,
            PriceBucket::Low => price < Self::LOW_THRESHOLD,
            PriceBucket::Mid => (Self::LOW_THRESHOLD..=Self::HIGH_THRESHOLD).contains(&price),
            PriceBucket::High => price > Self::HIGH_THRESHOLD,
        }
    }
}

/// Free-text search plus a price band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub price_bucket: PriceBucket,
}

/// Per-field constraints, all AND-ed. `None` or empty means "not applied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilter {
    pub title: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub beds: Option<u32>,
    pub bathrooms: Option<u32>,
    pub kitchen: Option<bool>,
    pub min_size: Option<f64>,
    pub property_type: Option<String>,
    pub furnished: Option<FurnishedState>,
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Exactly one filtering mode is active at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterCriteria {
    Simple(SimpleFilter),
    Advanced(AdvancedFilter),
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria::Simple(SimpleFilter::default())
    }
}

/// Listing annotated with its distance from the user, when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
}

/// One page of an ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_backend_row() {
        let row = serde_json::json!({
            "id": 42,
            "title": "Sunny flat",
            "address": "1 Main St",
            "area": "Centre",
            "price": 750,
            "beds": 2,
            "bathrooms": 1,
            "kitchen": true,
            "size_sqm": 64.5,
            "property_type": "apartment",
            "furnished": "half",
            "available_from": "2024-05-01",
            "amenities": null,
            "latitude": 51.5,
            "longitude": null,
            "views_count": 7
        });

        let listing: Listing = serde_json::from_value(row).unwrap();

        assert_eq!(listing.id, "42");
        assert_eq!(listing.price, 750.0);
        assert_eq!(listing.size_sqm, Some(64.5));
        assert_eq!(listing.property_type, "apartment");
        assert_eq!(listing.furnished, FurnishedState::Half);
        assert_eq!(listing.available_from, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(listing.amenities.is_empty());
        assert_eq!(listing.coordinates(), None);
        assert_eq!(listing.views_count, 7);
    }

    #[test]
    fn test_listing_defaults_for_missing_fields() {
        let listing: Listing = serde_json::from_value(serde_json::json!({ "id": "a" })).unwrap();

        assert_eq!(listing, Listing::new("a", "", 0.0));
    }

    #[test]
    fn test_listing_camel_case_output() {
        let mut listing = Listing::new("1", "Flat", 300.0);
        listing.size_sqm = Some(40.0);

        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["sizeSqm"], 40.0);
        assert_eq!(json["furnished"], "none");
        assert_eq!(json["viewsCount"], 0);

        let back: Listing = serde_json::from_value(json).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn test_price_bucket_boundaries() {
        assert!(PriceBucket::Low.contains(499.99));
        assert!(!PriceBucket::Low.contains(500.0));
        assert!(PriceBucket::Mid.contains(500.0));
        assert!(PriceBucket::Mid.contains(1000.0));
        assert!(!PriceBucket::High.contains(1000.0));
        assert!(PriceBucket::High.contains(1000.01));
        assert!(PriceBucket::All.contains(0.0));
    }

    #[test]
    fn test_criteria_tagged_by_mode() {
        let simple: FilterCriteria = serde_json::from_value(serde_json::json!({
            "mode": "simple",
            "query": "loft",
            "priceBucket": "mid"
        }))
        .unwrap();
        assert_eq!(
            simple,
            FilterCriteria::Simple(SimpleFilter {
                query: "loft".to_string(),
                price_bucket: PriceBucket::Mid,
            })
        );

        let advanced: FilterCriteria = serde_json::from_value(serde_json::json!({
            "mode": "advanced",
            "beds": 2,
            "furnished": "none"
        }))
        .unwrap();
        match advanced {
            FilterCriteria::Advanced(filter) => {
                assert_eq!(filter.beds, Some(2));
                assert_eq!(filter.furnished, Some(FurnishedState::Unfurnished));
                assert!(filter.amenities.is_empty());
            }
            other => panic!("expected advanced criteria, got {:?}", other),
        }
    }

    #[test]
    fn test_ranked_listing_flattens() {
        let ranked = RankedListing {
            listing: Listing::new("1", "Flat", 300.0),
            distance_km: Some(1.5),
        };

        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["distanceKm"], 1.5);

        let unranked = RankedListing { distance_km: None, ..ranked };
        let json = serde_json::to_value(&unranked).unwrap();
        assert!(json.get("distanceKm").is_none());
    }
}
