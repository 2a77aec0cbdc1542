use serde::{Deserialize, Serialize};
use validator::Validate;

use super::domain::{
    AdvancedFilter, FilterCriteria, FurnishedState, GeoPosition, Listing, PriceBucket, SimpleFilter,
};
use super::normalize::{
    lenient_page, loose_string, non_empty, null_as_default, parse_count, parse_date, parse_kitchen,
    parse_number,
};

/// Geo position as sent by the browser
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct GeoPositionRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl From<GeoPositionRequest> for GeoPosition {
    fn from(req: GeoPositionRequest) -> Self {
        GeoPosition { lat: req.lat, lon: req.lon }
    }
}

/// Search box input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimpleFilterRequest {
    #[validate(length(max = 200))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_bucket: PriceBucket,
}

/// Advanced filter form exactly as the browser submits it.
///
/// Every field is free text (numbers are accepted too); see
/// [`AdvancedFilterForm::normalize`] for how it becomes an [`AdvancedFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilterForm {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub max_price: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub beds: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub bathrooms: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub kitchen: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub min_size: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub furnished: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub available_from: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

impl AdvancedFilterForm {
    /// Anything blank or unparsable is dropped rather than rejected.
    pub fn normalize(self) -> AdvancedFilter {
        let mut amenities: Vec<String> = self
            .amenities
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        amenities.dedup();

        AdvancedFilter {
            title: non_empty(self.title),
            address: non_empty(self.address),
            min_price: self.min_price.as_deref().and_then(parse_number),
            max_price: self.max_price.as_deref().and_then(parse_number),
            beds: self.beds.as_deref().and_then(parse_count),
            bathrooms: self.bathrooms.as_deref().and_then(parse_count),
            kitchen: self.kitchen.as_deref().and_then(parse_kitchen),
            min_size: self.min_size.as_deref().and_then(parse_number),
            property_type: non_empty(self.property_type),
            furnished: self.furnished.as_deref().and_then(FurnishedState::parse),
            available_from: self.available_from.as_deref().and_then(parse_date),
            amenities,
        }
    }
}

/// Filter input in either mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CriteriaRequest {
    Simple(SimpleFilterRequest),
    Advanced(AdvancedFilterForm),
}

impl Default for CriteriaRequest {
    fn default() -> Self {
        CriteriaRequest::Simple(SimpleFilterRequest::default())
    }
}

impl CriteriaRequest {
    pub fn into_criteria(self) -> FilterCriteria {
        match self {
            CriteriaRequest::Simple(simple) => FilterCriteria::Simple(SimpleFilter {
                query: simple.query,
                price_bucket: simple.price_bucket,
            }),
            CriteriaRequest::Advanced(form) => FilterCriteria::Advanced(form.normalize()),
        }
    }
}

/// Request to search the backend listing snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListingsRequest {
    #[serde(default)]
    pub criteria: CriteriaRequest,
    #[serde(default)]
    pub geo: Option<GeoPositionRequest>,
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: usize,
}

/// Request to rank listings the caller already holds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankListingsRequest {
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub criteria: CriteriaRequest,
    #[serde(default)]
    pub geo: Option<GeoPositionRequest>,
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// Checks the parts of a request that carry validation rules
pub fn validate_search_inputs(
    criteria: &CriteriaRequest,
    geo: Option<&GeoPositionRequest>,
) -> Result<(), validator::ValidationErrors> {
    if let CriteriaRequest::Simple(simple) = criteria {
        simple.validate()?;
    }
    if let Some(geo) = geo {
        geo.validate()?;
    }
    Ok(())
}
