use crate::models::{AdvancedFilter, FilterCriteria, Listing, SimpleFilter};

/// Check if a listing passes the active filter mode
#[inline]
pub fn matches_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    match criteria {
        FilterCriteria::Simple(simple) => matches_simple(listing, simple),
        FilterCriteria::Advanced(advanced) => matches_advanced(listing, advanced),
    }
}

/// Search box: text in title, area or address, plus the price band
#[inline]
pub fn matches_simple(listing: &Listing, filter: &SimpleFilter) -> bool {
    if !filter.query.is_empty() {
        let needle = filter.query.to_lowercase();
        let found = contains_ci(&listing.title, &needle)
            || contains_ci(&listing.area, &needle)
            || contains_ci(&listing.address, &needle);
        if !found {
            return false;
        }
    }

    filter.price_bucket.contains(listing.price)
}

/// Advanced form: every constraint that is set must hold
pub fn matches_advanced(listing: &Listing, filter: &AdvancedFilter) -> bool {
    if let Some(title) = non_blank(&filter.title) {
        if !contains_ci(&listing.title, &title.to_lowercase()) {
            return false;
        }
    }

    if let Some(address) = non_blank(&filter.address) {
        if !contains_ci(&listing.address, &address.to_lowercase()) {
            return false;
        }
    }

    // Price range (inclusive)
    if let Some(min) = applied(filter.min_price) {
        if !(listing.price >= min) {
            return false;
        }
    }
    if let Some(max) = applied(filter.max_price) {
        if !(listing.price <= max) {
            return false;
        }
    }

    if filter.beds.is_some_and(|beds| listing.beds != beds) {
        return false;
    }

    if filter.bathrooms.is_some_and(|baths| listing.bathrooms != baths) {
        return false;
    }

    if filter.kitchen.is_some_and(|kitchen| listing.kitchen != kitchen) {
        return false;
    }

    // A listing without a known size cannot satisfy a minimum size
    if let Some(min_size) = applied(filter.min_size) {
        match listing.size_sqm {
            Some(size) if size >= min_size => {}
            _ => return false,
        }
    }

    if let Some(property_type) = non_blank(&filter.property_type) {
        if listing.property_type != property_type {
            return false;
        }
    }

    if filter.furnished.is_some_and(|furnished| listing.furnished != furnished) {
        return false;
    }

    // Listings without a date are available now
    if let (Some(wanted), Some(available)) = (filter.available_from, listing.available_from) {
        if available < wanted {
            return false;
        }
    }

    filter
        .amenities
        .iter()
        .filter(|a| !a.is_empty())
        .all(|amenity| listing.has_amenity(amenity))
}

#[inline]
fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

#[inline]
fn applied(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| !b.is_nan())
}

#[inline]
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
