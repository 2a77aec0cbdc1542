use actix_web::{web, HttpResponse, Responder};
use crate::core::Ranker;
use crate::models::{
    requests::validate_search_inputs, ErrorResponse, GeoPosition, HealthResponse, Listing,
    ListingResponse, RankListingsRequest, RefreshResponse, SearchListingsRequest,
    SearchListingsResponse,
};
use crate::services::{BackendError, CacheError, CacheKey, CacheManager, ListingSource};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ListingSource>,
    pub cache: Arc<CacheManager>,
    pub ranker: Ranker,
}

/// Configure all listing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/listings/search", web::post().to(search_listings))
        .route("/listings/rank", web::post().to(rank_listings))
        .route("/listings/refresh", web::post().to(refresh_listings))
        .route("/listings/{id}", web::get().to(get_listing));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search the published listings
///
/// POST /api/v1/listings/search
///
/// Request body:
/// ```json
/// {
///   "criteria": { "mode": "simple", "query": "loft", "priceBucket": "mid" },
///   "geo": { "lat": 51.5, "lon": -0.12 },
///   "page": 1
/// }
/// ```
async fn search_listings(
    state: web::Data<AppState>,
    req: web::Json<SearchListingsRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = validate_search_inputs(&req.criteria, req.geo.as_ref()) {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return validation_error(errors);
    }

    let listings = match load_listings(&state).await {
        Ok(listings) => listings,
        Err(e) => return backend_error("Failed to load listings", e),
    };

    let criteria = req.criteria.into_criteria();
    let geo = req.geo.map(GeoPosition::from);

    tracing::debug!(
        "Searching {} listings, page {}, geo: {}",
        listings.len(),
        req.page,
        geo.is_some()
    );

    let result = state.ranker.search(&listings, &criteria, geo, req.page);
    let response = SearchListingsResponse::from(result);

    tracing::info!(
        "Returning {} of {} matching listings (page {}/{})",
        response.listings.len(),
        response.total_items,
        response.page,
        response.total_pages
    );

    HttpResponse::Ok().json(response)
}

/// Rank listings supplied by the caller
///
/// POST /api/v1/listings/rank
///
/// Same as search, but the body carries a `listings` array and the backend
/// is never contacted.
async fn rank_listings(
    state: web::Data<AppState>,
    req: web::Json<RankListingsRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = validate_search_inputs(&req.criteria, req.geo.as_ref()) {
        tracing::info!("Validation failed for rank request: {:?}", errors);
        return validation_error(errors);
    }

    let criteria = req.criteria.into_criteria();
    let geo = req.geo.map(GeoPosition::from);

    let result = state.ranker.search(&req.listings, &criteria, geo, req.page);

    HttpResponse::Ok().json(SearchListingsResponse::from(result))
}

/// Fetch a single listing and count the view
///
/// GET /api/v1/listings/{id}
async fn get_listing(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    let listing = match state.source.get_listing(&id).await {
        Ok(listing) => listing,
        Err(e) => return backend_error("Failed to fetch listing", e),
    };

    // View counting is best-effort
    if let Err(e) = state.source.record_view(&id).await {
        tracing::warn!("Failed to record view for listing {}: {}", id, e);
    }

    HttpResponse::Ok().json(ListingResponse { listing })
}

/// Drop the cached listing snapshot
///
/// POST /api/v1/listings/refresh
async fn refresh_listings(state: web::Data<AppState>) -> impl Responder {
    match state.cache.delete(&CacheKey::listings()).await {
        Ok(()) => {
            tracing::info!("Listing snapshot cache cleared");
            HttpResponse::Ok().json(RefreshResponse { success: true })
        }
        Err(e) => {
            tracing::error!("Failed to clear listing cache: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to clear cache".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Cached snapshot if there is one, otherwise a fresh fetch
async fn load_listings(state: &AppState) -> Result<Vec<Listing>, BackendError> {
    let key = CacheKey::listings();

    match state.cache.get::<Vec<Listing>>(&key).await {
        Ok(listings) => return Ok(listings),
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Listing cache unavailable, fetching directly: {}", e),
    }

    let listings = state.source.fetch_listings().await?;

    if let Err(e) = state.cache.set(&key, &listings).await {
        tracing::warn!("Failed to cache listing snapshot: {}", e);
    }

    Ok(listings)
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn backend_error(context: &str, e: BackendError) -> HttpResponse {
    match e {
        BackendError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message,
            status_code: 404,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: context.to_string(),
                message: other.to_string(),
                status_code: 502,
            })
        }
    }
}
