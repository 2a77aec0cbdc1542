// HTTP API tests for Rental Ranker

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use rental_ranker::core::Ranker;
use rental_ranker::models::{Listing, ListingResponse, SearchListingsResponse};
use rental_ranker::routes::{configure_routes, AppState};
use rental_ranker::services::{BackendError, CacheKey, CacheManager, ListingSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory listing source that counts backend calls
struct FakeSource {
    listings: Vec<Listing>,
    fetches: AtomicUsize,
    views: AtomicUsize,
    fail_views: bool,
}

impl FakeSource {
    fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fetches: AtomicUsize::new(0),
            views: AtomicUsize::new(0),
            fail_views: false,
        }
    }
}

#[async_trait]
impl ListingSource for FakeSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, BackendError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.listings.clone())
    }

    async fn get_listing(&self, id: &str) -> Result<Listing, BackendError> {
        self.listings
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("Listing {} not found", id)))
    }

    async fn record_view(&self, _id: &str) -> Result<(), BackendError> {
        if self.fail_views {
            return Err(BackendError::ApiError("rpc unavailable".to_string()));
        }
        self.views.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn sample_listings() -> Vec<Listing> {
    let mut a = Listing::new("1", "Canal loft", 1200.0);
    a.latitude = Some(0.0);
    a.longitude = Some(1.0);
    let b = Listing::new("2", "Garden studio", 300.0);
    let mut c = Listing::new("3", "Harbour flat", 700.0);
    c.latitude = Some(0.0);
    c.longitude = Some(0.1);
    vec![a, b, c]
}

fn state_with(source: Arc<FakeSource>) -> AppState {
    state_with_cache(source, Arc::new(CacheManager::in_memory(10, 60)))
}

fn state_with_cache(source: Arc<FakeSource>, cache: Arc<CacheManager>) -> AppState {
    AppState {
        source,
        cache,
        ranker: Ranker::default(),
    }
}

fn response_ids(body: &SearchListingsResponse) -> Vec<&str> {
    body.listings.iter().map(|r| r.listing.id.as_str()).collect()
}

#[actix_web::test]
async fn test_health() {
    let source = Arc::new(FakeSource::new(vec![]));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_search_uses_cached_snapshot() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source.clone())))
            .configure(configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/listings/search")
            .set_json(serde_json::json!({ "criteria": { "mode": "simple" } }))
            .to_request();
        let body: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response_ids(&body), vec!["2", "3", "1"]);
        assert_eq!(body.total_pages, 1);
        assert_eq!(body.page_window, vec![1]);
    }

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    let req = test::TestRequest::post().uri("/api/v1/listings/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/search")
        .set_json(serde_json::json!({}))
        .to_request();
    let _: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_search_with_geo() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/search")
        .set_json(serde_json::json!({
            "criteria": { "mode": "simple", "query": "", "priceBucket": "all" },
            "geo": { "lat": 0.0, "lon": 0.0 },
            "page": 1
        }))
        .to_request();
    let body: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response_ids(&body), vec!["3", "1", "2"]);
    assert!(body.listings[0].distance_km.is_some());
    assert!(body.listings[2].distance_km.is_none());
}

#[actix_web::test]
async fn test_search_rejects_invalid_geo() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/search")
        .set_json(serde_json::json!({ "geo": { "lat": 120.0, "lon": 0.0 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_rank_caller_listings_advanced() {
    let source = Arc::new(FakeSource::new(vec![]));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/rank")
        .set_json(serde_json::json!({
            "listings": [
                { "id": 1, "title": "Canal loft", "price": 1200, "beds": 2 },
                { "id": 2, "title": "Garden studio", "price": 300, "beds": 1 },
                { "id": 3, "title": "Harbour flat", "price": 700, "beds": 2 }
            ],
            "criteria": { "mode": "advanced", "beds": "2", "maxPrice": "" },
            "page": 1
        }))
        .to_request();
    let body: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response_ids(&body), vec!["3", "1"]);
    assert_eq!(body.total_listings, 3);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_get_listing_records_view() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/listings/3").to_request();
    let body: ListingResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.listing.title, "Harbour flat");
    assert_eq!(source.views.load(Ordering::SeqCst), 1);

    let req = test::TestRequest::get().uri("/api/v1/listings/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_get_listing_survives_view_failure() {
    let mut fake = FakeSource::new(sample_listings());
    fake.fail_views = true;
    let source = Arc::new(fake);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/listings/1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_search_falls_back_when_cached_snapshot_is_unreadable() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let cache = Arc::new(CacheManager::in_memory(10, 60));
    cache.set(&CacheKey::listings(), &"not a listing list").await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with_cache(source.clone(), cache)))
            .configure(configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/listings/search")
            .set_json(serde_json::json!({}))
            .to_request();
        let body: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response_ids(&body), vec!["2", "3", "1"]);
    }

    // The direct fetch replaced the bad entry, so the second search hit the cache
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_search_null_criteria_and_negative_page() {
    let source = Arc::new(FakeSource::new(sample_listings()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(source)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/search")
        .set_json(serde_json::json!({
            "criteria": { "mode": "simple", "query": null, "priceBucket": null }
        }))
        .to_request();
    let body: SearchListingsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(response_ids(&body), vec!["2", "3", "1"]);

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/search")
        .set_json(serde_json::json!({ "page": -1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SearchListingsResponse = test::read_body_json(resp).await;
    assert!(body.listings.is_empty());
    assert_eq!(body.total_items, 3);
    assert_eq!(body.page_window, vec![1]);
}
