//! API Handlers
//!
//! HTTP request handlers for the restaurant endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::cache::Cache;
use crate::error::{ApiError, Result};
use crate::models::{
    AddReviewRequest, CreateRestaurantRequest, HealthResponse, ListRestaurantsQuery,
    RestaurantCreatedResponse, RestaurantPage, ReviewAddedResponse,
};
use crate::service::RestaurantService;
use crate::store::RestaurantRepository;

/// Application state shared across all handlers.
///
/// Built once at startup; every clone shares the same store and cache.
#[derive(Clone)]
pub struct AppState {
    pub service: RestaurantService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: RestaurantService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from explicit store and cache handles.
    pub fn with_backends(
        repository: Arc<dyn RestaurantRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
    ) -> Self {
        Self::new(RestaurantService::new(repository, cache, cache_ttl))
    }
}

/// Handler for POST /api/restaurants
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<Json<RestaurantCreatedResponse>> {
    let Json(req) = payload?;
    let restaurant = state
        .service
        .create_restaurant(req)
        .await
        .map_err(|err| ApiError::from_service("Failed to create restaurant", err))?;

    Ok(Json(RestaurantCreatedResponse::new(restaurant)))
}

/// Handler for GET /api/restaurants
///
/// Query: `name` (substring filter), `page` (default 1), `limit` (default 3).
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
    Query(query): Query<ListRestaurantsQuery>,
) -> Result<Json<RestaurantPage>> {
    let page = state
        .service
        .list_restaurants(&query)
        .await
        .map_err(|err| ApiError::from_service("Failed to fetch restaurants", err))?;

    Ok(Json(page))
}

/// Handler for POST /api/restaurants/:id/review
pub async fn add_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewAddedResponse>> {
    let Json(req) = payload?;
    let review = state
        .service
        .add_review(&id, req)
        .await
        .map_err(|err| ApiError::from_service("Failed to add review", err))?;

    Ok(Json(ReviewAddedResponse::new(review)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
