//! API Routes
//!
//! Configures the Axum router with the restaurant endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_review_handler, create_restaurant_handler, health_handler, list_restaurants_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/restaurants` - Create a restaurant
/// - `GET /api/restaurants` - List restaurants (cached)
/// - `POST /api/restaurants/:id/review` - Add a review
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/restaurants",
            get(list_restaurants_handler).post(create_restaurant_handler),
        )
        .route("/api/restaurants/:id/review", post(add_review_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
