//! API Module
//!
//! HTTP handlers and routing for the restaurant REST API.
//!
//! # Endpoints
//! - `POST /api/restaurants` - Create a restaurant
//! - `GET /api/restaurants` - List restaurants with pagination
//! - `POST /api/restaurants/:id/review` - Add a review to a restaurant
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
