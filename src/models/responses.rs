//! Response DTOs for the restaurant API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use super::domain::{Restaurant, RestaurantWithReviews, Review};

/// Response body for POST /api/restaurants
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantCreatedResponse {
    pub message: String,
    pub restaurant: Restaurant,
}

impl RestaurantCreatedResponse {
    pub fn new(restaurant: Restaurant) -> Self {
        Self {
            message: "Restaurant created successfully".to_string(),
            restaurant,
        }
    }
}

/// Response body for POST /api/restaurants/:id/review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAddedResponse {
    pub message: String,
    pub review: Review,
}

impl ReviewAddedResponse {
    pub fn new(review: Review) -> Self {
        Self {
            message: "Review added successfully".to_string(),
            review,
        }
    }
}

/// Pagination metadata of a listing.
///
/// `page` and `limit` are echoed back as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: String,
    pub limit: String,
    pub total_pages: u64,
}

impl Pagination {
    /// Builds pagination for `total` matching records.
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page: page.to_string(),
            limit: limit.to_string(),
            total_pages: total_pages(total, limit),
        }
    }
}

/// Number of pages needed to show `total` records, `limit` per page.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}

/// Response body for GET /api/restaurants, and the cached listing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPage {
    pub restaurants: Vec<RestaurantWithReviews>,
    pub pagination: Pagination,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Underlying failure, present on server errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
