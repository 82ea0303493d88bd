//! Domain records plus the request and response models of the API
//!
//! This module defines the stored records and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{Restaurant, RestaurantWithReviews, Review};
pub use requests::{AddReviewRequest, CreateRestaurantRequest, ListQuery, ListRestaurantsQuery};
pub use responses::{
    ErrorResponse, HealthResponse, Pagination, RestaurantCreatedResponse, RestaurantPage,
    ReviewAddedResponse,
};
