use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Restaurant, RestaurantWithReviews, Review};

use super::Result;

/// Persistent store for restaurants and their reviews.
///
/// Name filters are case-insensitive substring matches; an empty filter
/// matches every restaurant.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Gets a restaurant by its id.
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>>;

    /// Gets a restaurant by exact, case-sensitive name.
    async fn find_restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>>;

    /// Creates a restaurant. Fails with `AlreadyExists` if the name is taken.
    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()>;

    /// Writes the review list and update time of an existing restaurant.
    ///
    /// Names are fixed at creation.
    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()>;

    /// Creates a review.
    async fn create_review(&self, review: &Review) -> Result<()>;

    /// Counts restaurants matching `name_filter`.
    async fn count_restaurants(&self, name_filter: &str) -> Result<u64>;

    /// Lists matching restaurants in creation order, skipping `skip` and
    /// returning at most `limit`, with reviews expanded.
    async fn list_restaurants(
        &self,
        name_filter: &str,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<RestaurantWithReviews>>;
}
