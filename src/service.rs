//! Restaurant Service
//!
//! The write flows (create restaurant, add review) and the cached read flow
//! (list restaurants). Writes commit to the store before invalidating the
//! listing namespace; reads go through the cache-aside helper.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{get_or_set, invalidate, list_key, Cache, CacheError, RESTAURANTS_NAMESPACE};
use crate::models::{
    AddReviewRequest, CreateRestaurantRequest, ListQuery, ListRestaurantsQuery, Pagination,
    Restaurant, RestaurantPage, Review,
};
use crate::store::{RepositoryError, RestaurantRepository};

const DUPLICATE_RESTAURANT: &str = "Restaurant already exists";
const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

// == Service Error ==
/// Failures of the restaurant flows.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected input; nothing was read or written
    #[error("{0}")]
    Validation(String),

    /// The restaurant name is already taken
    #[error("{0}")]
    Conflict(String),

    /// The referenced restaurant does not exist
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == Restaurant Service ==
/// Restaurant and review operations over an explicit store and cache.
#[derive(Clone)]
pub struct RestaurantService {
    repository: Arc<dyn RestaurantRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
}

impl RestaurantService {
    /// Creates a service; listings are cached for `cache_ttl`.
    pub fn new(
        repository: Arc<dyn RestaurantRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    // == Create Restaurant ==
    /// Persists a new restaurant, then invalidates cached listings.
    ///
    /// A taken name yields `Conflict` without touching the cache.
    pub async fn create_restaurant(
        &self,
        request: CreateRestaurantRequest,
    ) -> Result<Restaurant, ServiceError> {
        if let Some(message) = request.validate() {
            return Err(ServiceError::Validation(message));
        }

        if self
            .repository
            .find_restaurant_by_name(request.name())
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(DUPLICATE_RESTAURANT.to_string()));
        }

        let restaurant = Restaurant::new(request.name());
        match self.repository.create_restaurant(&restaurant).await {
            Ok(()) => {}
            // Lost the race against a concurrent create with the same name
            Err(RepositoryError::AlreadyExists { .. }) => {
                return Err(ServiceError::Conflict(DUPLICATE_RESTAURANT.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        invalidate(self.cache.as_ref(), RESTAURANTS_NAMESPACE).await?;

        info!(restaurant_id = %restaurant.id, name = %restaurant.name, "Restaurant created");
        Ok(restaurant)
    }

    // == Add Review ==
    /// Persists a review for `restaurant_id`, links it to the restaurant,
    /// then invalidates cached listings.
    ///
    /// If linking fails the review stays stored without a reference.
    pub async fn add_review(
        &self,
        restaurant_id: &str,
        request: AddReviewRequest,
    ) -> Result<Review, ServiceError> {
        if let Some(message) = request.validate() {
            return Err(ServiceError::Validation(message));
        }

        let not_found = || ServiceError::NotFound(RESTAURANT_NOT_FOUND.to_string());
        let id = Uuid::parse_str(restaurant_id).map_err(|_| not_found())?;
        let mut restaurant = self
            .repository
            .find_restaurant(id)
            .await?
            .ok_or_else(not_found)?;

        let review = Review::new(request.review(), restaurant.id);
        self.repository.create_review(&review).await?;

        restaurant.push_review(review.id);
        if let Err(err) = self.repository.update_restaurant(&restaurant).await {
            warn!(review_id = %review.id, restaurant_id = %id, error = %err, "Review stored but not linked to restaurant");
            return Err(err.into());
        }

        invalidate(self.cache.as_ref(), RESTAURANTS_NAMESPACE).await?;

        info!(review_id = %review.id, restaurant_id = %id, "Review added");
        Ok(review)
    }

    // == List Restaurants ==
    /// Returns one page of restaurants matching the name filter, served
    /// from the cache when an unexpired entry exists.
    pub async fn list_restaurants(
        &self,
        query: &ListRestaurantsQuery,
    ) -> Result<RestaurantPage, ServiceError> {
        let ListQuery { name, page, limit } = query.parse().map_err(ServiceError::Validation)?;
        let key = list_key(page, limit, &name);
        let repository = &self.repository;

        get_or_set(self.cache.as_ref(), &key, Some(self.cache_ttl), || async move {
            let total = repository.count_restaurants(&name).await?;
            let skip = (page - 1).saturating_mul(limit);
            let restaurants = repository.list_restaurants(&name, skip, limit).await?;

            debug!(total, returned = restaurants.len(), "Fetched restaurants from store");

            Ok::<_, ServiceError>(RestaurantPage {
                restaurants,
                pagination: Pagination::new(page, limit, total),
            })
        })
        .await
    }
}
