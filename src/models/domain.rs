//! Domain records held by the persistent store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant and the ids of its reviews, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub reviews: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Creates a restaurant with a fresh id and no reviews.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a review reference and bumps `updated_at`.
    pub fn push_review(&mut self, review_id: Uuid) {
        self.reviews.push(review_id);
        self.updated_at = Utc::now();
    }
}

/// A review; always owned by exactly one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub review: String,
    pub restaurant_id: Uuid,
}

impl Review {
    pub fn new(review: impl Into<String>, restaurant_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            review: review.into(),
            restaurant_id,
        }
    }
}

/// Listing projection of a restaurant with its reviews expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantWithReviews {
    pub id: Uuid,
    pub name: String,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantWithReviews {
    /// Expands `restaurant`, keeping the order of its review references.
    ///
    /// References without a matching record are skipped.
    pub fn expand<'a, F>(restaurant: &Restaurant, lookup: F) -> Self
    where
        F: Fn(&Uuid) -> Option<&'a Review>,
    {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            reviews: restaurant
                .reviews
                .iter()
                .filter_map(|id| lookup(id).cloned())
                .collect(),
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}
