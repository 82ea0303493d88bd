//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Restaurant, RestaurantWithReviews, Review};

use super::{RepositoryError, RestaurantRepository, Result};

#[derive(Debug, Default)]
struct Tables {
    restaurants: HashMap<Uuid, Restaurant>,
    /// Restaurant ids in creation order
    order: Vec<Uuid>,
    /// Exact name -> restaurant id; enforces name uniqueness
    names: HashMap<String, Uuid>,
    reviews: HashMap<Uuid, Review>,
}

fn matches_filter(name: &str, filter: &str) -> bool {
    filter.is_empty() || name.to_lowercase().contains(&filter.to_lowercase())
}

/// In-memory storage backend.
///
/// All tables sit behind one `RwLock`, so the name uniqueness check and the
/// insert happen atomically. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reviews.
    pub async fn review_count(&self) -> usize {
        self.tables.read().await.reviews.len()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRepository {
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>> {
        Ok(self.tables.read().await.restaurants.get(&id).cloned())
    }

    async fn find_restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let tables = self.tables.read().await;
        Ok(tables
            .names
            .get(name)
            .and_then(|id| tables.restaurants.get(id))
            .cloned())
    }

    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.names.contains_key(&restaurant.name) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: restaurant.name.clone(),
            });
        }
        if tables.restaurants.contains_key(&restaurant.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: restaurant.id.to_string(),
            });
        }

        tables.names.insert(restaurant.name.clone(), restaurant.id);
        tables.order.push(restaurant.id);
        tables.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(())
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .restaurants
            .get_mut(&restaurant.id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "Restaurant",
                id: restaurant.id.to_string(),
            })?;

        stored.reviews = restaurant.reviews.clone();
        stored.updated_at = restaurant.updated_at;
        Ok(())
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.reviews.contains_key(&review.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Review",
                id: review.id.to_string(),
            });
        }
        tables.reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn count_restaurants(&self, name_filter: &str) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .restaurants
            .values()
            .filter(|r| matches_filter(&r.name, name_filter))
            .count() as u64)
    }

    async fn list_restaurants(
        &self,
        name_filter: &str,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<RestaurantWithReviews>> {
        let tables = self.tables.read().await;
        Ok(tables
            .order
            .iter()
            .filter_map(|id| tables.restaurants.get(id))
            .filter(|r| matches_filter(&r.name, name_filter))
            .skip(skip as usize)
            .take(limit as usize)
            .map(|r| RestaurantWithReviews::expand(r, |id| tables.reviews.get(id)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(names: &[&str]) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for name in names {
            repo.create_restaurant(&Restaurant::new(*name)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryRepository::new();
        let restaurant = Restaurant::new("Cafe X");

        repo.create_restaurant(&restaurant).await.unwrap();

        assert_eq!(
            repo.find_restaurant(restaurant.id).await.unwrap(),
            Some(restaurant.clone())
        );
        assert_eq!(
            repo.find_restaurant_by_name("Cafe X").await.unwrap(),
            Some(restaurant)
        );
        assert!(repo.find_restaurant_by_name("cafe x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_by_store() {
        let repo = seeded(&["Cafe X"]).await;

        let result = repo.create_restaurant(&Restaurant::new("Cafe X")).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
        assert_eq!(repo.count_restaurants("").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_restaurant() {
        let repo = InMemoryRepository::new();
        let result = repo.update_restaurant(&Restaurant::new("Ghost")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_name_immutable() {
        let repo = seeded(&["Cafe X"]).await;
        let mut restaurant = repo.find_restaurant_by_name("Cafe X").await.unwrap().unwrap();

        restaurant.name = "Renamed".to_string();
        restaurant.push_review(Uuid::new_v4());
        repo.update_restaurant(&restaurant).await.unwrap();

        let stored = repo.find_restaurant(restaurant.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Cafe X");
        assert_eq!(stored.reviews, restaurant.reviews);
        assert!(repo.find_restaurant_by_name("Renamed").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_with_case_insensitive_filter() {
        let repo = seeded(&["Pizza Place", "Sushi Bar", "pizza hut"]).await;

        assert_eq!(repo.count_restaurants("").await.unwrap(), 3);
        assert_eq!(repo.count_restaurants("PIZZA").await.unwrap(), 2);
        assert_eq!(repo.count_restaurants("taco").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_skip_limit_in_creation_order() {
        let names = ["r1", "r2", "r3", "r4", "r5", "r6", "r7"];
        let repo = seeded(&names).await;

        let page: Vec<String> = repo
            .list_restaurants("", 3, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(page, vec!["r4", "r5", "r6"]);

        let last = repo.list_restaurants("", 6, 3).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].name, "r7");
    }

    #[tokio::test]
    async fn test_list_expands_reviews() {
        let repo = InMemoryRepository::new();
        let mut restaurant = Restaurant::new("Cafe X");
        repo.create_restaurant(&restaurant).await.unwrap();

        let review = Review::new("Great food!", restaurant.id);
        repo.create_review(&review).await.unwrap();
        restaurant.push_review(review.id);
        repo.update_restaurant(&restaurant).await.unwrap();

        let listed = repo.list_restaurants("cafe", 0, 3).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reviews, vec![review]);
        assert_eq!(repo.review_count().await, 1);
    }
}
