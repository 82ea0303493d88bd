//! SQLite repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Row;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use crate::models::{Restaurant, RestaurantWithReviews, Review};
use crate::store::{RepositoryError, RestaurantRepository, Result};

use super::error::map_sqlite_error;
use super::schema;

fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_uuid(column: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| conversion_error(column, e))
}

fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

/// Expected columns: id, name, reviews (JSON array of ids), created_at, updated_at
fn row_to_restaurant(row: &Row) -> rusqlite::Result<Restaurant> {
    let id: String = row.get(0)?;
    let reviews: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Restaurant {
        id: parse_uuid(0, &id)?,
        name: row.get(1)?,
        reviews: serde_json::from_str(&reviews).map_err(|e| conversion_error(2, e))?,
        created_at: parse_datetime(3, &created_at)?,
        updated_at: parse_datetime(4, &updated_at)?,
    })
}

/// Expected columns: id, review, restaurant_id
fn row_to_review(row: &Row) -> rusqlite::Result<Review> {
    let id: String = row.get(0)?;
    let restaurant_id: String = row.get(2)?;

    Ok(Review {
        id: parse_uuid(0, &id)?,
        review: row.get(1)?,
        restaurant_id: parse_uuid(2, &restaurant_id)?,
    })
}

fn review_ids_json(restaurant: &Restaurant) -> Result<String> {
    serde_json::to_string(&restaurant.reviews)
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Durable storage backend on a single SQLite database.
///
/// Name filters fold ASCII case only, as SQLite's `lower()` does.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database file at `path` and ensures the schema.
    pub async fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        Ok(Self { conn })
    }

    /// Opens a private in-memory database. Data is lost on drop.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn find_one(&self, query: &'static str, key: String) -> Result<Option<Restaurant>> {
        let id = key.clone();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(query).map_err(wrap_err)?;
                match stmt.query_row([&key], row_to_restaurant) {
                    Ok(restaurant) => Ok(Some(restaurant)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Restaurant", id))
    }
}

#[async_trait]
impl RestaurantRepository for SqliteRepository {
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>> {
        self.find_one(schema::SELECT_RESTAURANT_BY_ID, id.to_string())
            .await
    }

    async fn find_restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        self.find_one(schema::SELECT_RESTAURANT_BY_NAME, name.to_string())
            .await
    }

    async fn create_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let id = restaurant.id.to_string();
        let name = restaurant.name.clone();
        let reviews = review_ids_json(restaurant)?;
        let created_at = restaurant.created_at.to_rfc3339();
        let updated_at = restaurant.updated_at.to_rfc3339();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_RESTAURANT,
                    [&id, &name, &reviews, &created_at, &updated_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Restaurant", restaurant.name.clone()))
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let id = restaurant.id.to_string();
        let reviews = review_ids_json(restaurant)?;
        let updated_at = restaurant.updated_at.to_rfc3339();

        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(schema::UPDATE_RESTAURANT_REVIEWS, [&id, &reviews, &updated_at])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Restaurant", restaurant.id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Restaurant",
                id: restaurant.id.to_string(),
            });
        }
        Ok(())
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        let id = review.id.to_string();
        let text = review.review.clone();
        let restaurant_id = review.restaurant_id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_REVIEW, [&id, &text, &restaurant_id])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Review", review.id.to_string()))
    }

    async fn count_restaurants(&self, name_filter: &str) -> Result<u64> {
        let filter = name_filter.to_string();

        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(schema::COUNT_RESTAURANTS, [&filter], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_restaurants(
        &self,
        name_filter: &str,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<RestaurantWithReviews>> {
        let filter = name_filter.to_string();
        let limit = to_sql_int(limit);
        let skip = to_sql_int(skip);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_RESTAURANT_PAGE)
                    .map_err(wrap_err)?;
                let restaurants: Vec<Restaurant> = stmt
                    .query_map(rusqlite::params![filter, limit, skip], row_to_restaurant)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<_>>()
                    .map_err(wrap_err)?;
                drop(stmt);

                let mut stmt = conn
                    .prepare(schema::SELECT_REVIEWS_BY_RESTAURANT)
                    .map_err(wrap_err)?;
                let mut page = Vec::with_capacity(restaurants.len());
                for restaurant in &restaurants {
                    let reviews: HashMap<Uuid, Review> = stmt
                        .query_map([restaurant.id.to_string()], row_to_review)
                        .map_err(wrap_err)?
                        .map(|row| row.map(|review| (review.id, review)))
                        .collect::<rusqlite::Result<_>>()
                        .map_err(wrap_err)?;
                    page.push(RestaurantWithReviews::expand(restaurant, |id| reviews.get(id)));
                }
                Ok(page)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(names: &[&str]) -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().await.unwrap();
        for name in names {
            repo.create_restaurant(&Restaurant::new(*name)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = SqliteRepository::open_in_memory().await.unwrap();
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
        assert!(repo.find_restaurant(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_name_constraint() {
        let repo = seeded(&["Cafe X"]).await;

        let result = repo.create_restaurant(&Restaurant::new("Cafe X")).await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Restaurant",
                id: "Cafe X".to_string(),
            })
        );
        assert_eq!(repo.count_restaurants("").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_restaurant() {
        let repo = SqliteRepository::open_in_memory().await.unwrap();

        let result = repo.update_restaurant(&Restaurant::new("Ghost")).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_count_and_list_with_filter() {
        let repo = seeded(&["Pizza Place", "Sushi Bar", "pizza hut", "50% Off"]).await;

        assert_eq!(repo.count_restaurants("PIZZA").await.unwrap(), 2);
        assert_eq!(repo.count_restaurants("").await.unwrap(), 4);
        // '%' is matched literally
        assert_eq!(repo.count_restaurants("%").await.unwrap(), 1);

        let page = repo.list_restaurants("pizza", 1, 5).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "pizza hut");
    }

    #[tokio::test]
    async fn test_list_skip_limit_in_creation_order() {
        let repo = seeded(&["A", "B", "C", "D", "E"]).await;

        let page = repo.list_restaurants("", 2, 2).await.unwrap();

        let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[tokio::test]
    async fn test_list_expands_linked_reviews_only() {
        let repo = SqliteRepository::open_in_memory().await.unwrap();
        let mut restaurant = Restaurant::new("Cafe X");
        repo.create_restaurant(&restaurant).await.unwrap();

        let linked = Review::new("Great food!", restaurant.id);
        let orphan = Review::new("Never linked", restaurant.id);
        repo.create_review(&linked).await.unwrap();
        repo.create_review(&orphan).await.unwrap();
        restaurant.push_review(linked.id);
        repo.update_restaurant(&restaurant).await.unwrap();

        let page = repo.list_restaurants("", 0, 3).await.unwrap();

        assert_eq!(page[0].reviews, vec![linked]);
        assert_eq!(
            repo.find_restaurant(restaurant.id).await.unwrap().unwrap(),
            restaurant
        );
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurants.db");
        let path = path.to_str().unwrap();
        let restaurant = Restaurant::new("Cafe X");

        {
            let repo = SqliteRepository::open(path).await.unwrap();
            repo.create_restaurant(&restaurant).await.unwrap();
        }

        let reopened = SqliteRepository::open(path).await.unwrap();
        assert_eq!(
            reopened.find_restaurant(restaurant.id).await.unwrap(),
            Some(restaurant)
        );
        assert!(reopened
            .create_restaurant(&Restaurant::new("Cafe X"))
            .await
            .is_err());
    }
}
