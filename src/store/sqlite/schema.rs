//! SQL statements used by the SQLite repository.

/// Creates the tables. `seq` preserves insertion order for listings and the
/// UNIQUE constraint on `name` backs duplicate detection.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS restaurants (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE,
    reviews TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY,
    review TEXT NOT NULL,
    restaurant_id TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reviews_restaurant_id ON reviews(restaurant_id);
"#;

pub const INSERT_RESTAURANT: &str = r#"
INSERT INTO restaurants (id, name, reviews, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_RESTAURANT_BY_ID: &str = r#"
SELECT id, name, reviews, created_at, updated_at
FROM restaurants
WHERE id = ?1
"#;

pub const SELECT_RESTAURANT_BY_NAME: &str = r#"
SELECT id, name, reviews, created_at, updated_at
FROM restaurants
WHERE name = ?1
"#;

pub const UPDATE_RESTAURANT_REVIEWS: &str = r#"
UPDATE restaurants
SET reviews = ?2, updated_at = ?3
WHERE id = ?1
"#;

// An empty filter matches everything; instr avoids LIKE wildcards in names
pub const COUNT_RESTAURANTS: &str = r#"
SELECT COUNT(*)
FROM restaurants
WHERE ?1 = '' OR instr(lower(name), lower(?1)) > 0
"#;

pub const SELECT_RESTAURANT_PAGE: &str = r#"
SELECT id, name, reviews, created_at, updated_at
FROM restaurants
WHERE ?1 = '' OR instr(lower(name), lower(?1)) > 0
ORDER BY seq ASC
LIMIT ?2 OFFSET ?3
"#;

pub const INSERT_REVIEW: &str = r#"
INSERT INTO reviews (id, review, restaurant_id)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_REVIEWS_BY_RESTAURANT: &str = r#"
SELECT id, review, restaurant_id
FROM reviews
WHERE restaurant_id = ?1
"#;
