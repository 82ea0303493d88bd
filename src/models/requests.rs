//! Request DTOs for the restaurant API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

// == Defaults ==
/// Page used when the query omits `page`
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the query omits `limit`
pub const DEFAULT_LIMIT: u64 = 3;

/// Request body for POST /api/restaurants
///
/// A missing or `null` name deserializes as `None` and is rejected by
/// `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateRestaurantRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The submitted name, empty when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        blank_error("name", self.name())
    }
}

/// Request body for POST /api/restaurants/:id/review
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddReviewRequest {
    #[serde(default)]
    pub review: Option<String>,
}

impl AddReviewRequest {
    pub fn new(review: impl Into<String>) -> Self {
        Self {
            review: Some(review.into()),
        }
    }

    /// The submitted review text, empty when absent.
    pub fn review(&self) -> &str {
        self.review.as_deref().unwrap_or_default()
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        blank_error("review", self.review())
    }
}

fn blank_error(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("Restaurant {field} cannot be blank"))
    } else {
        None
    }
}

/// Query string for GET /api/restaurants
///
/// Kept as raw text so malformed numbers reach validation instead of being
/// rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRestaurantsQuery {
    /// Case-insensitive substring filter on the restaurant name
    pub name: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
}

/// A validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub name: String,
    pub page: u64,
    pub limit: u64,
}

impl ListRestaurantsQuery {
    /// Parses page and limit, applying defaults for absent values.
    ///
    /// Both must be positive integers.
    pub fn parse(&self) -> Result<ListQuery, String> {
        let page = parse_positive(self.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_positive(self.limit.as_deref(), DEFAULT_LIMIT);

        match (page, limit) {
            (Some(page), Some(limit)) => Ok(ListQuery {
                name: self.name.clone().unwrap_or_default(),
                page,
                limit,
            }),
            _ => Err("Page and limit must be positive integers".to_string()),
        }
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> Option<u64> {
    match raw {
        None => Some(default),
        Some(text) => text.trim().parse::<u64>().ok().filter(|n| *n >= 1),
    }
}
