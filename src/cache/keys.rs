//! Cache Key Module
//!
//! Builds the keys under which listing results are cached, and maps keys to
//! the invalidation namespace they belong to.

// == Public Constants ==
/// Namespace shared by every cached restaurant listing.
pub const RESTAURANTS_NAMESPACE: &str = "restaurants";

/// Separator between key segments.
pub const KEY_SEPARATOR: char = ':';

// == List Key ==
/// Builds the cache key for a restaurant listing query.
///
/// The name filter is lowercased so queries differing only in case share an
/// entry, e.g. `restaurants:page=1:limit=3:filter=cafe`.
pub fn list_key(page: u64, limit: u64, name_filter: &str) -> String {
    format!(
        "{RESTAURANTS_NAMESPACE}{KEY_SEPARATOR}page={page}{KEY_SEPARATOR}limit={limit}{KEY_SEPARATOR}filter={}",
        name_filter.to_lowercase()
    )
}

// == Namespace Of ==
/// Returns the invalidation namespace of a key: the text before the first
/// separator, or the whole key when it has none.
pub fn namespace_of(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR)
        .map(|(namespace, _)| namespace)
        .unwrap_or(key)
}
