use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Entry from the backend's bounded recent-search cache.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CachedSearch {
    pub query: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
}

/// Row from the backend's full search history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoredSearch {
    pub id: i64,
    pub query: String,
    pub user_id: i64,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub searched_at: DateTime<Utc>,
}

/// The two parallel search lists for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecentSearches {
    #[serde(default)]
    pub cache: Vec<CachedSearch>,
    #[serde(default)]
    pub database: Vec<StoredSearch>,
}

/// Which list a [`SearchEntry`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    Cache,
    History,
}

/// A search normalized from either list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchEntry {
    /// History row id. Cache entries have none.
    pub id: Option<i64>,
    pub query: String,
    pub user_id: i64,
    pub searched_at: DateTime<Utc>,
    pub source: SearchSource,
}

impl From<CachedSearch> for SearchEntry {
    fn from(entry: CachedSearch) -> Self {
        Self {
            id: None,
            query: entry.query,
            user_id: entry.user_id,
            searched_at: entry.timestamp,
            source: SearchSource::Cache,
        }
    }
}

impl From<StoredSearch> for SearchEntry {
    fn from(entry: StoredSearch) -> Self {
        Self {
            id: Some(entry.id),
            query: entry.query,
            user_id: entry.user_id,
            searched_at: entry.searched_at,
            source: SearchSource::History,
        }
    }
}
