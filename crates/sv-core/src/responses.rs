//! Response envelopes returned by the question/user API.
//!
//! Every endpoint wraps its payload in `{"data": ...}`. Search additionally
//! carries a `meta` block, including an optional rate-limit note.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Question, RecentSearches};

/// Generic `{"data": T}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Metadata attached to a question search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchMeta {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub reranked: bool,
    /// Rate-limit or degradation notice surfaced by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response from `GET /questions/search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResponse {
    pub data: Vec<Question>,
    #[serde(default)]
    pub meta: SearchMeta,
}

/// Response from `GET /questions/recent-searches`.
pub type RecentSearchesResponse = DataEnvelope<RecentSearches>;
