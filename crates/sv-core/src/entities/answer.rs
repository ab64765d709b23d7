use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An answer to a question. Identity is `answer_id`, stable across the
/// original and reranked sequences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Answer {
    pub answer_id: i64,
    pub body: String,
    pub score: i64,
    #[serde(default)]
    pub is_accepted: bool,
}
