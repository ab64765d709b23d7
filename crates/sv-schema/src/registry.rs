//! Central schema registry for the question/user API payloads.
//!
//! The `SchemaRegistry` builds JSON Schemas from sv-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use sv_core::entities::{
    Answer, CachedSearch, NewUser, Question, RecentSearches, SearchEntry, StoredSearch, User,
    UserUpdate,
};
use sv_core::responses::{DataEnvelope, RecentSearchesResponse, SearchMeta, SearchResponse};

use crate::error::SchemaError;

/// Store of every wire schema, keyed by a snake_case name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing all entity and response schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity types (9) ---
        register!(schemas, "answer", Answer);
        register!(schemas, "question", Question);
        register!(schemas, "user", User);
        register!(schemas, "new_user", NewUser);
        register!(schemas, "user_update", UserUpdate);
        register!(schemas, "cached_search", CachedSearch);
        register!(schemas, "stored_search", StoredSearch);
        register!(schemas, "recent_searches", RecentSearches);
        register!(schemas, "search_entry", SearchEntry);

        // --- Response envelopes (6) ---
        register!(schemas, "question_response", DataEnvelope<Question>);
        register!(schemas, "user_response", DataEnvelope<User>);
        register!(schemas, "user_list_response", DataEnvelope<Vec<User>>);
        register!(schemas, "search_meta", SearchMeta);
        register!(schemas, "search_response", SearchResponse);
        register!(schemas, "recent_searches_response", RecentSearchesResponse);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
