use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A user searches are attributed to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub inserted_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    /// Build a create payload, rejecting blank fields.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name or email is blank.
    pub fn new(name: &str, email: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(String::from("user name must not be blank")));
        }
        if email.is_empty() {
            return Err(CoreError::Validation(String::from("user email must not be blank")));
        }
        Ok(Self {
            email: email.to_string(),
            name: name.to_string(),
        })
    }
}

/// Partial update payload. Absent fields are left unchanged server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserUpdate {
    /// Whether the update carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}
