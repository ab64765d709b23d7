//! `/users` endpoints.

use serde::Serialize;
use sv_core::entities::{NewUser, User, UserUpdate};
use sv_core::responses::DataEnvelope;

use crate::{ApiClient, error::ClientError, http::check_response, http::decode};

/// Request body wrapper: the API expects `{"user": {...}}`.
#[derive(Serialize)]
struct UserParams<'a, T> {
    user: &'a T,
}

fn user_path(id: i64) -> String {
    format!("/users/{id}")
}

impl ApiClient {
    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let url = self.url("/users");
        tracing::debug!(%url, "listing users");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(decode::<DataEnvelope<Vec<User>>>(resp).await?.into_inner())
    }

    /// Fetch one user by id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_users`]; a missing user is an
    /// [`ClientError::Api`] with status 404.
    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        let url = self.url(&user_path(id));
        tracing::debug!(%url, "fetching user");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(decode::<DataEnvelope<User>>(resp).await?.into_inner())
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_users`]; server-side validation failures come
    /// back as [`ClientError::Api`] with status 422.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let url = self.url("/users");
        tracing::debug!(%url, email = %user.email, "creating user");
        let resp = check_response(
            self.http
                .post(&url)
                .json(&UserParams { user })
                .send()
                .await?,
        )
        .await?;
        Ok(decode::<DataEnvelope<User>>(resp).await?.into_inner())
    }

    /// Update a user's name and/or email.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_user`].
    pub async fn update_user(&self, id: i64, changes: &UserUpdate) -> Result<User, ClientError> {
        let url = self.url(&user_path(id));
        tracing::debug!(%url, "updating user");
        let resp = check_response(
            self.http
                .put(&url)
                .json(&UserParams { user: changes })
                .send()
                .await?,
        )
        .await?;
        Ok(decode::<DataEnvelope<User>>(resp).await?.into_inner())
    }

    /// Delete a user. Any 2xx counts as success.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the API returns a
    /// non-success status.
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&user_path(id));
        tracing::debug!(%url, "deleting user");
        check_response(self.http.delete(&url).send().await?).await?;
        Ok(())
    }

    /// Return the first existing user, creating `fallback` when there are
    /// none.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from listing or creating.
    pub async fn ensure_default_user(&self, fallback: &NewUser) -> Result<User, ClientError> {
        if let Some(user) = self.list_users().await?.into_iter().next() {
            tracing::debug!(user_id = user.id, "using first existing user");
            return Ok(user);
        }
        tracing::info!(email = %fallback.email, "no users found, creating default user");
        self.create_user(fallback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_params_wraps_payload() {
        let new_user = NewUser::new("Ada", "ada@example.com").unwrap();
        let body = serde_json::to_value(UserParams { user: &new_user }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"user": {"email": "ada@example.com", "name": "Ada"}})
        );
    }

    #[test]
    fn partial_update_omits_absent_fields() {
        let changes = UserUpdate {
            email: None,
            name: Some("Grace".into()),
        };
        let body = serde_json::to_value(UserParams { user: &changes }).unwrap();
        assert_eq!(body, serde_json::json!({"user": {"name": "Grace"}}));
    }

    #[test]
    fn user_path_embeds_id() {
        assert_eq!(user_path(17), "/users/17");
    }
}
