use anyhow::Context;
use serde::Serialize;
use sv_client::ClientError;
use sv_core::entities::{NewUser, User};
use sv_core::view::UserDirectory;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

use super::fetch_directory;

#[derive(Debug, Serialize)]
struct UserCreateResponse<'a> {
    user: &'a User,
    users: &'a [User],
}

pub async fn run(name: &str, email: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let new_user = NewUser::new(name, email)?;
    let directory = fetch_directory(ctx).await?;
    if let Some(error) = directory.error() {
        tracing::warn!(%error, "creating user without the current list");
    }

    let outcome = ctx.client.create_user(&new_user).await;
    let (directory, user) = record_created(&directory, &new_user, outcome)?;
    tracing::info!(user_id = user.id, total = directory.users().len(), "user created");
    output(
        &UserCreateResponse {
            user: &user,
            users: directory.users(),
        },
        flags.format,
    )
}

/// Append the created user, or record the failure on the directory.
fn record_created(
    directory: &UserDirectory,
    new_user: &NewUser,
    outcome: Result<User, ClientError>,
) -> anyhow::Result<(UserDirectory, User)> {
    match outcome {
        Ok(user) => Ok((directory.user_created(user.clone()), user)),
        Err(error) => {
            let failed = directory.action_failed(format!("failed to create user {}", new_user.email));
            let message = failed.error().unwrap_or("failed to create user").to_string();
            Err(error).context(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn user(id: i64) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email": format!("user{id}@example.com"),
            "name": format!("User {id}"),
            "inserted_at": "2025-06-01T10:00:00Z",
            "updated_at": "2025-06-01T10:00:00Z",
        }))
        .expect("user")
    }

    fn directory() -> UserDirectory {
        UserDirectory::new()
            .begin_load()
            .and_then(|dir| dir.loaded(vec![user(1)]))
            .expect("transitions")
    }

    #[test]
    fn created_user_is_appended() {
        let new_user = NewUser::new("User 2", "user2@example.com").expect("valid");
        let (dir, created) = record_created(&directory(), &new_user, Ok(user(2))).expect("created");
        assert_eq!(created.id, 2);
        assert_eq!(dir.users().iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn failed_create_reports_directory_error() {
        let new_user = NewUser::new("User 2", "user2@example.com").expect("valid");
        let error = record_created(
            &directory(),
            &new_user,
            Err(ClientError::Api {
                status: 422,
                message: String::from("email has already been taken"),
            }),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "failed to create user user2@example.com");
        assert!(format!("{error:#}").contains("already been taken"));
    }
}
