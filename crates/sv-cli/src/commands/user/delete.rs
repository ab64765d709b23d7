use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, bail};
use serde::Serialize;
use sv_client::ClientError;
use sv_core::entities::User;
use sv_core::view::UserDirectory;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

use super::fetch_directory;

#[derive(Debug, Serialize)]
struct UserDeleteResponse<'a> {
    id: i64,
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<&'a [User]>,
}

pub async fn run(id: i64, yes: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !yes && !confirm(id)? {
        let declined = UserDeleteResponse {
            id,
            deleted: false,
            users: None,
        };
        return output(&declined, flags.format);
    }

    let directory = fetch_directory(ctx).await?;
    if directory.error().is_none() && directory.find(id).is_none() {
        tracing::warn!(user_id = id, "user is not in the current list");
    }

    let outcome = ctx.client.delete_user(id).await;
    let directory = record_deleted(&directory, id, outcome)?;
    output(
        &UserDeleteResponse {
            id,
            deleted: true,
            users: Some(directory.users()),
        },
        flags.format,
    )
}

/// Drop the deleted user, or record the failure on the directory.
fn record_deleted(
    directory: &UserDirectory,
    id: i64,
    outcome: Result<(), ClientError>,
) -> anyhow::Result<UserDirectory> {
    match outcome {
        Ok(()) => Ok(directory.user_deleted(id)),
        Err(error) => {
            let failed = directory.action_failed(format!("failed to delete user {id}"));
            let message = failed.error().unwrap_or("failed to delete user").to_string();
            Err(error).context(message)
        }
    }
}

fn confirm(id: i64) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        bail!("refusing to delete user {id} without confirmation; pass --yes");
    }

    eprint!("Delete user {id}? [y/N] ");
    std::io::stderr().flush().ok();
    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn directory(ids: &[i64]) -> UserDirectory {
        let users: Vec<User> = ids
            .iter()
            .map(|id| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "email": format!("user{id}@example.com"),
                    "name": format!("User {id}"),
                    "inserted_at": "2025-06-01T10:00:00Z",
                    "updated_at": "2025-06-01T10:00:00Z",
                }))
                .expect("user")
            })
            .collect();
        UserDirectory::new()
            .begin_load()
            .and_then(|dir| dir.loaded(users))
            .expect("transitions")
    }

    #[test]
    fn deleted_user_leaves_the_list() {
        let dir = record_deleted(&directory(&[1, 2]), 1, Ok(())).expect("deleted");
        assert_eq!(dir.users().iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn failed_delete_reports_directory_error() {
        let error = record_deleted(
            &directory(&[1]),
            1,
            Err(ClientError::Api {
                status: 500,
                message: String::from("boom"),
            }),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "failed to delete user 1");
    }

    #[test]
    fn accepts_y_and_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
    }

    #[test]
    fn anything_else_declines() {
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
