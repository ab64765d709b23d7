use serde::Serialize;
use sv_core::entities::User;
use sv_core::view::FetchPhase;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

use super::fetch_directory;

#[derive(Debug, Serialize)]
struct UserListResponse<'a> {
    users: &'a [User],
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let directory = fetch_directory(ctx).await?;
    if directory.phase() == FetchPhase::Failed {
        anyhow::bail!("{}", directory.error().unwrap_or("failed to list users"));
    }

    if let Some(first) = directory.first() {
        tracing::debug!(user_id = first.id, "default user is the first listed");
    }
    output(
        &UserListResponse {
            users: directory.users(),
        },
        flags.format,
    )
}
