mod create;
mod delete;
mod get;
mod list;
mod update;

use sv_core::view::UserDirectory;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;

/// Handle `sv user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::List => list::run(ctx, flags).await,
        UserCommands::Get { id } => get::run(*id, ctx, flags).await,
        UserCommands::Create { name, email } => create::run(name, email, ctx, flags).await,
        UserCommands::Update { id, name, email } => {
            update::run(*id, name.as_deref(), email.as_deref(), ctx, flags).await
        }
        UserCommands::Delete { id, yes } => delete::run(*id, *yes, ctx, flags).await,
    }
}

/// Current user list. A failed load is kept as a `Failed` directory so
/// create/delete can still go ahead.
async fn fetch_directory(ctx: &AppContext) -> anyhow::Result<UserDirectory> {
    let directory = UserDirectory::new().begin_load()?;
    Ok(match ctx.client.list_users().await {
        Ok(users) => directory.loaded(users)?,
        Err(error) => directory.load_failed(format!("failed to list users: {error}"))?,
    })
}
