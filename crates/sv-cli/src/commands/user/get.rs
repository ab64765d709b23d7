use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx
        .client
        .get_user(id)
        .await
        .with_context(|| format!("failed to get user {id}"))?;
    output(&user, flags.format)
}
