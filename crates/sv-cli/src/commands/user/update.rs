use anyhow::{Context, bail};
use sv_core::entities::UserUpdate;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let changes = build_update(name, email)?;
    let user = ctx
        .client
        .update_user(id, &changes)
        .await
        .with_context(|| format!("failed to update user {id}"))?;
    output(&user, flags.format)
}

fn build_update(name: Option<&str>, email: Option<&str>) -> anyhow::Result<UserUpdate> {
    let clean = |value: Option<&str>, field: &str| -> anyhow::Result<Option<String>> {
        match value.map(str::trim) {
            Some("") => bail!("--{field} must not be blank"),
            other => Ok(other.map(str::to_string)),
        }
    };
    let changes = UserUpdate {
        email: clean(email, "email")?,
        name: clean(name, "name")?,
    };
    if changes.is_empty() {
        bail!("nothing to update; pass --name and/or --email");
    }
    Ok(changes)
}
