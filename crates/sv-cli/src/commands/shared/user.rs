use anyhow::Context;
use sv_core::entities::{NewUser, User};

use crate::context::AppContext;

/// Resolve the user a search belongs to: explicit flag, then configured
/// default, then the first user (creating the demo user if none exist).
///
/// Bootstrap failures are logged and yield `None`; searching still works
/// without a user.
pub async fn resolve_user_id(explicit: Option<i64>, ctx: &AppContext) -> Option<i64> {
    if let Some(id) = explicit.or(ctx.config.general.default_user_id) {
        return Some(id);
    }

    match default_user(ctx).await {
        Ok(user) => {
            tracing::debug!(user_id = user.id, email = %user.email, "resolved default user");
            Some(user.id)
        }
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "could not resolve a default user");
            None
        }
    }
}

/// Like [`resolve_user_id`], but a user is required.
pub async fn require_user_id(explicit: Option<i64>, ctx: &AppContext) -> anyhow::Result<i64> {
    resolve_user_id(explicit, ctx)
        .await
        .context("no user available; pass --user or set general.default_user_id")
}

async fn default_user(ctx: &AppContext) -> anyhow::Result<User> {
    let general = &ctx.config.general;
    let fallback = NewUser::new(&general.demo_user_name, &general.demo_user_email)
        .context("invalid demo user in configuration")?;
    ctx.client
        .ensure_default_user(&fallback)
        .await
        .context("failed to load or create the default user")
}
