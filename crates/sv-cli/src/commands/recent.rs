use anyhow::Context;
use sv_core::view::RecentSearchesView;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecentArgs;
use crate::commands::search;
use crate::commands::shared::user::require_user_id;
use crate::context::AppContext;
use crate::output::{output_page, page::render_recent};
use crate::progress::Progress;
use crate::ui;

/// Handle `sv recent`.
pub async fn handle(args: &RecentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_id = require_user_id(args.user, ctx).await?;

    let progress = Progress::spinner("Loading recent searches...");
    let searches = match ctx.client.recent_searches(user_id).await {
        Ok(searches) => {
            progress.finish_clear();
            searches
        }
        Err(error) => {
            progress.finish_err("Failed to load recent searches");
            return Err(error)
                .with_context(|| format!("failed to load recent searches for user {user_id}"));
        }
    };
    let view = RecentSearchesView::from(searches).with_show_all(args.all);

    if let Some(position) = args.rerun {
        let entry = position
            .checked_sub(1)
            .and_then(|index| view.visible().get(index))
            .with_context(|| {
                format!(
                    "no search #{position} in {} ({} listed)",
                    view.heading().to_lowercase(),
                    view.visible().len()
                )
            })?;
        tracing::debug!(query = %entry.query, source = ?entry.source, "re-running search");
        return search::run(&entry.query, Some(user_id), args.rerank, None, ctx, flags).await;
    }

    output_page(&view, view.visible(), flags.format, || {
        render_recent(&view, ui::prefs().color)
    })
}
