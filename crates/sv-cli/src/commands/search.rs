use anyhow::Context;
use serde::Serialize;
use sv_client::ClientError;
use sv_core::entities::Question;
use sv_core::preview::{PreviewOptions, QuestionPreview};
use sv_core::rerank::{AnswerOrder, validate_permutation};
use sv_core::responses::SearchResponse;
use sv_core::view::SearchPage;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::user::resolve_user_id;
use crate::context::AppContext;
use crate::output::{output_page, page::render_search};
use crate::progress::Progress;
use crate::ui;

#[derive(Debug, Serialize)]
struct SearchResultsResponse {
    query: String,
    heading: &'static str,
    order: AnswerOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    total: usize,
    results: Vec<QuestionPreview>,
}

#[derive(Debug, Serialize)]
struct SearchRow {
    question_id: i64,
    title: String,
    votes: i64,
    answers: u32,
    order: AnswerOrder,
}

/// Handle `sv search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_id = resolve_user_id(args.user, ctx).await;
    run(
        &args.query_text(),
        user_id,
        args.rerank,
        args.order.map(AnswerOrder::from),
        ctx,
        flags,
    )
    .await
}

/// Search, then print the result page. Shared with `sv recent --rerun`.
pub async fn run(
    query: &str,
    user_id: Option<i64>,
    rerank: bool,
    order: Option<AnswerOrder>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let page = SearchPage::new().begin_search(query, rerank)?;

    let progress = Progress::spinner(if rerank {
        "Searching and reranking answers..."
    } else {
        "Searching..."
    });
    let outcome = ctx.client.search(page.query(), user_id, rerank).await;
    if outcome.is_ok() {
        progress.finish_clear();
    } else {
        progress.finish_err("Search failed");
    }
    let mut page = settle(&page, outcome)?;
    if let Some(order) = order {
        if order == AnswerOrder::Reranked && !page.has_reranked_results() {
            tracing::warn!("no reranked answers in these results; showing original order");
        }
        page = page.with_order(order);
    }
    page.results().iter().for_each(warn_on_mismatch);

    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let options = PreviewOptions::default();
    let previews = page.previews(options);

    let response = SearchResultsResponse {
        query: page.query().to_string(),
        heading: page.heading(),
        order: if page.show_reranked() && page.has_reranked_results() {
            AnswerOrder::Reranked
        } else {
            AnswerOrder::Original
        },
        note: page.note().map(str::to_string),
        total: previews.len(),
        results: previews.into_iter().take(limit).collect(),
    };
    let rows = response
        .results
        .iter()
        .map(|preview| SearchRow {
            question_id: preview.question_id,
            title: preview.title.clone(),
            votes: preview.total_votes,
            answers: preview.answer_count,
            order: preview.order,
        })
        .collect::<Vec<_>>();

    output_page(&response, &rows, flags.format, || {
        render_search(&page, options, limit, ui::prefs().color)
    })
}

/// Move an outstanding search to `Ready`, or to `Failed` with the failure
/// reported as the page's error.
fn settle(
    page: &SearchPage,
    outcome: Result<SearchResponse, ClientError>,
) -> anyhow::Result<SearchPage> {
    match outcome {
        Ok(response) => Ok(page.search_succeeded(response)?),
        Err(error) => {
            let failed = page.search_failed(format!("search for \"{}\" failed", page.query()))?;
            let message = failed.error().unwrap_or("search failed").to_string();
            Err(error).context(message)
        }
    }
}

/// Reranked answers that are not a permutation of the originals are still
/// displayed, but worth a log line.
pub fn warn_on_mismatch(question: &Question) {
    if let Some(reranked) = question.reranked()
        && let Err(error) = validate_permutation(&question.answers, reranked)
    {
        tracing::warn!(question_id = question.question_id, %error, "reranked answers do not match originals");
    }
}
