use anyhow::Context;
use serde::Serialize;
use sv_client::ClientError;
use sv_core::entities::Question;
use sv_core::rerank::{AnswerOrder, RankDelta};
use sv_core::view::{QuestionPage, QuestionPhase};

use crate::cli::root_commands::QuestionArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::search::warn_on_mismatch;
use crate::context::AppContext;
use crate::output::{output_page, page::render_question};
use crate::progress::Progress;
use crate::ui;

#[derive(Debug, Serialize)]
struct AnswerRow {
    rank: usize,
    original_rank: Option<usize>,
    delta: RankDelta,
    answer_id: i64,
    score: i64,
    accepted: bool,
}

#[derive(Debug, Serialize)]
struct QuestionDetailResponse<'a> {
    phase: QuestionPhase,
    order: AnswerOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    rerank_error: Option<&'a str>,
    question: &'a Question,
    answers: Vec<sv_core::rerank::RankedAnswer<'a>>,
}

/// Handle `sv question`.
pub async fn handle(args: &QuestionArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = load(args.id, ctx).await?;
    let page = if args.rerank {
        rerank(page, ctx).await?
    } else {
        page
    };
    let page = match args.order {
        Some(order) => page.with_order(order.into()),
        None => page,
    };

    let Some(question) = page.question() else {
        anyhow::bail!("question {} did not load", args.id);
    };
    warn_on_mismatch(question);

    if let Some(error) = page.rerank_error()
        && flags.format != OutputFormat::Text
        && !flags.quiet
    {
        eprintln!("warning: {error}");
    }

    let answers = page.ranked_answers();
    let rows = answers
        .iter()
        .map(|ranked| AnswerRow {
            rank: ranked.display_rank,
            original_rank: ranked.original_rank,
            delta: ranked.delta,
            answer_id: ranked.answer.answer_id,
            score: ranked.answer.score,
            accepted: ranked.answer.is_accepted,
        })
        .collect::<Vec<_>>();
    let response = QuestionDetailResponse {
        phase: page.phase(),
        order: page.order(),
        rerank_error: page.rerank_error(),
        question,
        answers,
    };

    output_page(&response, &rows, flags.format, || {
        render_question(&page, ui::prefs().color)
    })
}

/// Initial fetch. Failure is fatal for the command.
async fn load(id: i64, ctx: &AppContext) -> anyhow::Result<QuestionPage> {
    let page = QuestionPage::new(id).begin_load()?;
    let progress = Progress::spinner("Loading question...");
    let outcome = ctx.client.get_question(id, false).await;
    if outcome.is_ok() {
        progress.finish_clear();
    } else {
        progress.finish_err("Failed to load question");
    }
    settle_load(&page, outcome)
}

/// Move an outstanding load to `Ready`, or to `Failed` with the failure
/// reported as the page's error.
fn settle_load(
    page: &QuestionPage,
    outcome: Result<Question, ClientError>,
) -> anyhow::Result<QuestionPage> {
    match outcome {
        Ok(question) => Ok(page.load_succeeded(question)?),
        Err(error) => {
            let failed = page.load_failed(format!("failed to load question {}", page.question_id()))?;
            let message = failed.error().unwrap_or("failed to load question").to_string();
            Err(error).context(message)
        }
    }
}

/// Ask for reranked answers. Failure keeps the loaded question and records a
/// warning on the page.
async fn rerank(page: QuestionPage, ctx: &AppContext) -> anyhow::Result<QuestionPage> {
    if !page.can_request_rerank() {
        tracing::info!(question_id = page.question_id(), "answers already reranked");
        return Ok(page);
    }

    let page = page.begin_rerank()?;
    let progress = Progress::spinner("AI is reranking answers based on relevance...");
    match ctx.client.get_question(page.question_id(), true).await {
        Ok(question) => {
            progress.finish_clear();
            if !question.has_reranked() {
                tracing::warn!(
                    question_id = question.question_id,
                    "rerank response carried no reranked answers"
                );
            }
            Ok(page.rerank_succeeded(question)?)
        }
        Err(error) => {
            progress.finish_err("Reranking failed");
            tracing::warn!(%error, "rerank request failed");
            Ok(page.rerank_failed(format!("Failed to rerank answers: {error}"))?)
        }
    }
}
