use clap::{Args, Subcommand, ValueEnum};
use sv_core::rerank::AnswerOrder;

use crate::cli::subcommands::UserCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search questions, optionally reranking answers.
    Search(SearchArgs),
    /// Show one question with its answers.
    Question(QuestionArgs),
    /// Recent and historical searches for a user.
    Recent(RecentArgs),
    /// User management.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Print JSON Schemas for the API payloads.
    Schema(SchemaArgs),
}

/// Answer order to display when reranked answers are present.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OrderArg {
    Original,
    Reranked,
}

impl From<OrderArg> for AnswerOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Original => Self::Original,
            OrderArg::Reranked => Self::Reranked,
        }
    }
}

/// Arguments for `sv search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Search terms (joined with spaces).
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
    /// User the search is recorded for (defaults to config, then the first user).
    #[arg(long)]
    pub user: Option<i64>,
    /// Ask the backend to rerank each question's answers.
    #[arg(long)]
    pub rerank: bool,
    /// Display order (defaults to reranked when --rerank is set).
    #[arg(long)]
    pub order: Option<OrderArg>,
}

impl SearchArgs {
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `sv question`.
#[derive(Clone, Debug, Args)]
pub struct QuestionArgs {
    pub id: i64,
    /// Request AI reranking after the question loads.
    #[arg(long)]
    pub rerank: bool,
    /// Display order (defaults to reranked when reranking succeeded).
    #[arg(long)]
    pub order: Option<OrderArg>,
}

/// Arguments for `sv recent`.
#[derive(Clone, Debug, Args)]
pub struct RecentArgs {
    #[arg(long)]
    pub user: Option<i64>,
    /// Show the full search history instead of the recent cache.
    #[arg(long)]
    pub all: bool,
    /// Re-run the Nth listed search (1-based).
    #[arg(long)]
    pub rerun: Option<usize>,
    /// Rerank when re-running.
    #[arg(long, requires = "rerun")]
    pub rerank: bool,
}

/// Arguments for `sv schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (see --list).
    pub name: Option<String>,
    /// List registered schema names.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}
