use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// FetchPhase
// ---------------------------------------------------------------------------

/// Lifecycle of a page backed by a single request.
///
/// ```text
/// idle → loading → ready → loading (refetch)
///                → failed → loading (manual retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl FetchPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle | Self::Ready | Self::Failed => &[Self::Loading],
            Self::Loading => &[Self::Ready, Self::Failed],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionPhase
// ---------------------------------------------------------------------------

/// Lifecycle of the question page.
///
/// ```text
/// idle → loading → ready ⇄ reranking
///                → failed → loading
/// ```
///
/// A rerank runs only from `ready` and always returns to `ready`, whether
/// it succeeded or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPhase {
    Idle,
    Loading,
    Ready,
    Reranking,
    Failed,
}

impl QuestionPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle | Self::Failed => &[Self::Loading],
            Self::Loading => &[Self::Ready, Self::Failed],
            Self::Ready => &[Self::Loading, Self::Reranking],
            Self::Reranking => &[Self::Ready],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Reranking => "reranking",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for QuestionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
