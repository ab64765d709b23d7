use serde::Serialize;

use crate::entities::Question;
use crate::errors::CoreError;
use crate::rerank::{AnswerOrder, RankedAnswer, active_order, reconcile};

use super::QuestionPhase;

const PAGE: &str = "question page";

/// View state of a single question and its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPage {
    question_id: i64,
    phase: QuestionPhase,
    question: Option<Question>,
    show_reranked: bool,
    /// Page-level error: content is not rendered.
    error: Option<String>,
    /// Non-blocking rerank error: content stays rendered.
    rerank_error: Option<String>,
}

impl QuestionPage {
    #[must_use]
    pub const fn new(question_id: i64) -> Self {
        Self {
            question_id,
            phase: QuestionPhase::Idle,
            question: None,
            show_reranked: false,
            error: None,
            rerank_error: None,
        }
    }

    #[must_use]
    pub const fn question_id(&self) -> i64 {
        self.question_id
    }

    #[must_use]
    pub const fn phase(&self) -> QuestionPhase {
        self.phase
    }

    #[must_use]
    pub const fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub const fn show_reranked(&self) -> bool {
        self.show_reranked
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn rerank_error(&self) -> Option<&str> {
        self.rerank_error.as_deref()
    }

    fn transition(&self, next: QuestionPhase) -> Result<Self, CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::transition(PAGE, self.phase, next));
        }
        let mut state = self.clone();
        state.phase = next;
        Ok(state)
    }

    /// Start the initial fetch (or a manual retry after a failure).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless idle, failed, or ready.
    pub fn begin_load(&self) -> Result<Self, CoreError> {
        let mut state = self.transition(QuestionPhase::Loading)?;
        state.error = None;
        Ok(state)
    }

    /// The initial fetch returned. The question replaces any earlier copy.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless loading.
    pub fn load_succeeded(&self, question: Question) -> Result<Self, CoreError> {
        let mut state = self.transition(QuestionPhase::Ready)?;
        state.question = Some(question);
        Ok(state)
    }

    /// The initial fetch failed. Blocks content rendering.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless loading.
    pub fn load_failed(&self, message: impl Into<String>) -> Result<Self, CoreError> {
        let mut state = self.transition(QuestionPhase::Failed)?;
        state.question = None;
        state.error = Some(message.into());
        Ok(state)
    }

    /// A rerank may be requested once the question is loaded and has not
    /// been reranked yet.
    #[must_use]
    pub fn can_request_rerank(&self) -> bool {
        self.phase == QuestionPhase::Ready
            && self.question.as_ref().is_some_and(|question| !question.has_reranked())
    }

    /// Start a rerank request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless ready with a question
    /// that has no reranked answers yet.
    pub fn begin_rerank(&self) -> Result<Self, CoreError> {
        if !self.can_request_rerank() {
            return Err(CoreError::transition(
                PAGE,
                self.describe_rerank_block(),
                QuestionPhase::Reranking,
            ));
        }
        let mut state = self.transition(QuestionPhase::Reranking)?;
        state.rerank_error = None;
        Ok(state)
    }

    fn describe_rerank_block(&self) -> String {
        if self.phase == QuestionPhase::Ready && self.question.is_some() {
            format!("{} (already reranked)", self.phase)
        } else {
            self.phase.to_string()
        }
    }

    /// The rerank request returned. Switches to the reranked view only if
    /// the response actually carries reranked answers.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless reranking.
    pub fn rerank_succeeded(&self, question: Question) -> Result<Self, CoreError> {
        let mut state = self.transition(QuestionPhase::Ready)?;
        if question.has_reranked() {
            state.show_reranked = true;
        }
        state.question = Some(question);
        Ok(state)
    }

    /// The rerank request failed. Loaded content is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless reranking.
    pub fn rerank_failed(&self, message: impl Into<String>) -> Result<Self, CoreError> {
        let mut state = self.transition(QuestionPhase::Ready)?;
        state.rerank_error = Some(message.into());
        Ok(state)
    }

    /// Flip between original and reranked order without fetching.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when no reranked answers are loaded.
    pub fn toggle_order(&self) -> Result<Self, CoreError> {
        let has_reranked = self.question.as_ref().is_some_and(Question::has_reranked);
        if self.phase != QuestionPhase::Ready || !has_reranked {
            return Err(CoreError::Validation(String::from(
                "no reranked answers to toggle; request a rerank first",
            )));
        }
        let mut state = self.clone();
        state.show_reranked = !state.show_reranked;
        Ok(state)
    }

    /// Set the order explicitly. Asking for the reranked order before it has
    /// been fetched is accepted and falls back to the original order.
    #[must_use]
    pub fn with_order(&self, order: AnswerOrder) -> Self {
        let mut state = self.clone();
        state.show_reranked = order == AnswerOrder::Reranked;
        state
    }

    /// The order currently displayed.
    #[must_use]
    pub fn order(&self) -> AnswerOrder {
        active_order(
            self.question.as_ref().and_then(Question::reranked),
            self.show_reranked,
        )
    }

    /// Answers to render, with rank badges. Empty while nothing is loaded.
    #[must_use]
    pub fn ranked_answers(&self) -> Vec<RankedAnswer<'_>> {
        self.question.as_ref().map_or_else(Vec::new, |question| {
            reconcile(&question.answers, question.reranked(), self.show_reranked)
        })
    }
}
