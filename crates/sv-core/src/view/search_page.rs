use serde::Serialize;

use crate::entities::Question;
use crate::errors::CoreError;
use crate::preview::{PreviewOptions, QuestionPreview};
use crate::rerank::AnswerOrder;
use crate::responses::SearchResponse;

use super::FetchPhase;

const PAGE: &str = "search page";

/// View state of the question search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    phase: FetchPhase,
    query: String,
    results: Vec<Question>,
    show_reranked: bool,
    requested_rerank: bool,
    note: Option<String>,
    error: Option<String>,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            query: String::new(),
            results: Vec::new(),
            show_reranked: false,
            requested_rerank: false,
            note: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[Question] {
        &self.results
    }

    #[must_use]
    pub const fn show_reranked(&self) -> bool {
        self.show_reranked
    }

    /// Rate-limit notice from the last successful search.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn transition(&self, next: FetchPhase) -> Result<Self, CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::transition(PAGE, self.phase, next));
        }
        let mut state = self.clone();
        state.phase = next;
        Ok(state)
    }

    /// Submit a query. Blank queries are rejected; the stored query is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank query and
    /// [`CoreError::InvalidTransition`] while a search is outstanding.
    pub fn begin_search(&self, query: &str, rerank: bool) -> Result<Self, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::Validation(String::from("search query must not be blank")));
        }
        let mut state = self.transition(FetchPhase::Loading)?;
        state.query = query.to_string();
        state.requested_rerank = rerank;
        state.error = None;
        state.note = None;
        Ok(state)
    }

    /// Store results. The view starts in reranked order iff reranking was
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless a search is outstanding.
    pub fn search_succeeded(&self, response: SearchResponse) -> Result<Self, CoreError> {
        let mut state = self.transition(FetchPhase::Ready)?;
        state.results = response.data;
        state.note = response.meta.note;
        state.show_reranked = state.requested_rerank;
        Ok(state)
    }

    /// Record a failed search. Earlier results are kept.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless a search is outstanding.
    pub fn search_failed(&self, message: impl Into<String>) -> Result<Self, CoreError> {
        let mut state = self.transition(FetchPhase::Failed)?;
        state.error = Some(message.into());
        Ok(state)
    }

    /// Whether any result carries a reranked order.
    #[must_use]
    pub fn has_reranked_results(&self) -> bool {
        self.results.iter().any(Question::has_reranked)
    }

    /// Flip between original and reranked answer order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when no result has reranked answers.
    pub fn toggle_order(&self) -> Result<Self, CoreError> {
        if !self.has_reranked_results() {
            return Err(CoreError::Validation(String::from(
                "no reranked results to toggle; search with rerank first",
            )));
        }
        let mut state = self.clone();
        state.show_reranked = !state.show_reranked;
        Ok(state)
    }

    /// Set the order explicitly.
    #[must_use]
    pub fn with_order(&self, order: AnswerOrder) -> Self {
        let mut state = self.clone();
        state.show_reranked = order == AnswerOrder::Reranked;
        state
    }

    /// Heading for the result list.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.show_reranked {
            "AI-Reranked Results"
        } else {
            "Search Results"
        }
    }

    /// A completed search that found nothing.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.phase == FetchPhase::Ready && self.results.is_empty() && !self.query.is_empty()
    }

    #[must_use]
    pub fn previews(&self, options: PreviewOptions) -> Vec<QuestionPreview> {
        self.results
            .iter()
            .map(|question| QuestionPreview::build(question, self.show_reranked, options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::Answer;
    use crate::responses::SearchMeta;

    fn question(id: i64, reranked: bool) -> Question {
        let answers = vec![
            Answer {
                answer_id: id * 10 + 1,
                body: String::from("a"),
                score: 2,
                is_accepted: true,
            },
            Answer {
                answer_id: id * 10 + 2,
                body: String::from("b"),
                score: 1,
                is_accepted: false,
            },
        ];
        let reranked_answers = reranked.then(|| answers.iter().rev().cloned().collect());
        Question {
            question_id: id,
            title: format!("question {id}"),
            body: String::from("body"),
            answers,
            reranked_answers,
            answer_count: 2,
            accepted_answer_id: None,
        }
    }

    fn response(data: Vec<Question>, note: Option<&str>) -> SearchResponse {
        SearchResponse {
            meta: SearchMeta {
                total: u32::try_from(data.len()).unwrap_or(u32::MAX),
                query: String::from("q"),
                reranked: false,
                note: note.map(str::to_string),
            },
            data,
        }
    }

    #[test]
    fn blank_query_is_rejected() {
        let page = SearchPage::new();
        assert!(matches!(
            page.begin_search("   ", false),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(page.phase(), FetchPhase::Idle);
    }

    #[test]
    fn successful_search_stores_results_and_note() {
        let page = SearchPage::new()
            .begin_search("  lifetimes  ", true)
            .and_then(|page| {
                page.search_succeeded(response(vec![question(1, true)], Some("rate limited")))
            })
            .expect("transitions");
        assert_eq!(page.query(), "lifetimes");
        assert_eq!(page.results().len(), 1);
        assert_eq!(page.note(), Some("rate limited"));
        assert!(page.show_reranked());
        assert_eq!(page.heading(), "AI-Reranked Results");
        assert_eq!(page.previews(PreviewOptions::default())[0].answers[0].answer_id, 12);
    }

    #[test]
    fn new_search_clears_previous_note_and_error() {
        let page = SearchPage::new()
            .begin_search("a", false)
            .and_then(|page| page.search_succeeded(response(vec![], Some("note"))))
            .and_then(|page| page.begin_search("b", false))
            .expect("transitions");
        assert_eq!(page.note(), None);
        assert_eq!(page.error(), None);
    }

    #[test]
    fn failed_search_keeps_previous_results() {
        let page = SearchPage::new()
            .begin_search("a", false)
            .and_then(|page| page.search_succeeded(response(vec![question(1, false)], None)))
            .and_then(|page| page.begin_search("b", false))
            .and_then(|page| page.search_failed("Failed to search questions"))
            .expect("transitions");
        assert_eq!(page.phase(), FetchPhase::Failed);
        assert_eq!(page.results().len(), 1);
        assert_eq!(page.error(), Some("Failed to search questions"));
    }

    #[test]
    fn search_cannot_start_while_outstanding() {
        let page = SearchPage::new().begin_search("a", false).expect("start");
        assert!(matches!(
            page.begin_search("b", false),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn toggle_requires_reranked_results() {
        let plain = SearchPage::new()
            .begin_search("a", false)
            .and_then(|page| page.search_succeeded(response(vec![question(1, false)], None)))
            .expect("transitions");
        assert!(plain.toggle_order().is_err());

        let reranked = SearchPage::new()
            .begin_search("a", false)
            .and_then(|page| page.search_succeeded(response(vec![question(1, true)], None)))
            .expect("transitions");
        assert!(!reranked.show_reranked());
        assert!(reranked.toggle_order().expect("toggle").show_reranked());
    }

    #[test]
    fn empty_result_is_reported() {
        let page = SearchPage::new()
            .begin_search("nothing matches", false)
            .and_then(|page| page.search_succeeded(response(vec![], None)))
            .expect("transitions");
        assert!(page.is_empty_result());
        assert!(!SearchPage::new().is_empty_result());
    }
}
