//! Question previews for result lists.
//!
//! A preview is the card shown for each search hit: a truncated body, vote
//! and answer totals, and the first few answers in the active order.

use serde::Serialize;

use crate::entities::{Answer, Question};
use crate::rerank::{AnswerOrder, active_order};

/// Default body excerpt length, in characters.
pub const DEFAULT_BODY_CHARS: usize = 200;

/// Default answer excerpt length, in characters.
pub const DEFAULT_ANSWER_CHARS: usize = 150;

/// Default number of answers shown per preview.
pub const DEFAULT_PREVIEW_ANSWERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub body_chars: usize,
    pub answer_chars: usize,
    pub answers: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            body_chars: DEFAULT_BODY_CHARS,
            answer_chars: DEFAULT_ANSWER_CHARS,
            answers: DEFAULT_PREVIEW_ANSWERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerPreview {
    pub answer_id: i64,
    pub excerpt: String,
    pub score: i64,
    pub is_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPreview {
    pub question_id: i64,
    pub title: String,
    pub excerpt: String,
    pub total_votes: i64,
    pub answer_count: u32,
    pub order: AnswerOrder,
    pub answers: Vec<AnswerPreview>,
    /// Active answers not included in `answers`.
    pub remaining: usize,
}

impl QuestionPreview {
    #[must_use]
    pub fn build(question: &Question, show_reranked: bool, options: PreviewOptions) -> Self {
        let order = active_order(question.reranked(), show_reranked);
        let active = question.active_answers(show_reranked);
        let answers = active
            .iter()
            .take(options.answers)
            .map(|answer| answer_preview(answer, options.answer_chars))
            .collect::<Vec<_>>();

        Self {
            question_id: question.question_id,
            title: question.title.clone(),
            excerpt: truncate_text(&question.body, options.body_chars),
            total_votes: question.total_votes(),
            answer_count: question.answer_count,
            order,
            remaining: active.len().saturating_sub(answers.len()),
            answers,
        }
    }
}

fn answer_preview(answer: &Answer, max_chars: usize) -> AnswerPreview {
    AnswerPreview {
        answer_id: answer.answer_id,
        excerpt: truncate_text(&answer.body, max_chars),
        score: answer.score,
        is_accepted: answer.is_accepted,
    }
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// `"1 answer"`, `"3 answers"`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn answer(id: i64, score: i64, body: &str) -> Answer {
        Answer {
            answer_id: id,
            body: body.to_string(),
            score,
            is_accepted: id == 2,
        }
    }

    fn question() -> Question {
        Question {
            question_id: 77,
            title: String::from("How do I borrow twice?"),
            body: "x".repeat(250),
            answers: vec![answer(1, 10, "first"), answer(2, 4, "second"), answer(3, 1, "third")],
            reranked_answers: Some(vec![
                answer(3, 1, "third"),
                answer(1, 10, "first"),
                answer(2, 4, "second"),
            ]),
            answer_count: 3,
            accepted_answer_id: Some(2),
        }
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn preview_uses_original_order_by_default() {
        let preview = QuestionPreview::build(&question(), false, PreviewOptions::default());
        assert_eq!(preview.order, AnswerOrder::Original);
        assert_eq!(preview.excerpt.chars().count(), 203);
        assert_eq!(preview.total_votes, 15);
        assert_eq!(
            preview.answers.iter().map(|a| a.answer_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(preview.remaining, 1);
    }

    #[test]
    fn preview_follows_reranked_order_when_shown() {
        let preview = QuestionPreview::build(&question(), true, PreviewOptions::default());
        assert_eq!(preview.order, AnswerOrder::Reranked);
        assert_eq!(preview.answers[0].answer_id, 3);
        // Votes always come from the original answers.
        assert_eq!(preview.total_votes, 15);
    }

    #[test]
    fn pluralize_handles_one() {
        assert_eq!(pluralize(1, "answer"), "1 answer");
        assert_eq!(pluralize(0, "answer"), "0 answers");
    }
}
