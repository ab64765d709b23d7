use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Answer;

/// A question with its vote-ordered answers and, after a rerank request,
/// the AI-reranked permutation of those answers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub question_id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reranked_answers: Option<Vec<Answer>>,
    #[serde(default)]
    pub answer_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_answer_id: Option<i64>,
}

impl Question {
    /// Whether the backend has supplied a reranked order for this question.
    #[must_use]
    pub const fn has_reranked(&self) -> bool {
        self.reranked_answers.is_some()
    }

    /// The reranked sequence as a slice, if present.
    #[must_use]
    pub fn reranked(&self) -> Option<&[Answer]> {
        self.reranked_answers.as_deref()
    }

    /// The sequence to display: reranked when requested and present,
    /// otherwise the original order.
    #[must_use]
    pub fn active_answers(&self, show_reranked: bool) -> &[Answer] {
        match self.reranked() {
            Some(reranked) if show_reranked => reranked,
            _ => &self.answers,
        }
    }

    /// Sum of the original answers' scores.
    #[must_use]
    pub fn total_votes(&self) -> i64 {
        self.answers.iter().map(|answer| answer.score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(id: i64, score: i64) -> Answer {
        Answer {
            answer_id: id,
            body: format!("answer {id}"),
            score,
            is_accepted: false,
        }
    }

    #[test]
    fn active_answers_prefers_reranked_only_when_requested() {
        let question = Question {
            question_id: 1,
            title: String::from("t"),
            body: String::from("b"),
            answers: vec![answer(1, 5), answer(2, 3)],
            reranked_answers: Some(vec![answer(2, 3), answer(1, 5)]),
            answer_count: 2,
            accepted_answer_id: None,
        };

        assert_eq!(question.active_answers(false)[0].answer_id, 1);
        assert_eq!(question.active_answers(true)[0].answer_id, 2);
        assert_eq!(question.total_votes(), 8);
    }

    #[test]
    fn missing_answers_field_defaults_to_empty() {
        let question: Question =
            serde_json::from_str(r#"{"question_id": 9, "title": "t", "body": "b"}"#)
                .expect("question should parse");
        assert!(question.answers.is_empty());
        assert!(!question.has_reranked());
        assert!(question.active_answers(true).is_empty());
    }
}
