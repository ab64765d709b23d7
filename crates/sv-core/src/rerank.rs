//! Rerank view reconciliation.
//!
//! Decides which answer sequence to display (original vote order or the
//! AI-reranked permutation) and derives per-answer rank badges: the display
//! rank, the original rank when viewing the reranked order, and the movement
//! between the two.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::entities::Answer;
use crate::errors::CoreError;

/// Which sequence is being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrder {
    Original,
    Reranked,
}

impl AnswerOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Reranked => "reranked",
        }
    }
}

impl fmt::Display for AnswerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement of an answer between its original and display rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDelta {
    MovedUp,
    MovedDown,
    Unchanged,
}

impl RankDelta {
    /// Compare a display rank against an optional original rank.
    #[must_use]
    pub fn between(display_rank: usize, original_rank: Option<usize>) -> Self {
        match original_rank {
            Some(original) if display_rank < original => Self::MovedUp,
            Some(original) if display_rank > original => Self::MovedDown,
            _ => Self::Unchanged,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MovedUp => "moved_up",
            Self::MovedDown => "moved_down",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for RankDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One displayed answer with its rank metadata. Ranks are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedAnswer<'a> {
    pub answer: &'a Answer,
    pub display_rank: usize,
    pub original_rank: Option<usize>,
    pub delta: RankDelta,
}

/// Resolve the active order. Falls back to [`AnswerOrder::Original`] when the
/// reranked sequence has not been fetched.
#[must_use]
pub const fn active_order(reranked: Option<&[Answer]>, show_reranked: bool) -> AnswerOrder {
    if show_reranked && reranked.is_some() {
        AnswerOrder::Reranked
    } else {
        AnswerOrder::Original
    }
}

/// 1-based position of `answer_id` in `original`, by linear scan.
#[must_use]
pub fn original_rank(original: &[Answer], answer_id: i64) -> Option<usize> {
    original
        .iter()
        .position(|answer| answer.answer_id == answer_id)
        .map(|index| index + 1)
}

/// Produce the display list for the given inputs.
///
/// Pure: neither input is mutated or reordered. Original ranks are only
/// computed when the reranked sequence is displayed; an id missing from
/// `original` yields `original_rank: None` and [`RankDelta::Unchanged`].
#[must_use]
pub fn reconcile<'a>(
    original: &'a [Answer],
    reranked: Option<&'a [Answer]>,
    show_reranked: bool,
) -> Vec<RankedAnswer<'a>> {
    if original.is_empty() {
        return Vec::new();
    }

    match (active_order(reranked, show_reranked), reranked) {
        (AnswerOrder::Reranked, Some(reranked)) => reranked
            .iter()
            .enumerate()
            .map(|(index, answer)| {
                let display_rank = index + 1;
                let original_rank = original_rank(original, answer.answer_id);
                RankedAnswer {
                    answer,
                    display_rank,
                    original_rank,
                    delta: RankDelta::between(display_rank, original_rank),
                }
            })
            .collect(),
        _ => original
            .iter()
            .enumerate()
            .map(|(index, answer)| RankedAnswer {
                answer,
                display_rank: index + 1,
                original_rank: None,
                delta: RankDelta::Unchanged,
            })
            .collect(),
    }
}

/// Check that `reranked` is a permutation of `original` by answer id.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the ids that are missing or
/// unexpected.
pub fn validate_permutation(original: &[Answer], reranked: &[Answer]) -> Result<(), CoreError> {
    let original_ids: HashSet<i64> = original.iter().map(|answer| answer.answer_id).collect();
    let reranked_ids: HashSet<i64> = reranked.iter().map(|answer| answer.answer_id).collect();

    let mut unexpected: Vec<i64> = reranked_ids.difference(&original_ids).copied().collect();
    let mut missing: Vec<i64> = original_ids.difference(&reranked_ids).copied().collect();
    unexpected.sort_unstable();
    missing.sort_unstable();

    if unexpected.is_empty() && missing.is_empty() && original.len() == reranked.len() {
        return Ok(());
    }

    Err(CoreError::Validation(format!(
        "reranked answers are not a permutation of the original answers \
         (unexpected ids: {unexpected:?}, missing ids: {missing:?}, lengths: {} vs {})",
        original.len(),
        reranked.len()
    )))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn answer(id: i64) -> Answer {
        Answer {
            answer_id: id,
            body: format!("body {id}"),
            score: 10 - id,
            is_accepted: id == 1,
        }
    }

    fn ids(list: &[RankedAnswer<'_>]) -> Vec<i64> {
        list.iter().map(|entry| entry.answer.answer_id).collect()
    }

    #[test]
    fn original_view_keeps_order_without_original_ranks() {
        let original = vec![answer(1), answer(2), answer(3)];
        let reranked = vec![answer(3), answer(1), answer(2)];

        for reranked in [None, Some(reranked.as_slice())] {
            let out = reconcile(&original, reranked, false);
            assert_eq!(ids(&out), vec![1, 2, 3]);
            assert!(out.iter().all(|entry| entry.original_rank.is_none()));
            assert!(out.iter().all(|entry| entry.delta == RankDelta::Unchanged));
            assert_eq!(
                out.iter().map(|entry| entry.display_rank).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );
        }
    }

    #[test]
    fn reranked_view_reports_original_ranks_and_movement() {
        let (a, b, c) = (answer(1), answer(2), answer(3));
        let original = vec![a.clone(), b.clone(), c.clone()];
        let reranked = vec![c, a, b];

        let out = reconcile(&original, Some(&reranked), true);
        let summary: Vec<(i64, usize, Option<usize>, RankDelta)> = out
            .iter()
            .map(|entry| {
                (
                    entry.answer.answer_id,
                    entry.display_rank,
                    entry.original_rank,
                    entry.delta,
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                (3, 1, Some(3), RankDelta::MovedUp),
                (1, 2, Some(1), RankDelta::MovedDown),
                (2, 3, Some(2), RankDelta::MovedDown),
            ]
        );
    }

    #[test]
    fn permutation_yields_same_ids_with_defined_original_ranks() {
        let original: Vec<Answer> = (1..=6).map(answer).collect();
        let reranked: Vec<Answer> = [4, 6, 1, 5, 3, 2].into_iter().map(answer).collect();

        let out = reconcile(&original, Some(&reranked), true);
        let mut got = ids(&out);
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3, 4, 5, 6]);

        for entry in &out {
            let expected = original
                .iter()
                .position(|a| a.answer_id == entry.answer.answer_id)
                .map(|i| i + 1);
            assert_eq!(entry.original_rank, expected);
            assert!(entry.original_rank.is_some());
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let original = vec![answer(1), answer(2)];
        let reranked = vec![answer(2), answer(1)];

        let first = reconcile(&original, Some(&reranked), true);
        let second = reconcile(&original, Some(&reranked), true);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_original_yields_empty_output_in_every_mode() {
        let reranked = vec![answer(1)];
        for show in [false, true] {
            assert!(reconcile(&[], None, show).is_empty());
            assert!(reconcile(&[], Some(&reranked), show).is_empty());
        }
    }

    #[test]
    fn missing_rerank_falls_back_to_original_view() {
        let original = vec![answer(1), answer(2)];
        let out = reconcile(&original, None, true);
        assert_eq!(out, reconcile(&original, None, false));
        assert_eq!(active_order(None, true), AnswerOrder::Original);
    }

    #[test]
    fn unknown_reranked_id_has_no_original_rank() {
        let original = vec![answer(1), answer(2)];
        let reranked = vec![answer(9), answer(1)];

        let out = reconcile(&original, Some(&reranked), true);
        assert_eq!(out[0].original_rank, None);
        assert_eq!(out[0].delta, RankDelta::Unchanged);
        assert_eq!(out[1].original_rank, Some(1));
        assert_eq!(out[1].delta, RankDelta::MovedDown);
    }

    #[test]
    fn inputs_are_not_reordered() {
        let original = vec![answer(1), answer(2), answer(3)];
        let reranked = vec![answer(3), answer(2), answer(1)];
        let before = (original.clone(), reranked.clone());

        let _ = reconcile(&original, Some(&reranked), true);
        assert_eq!((original, reranked), before);
    }

    #[test]
    fn unchanged_when_rank_is_kept() {
        assert_eq!(RankDelta::between(2, Some(2)), RankDelta::Unchanged);
        assert_eq!(RankDelta::between(1, None), RankDelta::Unchanged);
    }

    #[test]
    fn validate_permutation_accepts_reordering() {
        let original = vec![answer(1), answer(2), answer(3)];
        let reranked = vec![answer(2), answer(3), answer(1)];
        assert!(validate_permutation(&original, &reranked).is_ok());
    }

    #[test]
    fn validate_permutation_reports_mismatch() {
        let original = vec![answer(1), answer(2)];
        let reranked = vec![answer(1), answer(7)];
        let err = validate_permutation(&original, &reranked).expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains("unexpected ids: [7]"));
        assert!(message.contains("missing ids: [2]"));
    }
}
