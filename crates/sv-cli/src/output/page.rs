//! Text rendering for the search, question and recent-search pages.

use sv_core::markdown::{PlainCodeFormatter, render_body};
use sv_core::preview::{PreviewOptions, QuestionPreview, pluralize};
use sv_core::rerank::{AnswerOrder, RankDelta, RankedAnswer};
use sv_core::view::{QuestionPage, RecentSearchesView, SearchPage};

use super::code::TerminalCodeFormatter;

#[derive(Clone, Copy, Debug)]
enum Style {
    Bold,
    Dim,
    Green,
    Yellow,
    Magenta,
    Blue,
    Red,
}

impl Style {
    const fn code(self) -> &'static str {
        match self {
            Self::Bold => "1",
            Self::Dim => "2",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Magenta => "35",
            Self::Blue => "34",
            Self::Red => "31",
        }
    }
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        format!("\u{1b}[{}m{text}\u{1b}[0m", style.code())
    } else {
        text.to_string()
    }
}

/// Body rendered with plain code markers and collapsed to one line.
fn flatten(body: &str) -> String {
    render_body(body, &PlainCodeFormatter)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"1 vote"`, `"-3 votes"`.
fn votes(score: i64) -> String {
    if score == 1 {
        String::from("1 vote")
    } else {
        format!("{score} votes")
    }
}

// ---------------------------------------------------------------------------
// Answer badges
// ---------------------------------------------------------------------------

/// Badge labels for one answer card.
///
/// The reranked view with a known original rank shows `AI Rank`, `Was` and
/// the movement; every other case shows the original position.
#[must_use]
pub fn answer_badges(ranked: &RankedAnswer<'_>, order: AnswerOrder) -> Vec<String> {
    let mut badges = Vec::new();
    match (order, ranked.original_rank) {
        (AnswerOrder::Reranked, Some(original)) => {
            badges.push(format!("AI Rank #{}", ranked.display_rank));
            badges.push(format!("Was #{original}"));
            match ranked.delta {
                RankDelta::MovedUp => badges.push(String::from("↑ Moved up")),
                RankDelta::MovedDown => badges.push(String::from("↓ Moved down")),
                RankDelta::Unchanged => {}
            }
        }
        _ => badges.push(format!("Original #{}", ranked.display_rank)),
    }
    if ranked.answer.is_accepted {
        badges.push(String::from("Accepted"));
    }
    badges
}

fn paint_badge(badge: &str, color: bool) -> String {
    let style = if badge.starts_with("AI Rank") {
        Style::Magenta
    } else if badge.starts_with('↑') || badge == "Accepted" {
        Style::Green
    } else if badge.starts_with('↓') {
        Style::Yellow
    } else if badge.starts_with("Original") {
        Style::Blue
    } else {
        Style::Dim
    };
    paint(&format!("[{badge}]"), style, color)
}

// ---------------------------------------------------------------------------
// Search page
// ---------------------------------------------------------------------------

/// Render search results as preview cards, at most `limit` of them.
#[must_use]
pub fn render_search(
    page: &SearchPage,
    options: PreviewOptions,
    limit: usize,
    color: bool,
) -> String {
    let mut lines = Vec::new();

    if let Some(note) = page.note() {
        lines.push(paint(&format!("Note: {note}"), Style::Yellow, color));
        lines.push(String::new());
    }

    if page.is_empty_result() {
        lines.push(format!("No questions found for \"{}\"", page.query()));
        lines.push(paint(
            "Try different keywords or check your spelling",
            Style::Dim,
            color,
        ));
        return lines.join("\n");
    }

    let previews = page.previews(options);
    lines.push(format!(
        "{}  ({} found)",
        paint(page.heading(), Style::Bold, color),
        pluralize(previews.len(), "question")
    ));
    if page.has_reranked_results() {
        let other = if page.show_reranked() {
            "--order original"
        } else {
            "--order reranked"
        };
        lines.push(paint(&format!("Toggle with {other}"), Style::Dim, color));
    }

    for (index, preview) in previews.iter().take(limit).enumerate() {
        lines.push(String::new());
        lines.extend(render_preview(index + 1, preview, color));
    }

    if previews.len() > limit {
        lines.push(String::new());
        lines.push(paint(
            &format!("... {} more (raise --limit)", previews.len() - limit),
            Style::Dim,
            color,
        ));
    }

    lines.join("\n")
}

fn render_preview(position: usize, preview: &QuestionPreview, color: bool) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{position}. {}  {}",
            paint(&preview.title, Style::Bold, color),
            paint(&format!("(#{})", preview.question_id), Style::Dim, color)
        ),
        format!(
            "   {} votes · {} · {} order",
            preview.total_votes,
            pluralize(preview.answer_count as usize, "answer"),
            preview.order
        ),
    ];

    let excerpt = flatten(&preview.excerpt);
    if !excerpt.is_empty() {
        lines.push(format!("   {excerpt}"));
    }

    for answer in &preview.answers {
        let accepted = if answer.is_accepted {
            format!(" {}", paint("[Accepted]", Style::Green, color))
        } else {
            String::new()
        };
        lines.push(format!(
            "   - ({}){accepted} {}",
            votes(answer.score),
            flatten(&answer.excerpt)
        ));
    }
    if preview.remaining > 0 {
        lines.push(paint(
            &format!("   + {} more", pluralize(preview.remaining, "answer")),
            Style::Dim,
            color,
        ));
    }
    lines
}

// ---------------------------------------------------------------------------
// Question page
// ---------------------------------------------------------------------------

/// Render a loaded question with its answers in the active order.
#[must_use]
pub fn render_question(page: &QuestionPage, color: bool) -> String {
    let Some(question) = page.question() else {
        return page
            .error()
            .map_or_else(|| String::from("Question not loaded"), str::to_string);
    };
    let formatter = TerminalCodeFormatter { color };

    let mut lines = vec![
        paint(&question.title, Style::Bold, color),
        paint(
            &format!(
                "Question #{} · {}",
                question.question_id,
                pluralize(question.answer_count as usize, "answer")
            ),
            Style::Dim,
            color,
        ),
        String::new(),
        render_body(&question.body, &formatter),
        String::new(),
    ];

    let ranked = page.ranked_answers();
    let order = page.order();
    lines.push(paint(
        &pluralize(ranked.len(), "Answer"),
        Style::Bold,
        color,
    ));

    if let Some(error) = page.rerank_error() {
        lines.push(paint(&format!("Warning: {error}"), Style::Red, color));
    }

    if question.has_reranked() {
        let banner = match order {
            AnswerOrder::Reranked => "Viewing AI-reranked answers (sorted by relevance)",
            AnswerOrder::Original => "Viewing original order (sorted by votes)",
        };
        lines.push(paint(banner, Style::Magenta, color));
    } else if page.can_request_rerank() {
        lines.push(paint(
            "Rerank answers using AI with --rerank",
            Style::Dim,
            color,
        ));
    }

    if ranked.is_empty() {
        lines.push(String::new());
        lines.push(String::from("No answers yet."));
        return lines.join("\n");
    }

    for answer in &ranked {
        lines.push(String::new());
        lines.push(render_answer_header(answer, order, color));
        lines.push(render_body(&answer.answer.body, &formatter));
    }

    lines.join("\n")
}

fn render_answer_header(ranked: &RankedAnswer<'_>, order: AnswerOrder, color: bool) -> String {
    let badges = answer_badges(ranked, order)
        .iter()
        .map(|badge| paint_badge(badge, color))
        .collect::<Vec<_>>()
        .join(" ");
    format!("── {badges} · {}", votes(ranked.answer.score))
}

// ---------------------------------------------------------------------------
// Recent searches
// ---------------------------------------------------------------------------

/// Render the active recent-search tab as a numbered list.
#[must_use]
pub fn render_recent(view: &RecentSearchesView, color: bool) -> String {
    if view.is_hidden() {
        return String::from("No searches yet.");
    }

    let mut lines = vec![paint(view.heading(), Style::Bold, color)];
    let visible = view.visible();
    if visible.is_empty() {
        lines.push(paint("(none)", Style::Dim, color));
    }
    for (index, entry) in visible.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {}  {}",
            index + 1,
            entry.query,
            paint(
                &entry.searched_at.format("%Y-%m-%d %H:%M").to_string(),
                Style::Dim,
                color
            )
        ));
    }
    if view.has_more() {
        lines.push(paint("Show all searches with --all", Style::Dim, color));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sv_core::entities::{Answer, Question, RecentSearches};
    use sv_core::responses::{SearchMeta, SearchResponse};

    fn answer(id: i64, score: i64, accepted: bool) -> Answer {
        Answer {
            answer_id: id,
            body: format!("<p>answer {id}</p>"),
            score,
            is_accepted: accepted,
        }
    }

    fn question(reranked: bool) -> Question {
        let answers = vec![answer(1, 10, true), answer(2, 5, false), answer(3, 1, false)];
        Question {
            question_id: 42,
            title: "Borrowing twice".into(),
            body: "<p>Why does <code>x</code> fail?</p>".into(),
            reranked_answers: reranked
                .then(|| vec![answers[2].clone(), answers[0].clone(), answers[1].clone()]),
            answers,
            answer_count: 3,
            accepted_answer_id: Some(1),
        }
    }

    fn loaded(question: Question) -> QuestionPage {
        QuestionPage::new(42)
            .begin_load()
            .unwrap()
            .load_succeeded(question)
            .unwrap()
    }

    #[test]
    fn reranked_badges_show_both_ranks_and_movement() {
        let page = loaded(question(true)).with_order(AnswerOrder::Reranked);
        let ranked = page.ranked_answers();

        assert_eq!(
            answer_badges(&ranked[0], AnswerOrder::Reranked),
            vec!["AI Rank #1", "Was #3", "↑ Moved up"]
        );
        assert_eq!(
            answer_badges(&ranked[1], AnswerOrder::Reranked),
            vec!["AI Rank #2", "Was #1", "↓ Moved down", "Accepted"]
        );
    }

    #[test]
    fn original_badges_show_position_only() {
        let page = loaded(question(false));
        let ranked = page.ranked_answers();
        assert_eq!(
            answer_badges(&ranked[0], AnswerOrder::Original),
            vec!["Original #1", "Accepted"]
        );
        assert_eq!(
            answer_badges(&ranked[2], AnswerOrder::Original),
            vec!["Original #3"]
        );
    }

    #[test]
    fn question_text_lists_answers_in_active_order() {
        let page = loaded(question(true)).with_order(AnswerOrder::Reranked);
        let text = render_question(&page, false);

        assert!(text.starts_with("Borrowing twice\nQuestion #42 · 3 answers"));
        assert!(text.contains("Why does `x` fail?"));
        assert!(text.contains("Viewing AI-reranked answers"));
        let first = text.find("answer 3").unwrap();
        let second = text.find("answer 1").unwrap();
        assert!(first < second);
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn question_text_shows_rerank_warning_and_original_content() {
        let page = loaded(question(false))
            .begin_rerank()
            .unwrap()
            .rerank_failed("reranking failed: rate limited")
            .unwrap();
        let text = render_question(&page, false);
        assert!(text.contains("Warning: reranking failed: rate limited"));
        assert!(text.contains("[Original #1]"));
        assert!(text.contains("answer 1"));
    }

    #[test]
    fn question_text_without_answers() {
        let mut q = question(false);
        q.answers.clear();
        q.answer_count = 0;
        let text = render_question(&loaded(q), false);
        assert!(text.contains("0 Answers"));
        assert!(text.ends_with("No answers yet."));
    }

    #[test]
    fn search_text_renders_note_heading_and_cards() {
        let page = SearchPage::new()
            .begin_search("borrow", true)
            .unwrap()
            .search_succeeded(SearchResponse {
                data: vec![question(true)],
                meta: SearchMeta {
                    total: 1,
                    query: "borrow".into(),
                    reranked: true,
                    note: Some("Rerank limited to 3 questions".into()),
                },
            })
            .unwrap();

        let text = render_search(&page, PreviewOptions::default(), 10, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Note: Rerank limited to 3 questions");
        assert_eq!(lines[2], "AI-Reranked Results  (1 question found)");
        assert!(text.contains("1. Borrowing twice  (#42)"));
        assert!(text.contains("16 votes · 3 answers · reranked order"));
        assert!(text.contains("   - (1 vote) answer 3"));
        assert!(text.contains("+ 1 more answer"));
    }

    #[test]
    fn search_text_for_no_results() {
        let page = SearchPage::new()
            .begin_search("zzz", false)
            .unwrap()
            .search_succeeded(SearchResponse {
                data: Vec::new(),
                meta: SearchMeta::default(),
            })
            .unwrap();
        let text = render_search(&page, PreviewOptions::default(), 10, false);
        assert!(text.starts_with("No questions found for \"zzz\""));
    }

    #[test]
    fn recent_text_numbers_entries_and_hints_more() {
        let searches: RecentSearches = serde_json::from_value(serde_json::json!({
            "cache": [
                {"query": "tokio", "timestamp": "2025-06-01T10:00:00Z", "user_id": 1}
            ],
            "database": (1..=6).map(|id| serde_json::json!({
                "id": id, "query": format!("q{id}"), "user_id": 1,
                "searched_at": "2025-06-01T09:00:00"
            })).collect::<Vec<_>>()
        }))
        .unwrap();
        let view = RecentSearchesView::from(searches);

        let text = render_recent(&view, false);
        assert_eq!(
            text,
            "Recent Searches\n  1. tokio  2025-06-01 10:00\nShow all searches with --all"
        );

        let all = render_recent(&view.with_show_all(true), false);
        assert!(all.starts_with("All Searches"));
        assert!(all.contains("  6. q6"));
    }
}
