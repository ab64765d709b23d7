#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table for string rows.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(4)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_cell(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.trim_end().chars().count());

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).map_or("-", String::as_str);
                    let truncated = truncate_cell(value, *width);
                    let numeric = looks_numeric(&truncated);
                    let padded = format_cell(&truncated, *width, numeric);
                    if options.color {
                        colorize_keyword(&padded, &truncated)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        // Shrink the widest column that is still above its header width.
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_cell(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    if numeric {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

/// Color whole cells that carry a known state keyword.
fn colorize_keyword(padded: &str, value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "true" | "accepted" | "moved_up" | "reranked" | "ready" => "32",
        "loading" | "reranking" | "moved_down" => "33",
        "false" | "failed" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn alignment_handles_mixed_widths() {
        let headers = ["id", "order", "title"];
        let rows = vec![
            vec!["1".to_string(), "original".to_string(), "short".to_string()],
            vec![
                "200".to_string(),
                "reranked".to_string(),
                "a much longer title".to_string(),
            ],
        ];

        let table = render_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Numeric cells are right-aligned.
        assert!(lines[2].starts_with("   1"));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let headers = ["id", "title"];
        let rows = vec![vec!["1".to_string(), "x".repeat(80)]];
        let table = render_table(
            &headers,
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 40);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn color_wraps_keywords_only() {
        let headers = ["state"];
        let rows = vec![vec!["accepted".to_string()], vec!["other".to_string()]];
        let table = render_table(
            &headers,
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[32maccepted"));
        assert!(!table.contains("\u{1b}[32mother"));
    }
}
