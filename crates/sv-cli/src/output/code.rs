use sv_core::markdown::{CodeFormatter, PlainCodeFormatter, indent};

/// Terminal code styling: cyan inline spans, dimmed indented blocks with a
/// language label. Falls back to plain formatting without color.
#[derive(Clone, Copy, Debug)]
pub struct TerminalCodeFormatter {
    pub color: bool,
}

impl CodeFormatter for TerminalCodeFormatter {
    fn inline(&self, code: &str) -> String {
        if self.color {
            format!("\u{1b}[36m{code}\u{1b}[0m")
        } else {
            PlainCodeFormatter.inline(code)
        }
    }

    fn block(&self, code: &str, language: Option<&str>) -> String {
        let body = if self.color {
            code.lines()
                .map(|line| format!("    \u{1b}[2m{line}\u{1b}[0m"))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            indent(code, "    ")
        };
        match language {
            Some(language) => format!("    [{language}]\n{body}"),
            None => body,
        }
    }
}
