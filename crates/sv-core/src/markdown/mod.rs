//! Terminal rendering of question and answer bodies.
//!
//! Bodies arrive as HTML (what Stack Overflow relays) or as Markdown with
//! embedded raw HTML. Markdown is parsed with the `tree-sitter-md` block and
//! inline grammars, HTML with `tree-sitter-html` through `ast-grep-language`.
//! Rendering keeps the line structure, drops every tag it does not
//! understand (including `<script>`/`<style>` content), decodes entities,
//! and hands code to a [`CodeFormatter`]:
//!
//! - `<pre><code>`, fenced and indented blocks go to [`CodeFormatter::block`]
//! - `<code>` and backtick spans go to [`CodeFormatter::inline`]

mod blocks;
mod html;
mod inline;
mod lang;

/// Formats code found in a body. Implementations decide how inline spans and
/// blocks look (plain backticks, ANSI colors, ...).
pub trait CodeFormatter {
    fn inline(&self, code: &str) -> String;
    fn block(&self, code: &str, language: Option<&str>) -> String;
}

/// Backticks for inline code, four-space indent for blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodeFormatter;

impl CodeFormatter for PlainCodeFormatter {
    fn inline(&self, code: &str) -> String {
        format!("`{code}`")
    }

    fn block(&self, code: &str, _language: Option<&str>) -> String {
        indent(code, "    ")
    }
}

/// Prefix every line of `code` with `prefix`. Blank lines stay blank.
#[must_use]
pub fn indent(code: &str, prefix: &str) -> String {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup a body is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Html,
    Markdown,
}

/// HTML when the body opens with an element, Markdown otherwise.
#[must_use]
pub fn detect_body_format(body: &str) -> BodyFormat {
    if body.trim_start().starts_with('<') && html::opens_with_element(body) {
        BodyFormat::Html
    } else {
        BodyFormat::Markdown
    }
}

/// Render a body for the terminal.
#[must_use]
pub fn render_body(body: &str, formatter: &dyn CodeFormatter) -> String {
    let mut out = Output::new(formatter);
    match detect_body_format(body) {
        BodyFormat::Html => html::render(body, &mut out),
        BodyFormat::Markdown => blocks::render(body, &mut out),
    }
    out.finish()
}

/// Rendered blocks so far plus the running text block. Code blocks are kept
/// verbatim; text blocks get their blank lines normalized.
struct Output<'f> {
    formatter: &'f dyn CodeFormatter,
    blocks: Vec<String>,
    text: String,
}

impl<'f> Output<'f> {
    fn new(formatter: &'f dyn CodeFormatter) -> Self {
        Self {
            formatter,
            blocks: Vec::new(),
            text: String::new(),
        }
    }

    fn text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn inline_code(&mut self, code: &str) {
        let rendered = self.formatter.inline(code);
        self.text.push_str(&rendered);
    }

    fn code_block(&mut self, code: &str, language: Option<&str>) {
        self.flush();
        let code = code.trim_end_matches('\n');
        if !code.trim().is_empty() {
            self.blocks.push(self.formatter.block(code, language));
        }
    }

    fn flush(&mut self) {
        let rendered = normalize_blank_lines(&std::mem::take(&mut self.text));
        if !rendered.is_empty() {
            self.blocks.push(rendered);
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.blocks.join("\n\n")
    }
}

/// Trim trailing spaces, collapse runs of blank lines, drop leading and
/// trailing blank lines.
fn normalize_blank_lines(text: &str) -> String {
    let mut out = Vec::new();
    let mut previous_blank = true;
    for line in text.lines() {
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push(if blank { "" } else { line });
        previous_blank = blank;
    }
    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
