//! Inline Markdown: code spans, links, entities, escapes and raw inline HTML.
//!
//! Text between recognized nodes is copied from the source, so anything the
//! grammar does not claim (stray `<`, `&&`, brackets) survives as written.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::LanguageExt;

use super::lang::MarkdownInlineLang;
use super::{Output, html};

/// Render the text of one `inline` block node into `out`.
pub(super) fn render(text: &str, out: &mut Output<'_>) {
    let root = MarkdownInlineLang.ast_grep(text);
    let mut walker = InlineWalker {
        source: text,
        pos: 0,
        capture: None,
        out,
    };
    walker.walk(&root.root());
    walker.finish();
}

/// Raw HTML between an opening tag and its close.
enum Capture {
    /// `<code>...</code>`: rendered as one inline code span.
    Code { start: usize },
    /// `<script>` / `<style>`: dropped.
    Drop { tag: String },
}

struct InlineWalker<'s, 'o, 'f> {
    source: &'s str,
    /// Everything before `pos` has been emitted or deliberately skipped.
    pos: usize,
    capture: Option<Capture>,
    out: &'o mut Output<'f>,
}

impl InlineWalker<'_, '_, '_> {
    fn walk<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        for child in node.children() {
            self.visit(&child);
        }
    }

    fn visit<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        if self.capture.is_some() {
            if node.kind().as_ref() == "html_tag" {
                self.close_capture(node);
            } else {
                self.walk(node);
            }
            return;
        }

        let range = node.range();
        match node.kind().as_ref() {
            "code_span" => {
                self.flush_to(range.start);
                let code = code_span_content(node, self.source);
                self.out.inline_code(&code);
                self.pos = range.end;
            }
            "code_span_delimiter" | "emphasis_delimiter" => {
                self.flush_to(range.start);
                self.pos = range.end;
            }
            "entity_reference" | "numeric_character_reference" => {
                self.flush_to(range.start);
                let raw = node.text();
                match html::decode_entity(&raw) {
                    Some(ch) => self.out.text(ch.encode_utf8(&mut [0; 4])),
                    None => self.out.text(&raw),
                }
                self.pos = range.end;
            }
            "backslash_escape" => {
                self.flush_to(range.start);
                let raw = node.text();
                self.out.text(raw.get(1..).unwrap_or_default());
                self.pos = range.end;
            }
            "hard_line_break" => {
                self.flush_to(range.start);
                self.out.text("\n");
                self.pos = range.end;
            }
            "html_tag" => self.open_tag(node),
            "inline_link" | "image" => self.link(node),
            _ => self.walk(node),
        }
    }

    /// Copy source text up to `until` unless inside a capture.
    fn flush_to(&mut self, until: usize) {
        if self.capture.is_none() && until > self.pos {
            self.out.text(&self.source[self.pos..until]);
            self.pos = until;
        }
    }

    /// `[label](url)` and `![alt](src)` keep only the label.
    fn link<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        let range = node.range();
        self.flush_to(range.start);
        if let Some(label) = node.children().find(|child| {
            matches!(child.kind().as_ref(), "link_text" | "image_description")
        }) {
            let label_range = label.range();
            self.pos = label_range.start;
            self.walk(&label);
            self.flush_to(label_range.end);
        }
        self.pos = range.end;
    }

    fn open_tag<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        let range = node.range();
        self.flush_to(range.start);
        self.pos = range.end;

        let raw = node.text();
        let Some((name, closing)) = html::tag_info(&raw) else {
            self.out.text(&raw);
            return;
        };
        match (name.as_str(), closing) {
            ("code", false) => self.capture = Some(Capture::Code { start: range.end }),
            ("script" | "style", false) => {
                self.capture = Some(Capture::Drop { tag: name.clone() });
            }
            _ => self.out.text(html::tag_break(&name, closing)),
        }
    }

    fn close_capture<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        let Some((name, true)) = html::tag_info(&node.text()) else {
            return;
        };
        let range = node.range();
        match self.capture.take() {
            Some(Capture::Code { start }) if name == "code" => {
                let code = html::plain_text(&self.source[start..range.start]);
                self.out.inline_code(&code);
            }
            Some(Capture::Drop { tag }) if tag == name => {}
            other => {
                self.capture = other;
                return;
            }
        }
        self.pos = range.end;
    }

    fn finish(mut self) {
        match self.capture.take() {
            Some(Capture::Code { start }) => {
                let rest = html::plain_text(&self.source[start..]);
                self.out.text(&rest);
            }
            Some(Capture::Drop { .. }) => {}
            None => self.flush_to(self.source.len()),
        }
    }
}

/// Text between the delimiters. A single space is stripped from both ends
/// when present on both and the span is not all spaces.
fn code_span_content<D: ast_grep_core::Doc>(node: &Node<D>, source: &str) -> String {
    let range = node.range();
    let delimiters: Vec<_> = node
        .children()
        .filter(|child| child.kind().as_ref() == "code_span_delimiter")
        .map(|child| child.range())
        .collect();
    let (start, end) = match (delimiters.first(), delimiters.last()) {
        (Some(open), Some(close)) if delimiters.len() >= 2 => (open.end, close.start),
        _ => (range.start, range.end),
    };
    let content = source[start..end].replace('\n', " ");
    if content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.trim().is_empty()
    {
        content[1..content.len() - 1].to_string()
    } else {
        content
    }
}
