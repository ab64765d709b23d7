//! Block-level Markdown walk over the `tree-sitter-md` block grammar.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::LanguageExt;

use super::lang::MarkdownLang;
use super::{Output, html, inline};

/// Render a Markdown document into `out`.
pub(super) fn render(source: &str, out: &mut Output<'_>) {
    let root = MarkdownLang.ast_grep(source);
    render_block(&root.root(), source, out, false);
}

/// `tight` is set inside list items, where paragraphs are separated by a
/// single newline.
fn render_block<D: ast_grep_core::Doc>(
    node: &Node<D>,
    source: &str,
    out: &mut Output<'_>,
    tight: bool,
) {
    match node.kind().as_ref() {
        "document" | "section" | "block_quote" => render_children(node, source, out, tight),
        "paragraph" => {
            if let Some(content) = child(node, "inline") {
                inline::render(&inline_text(&content, source), out);
            }
            out.text(if tight { "\n" } else { "\n\n" });
        }
        "atx_heading" => {
            if let Some(content) = child(node, "inline") {
                inline::render(inline_text(&content, source).trim(), out);
            }
            out.text("\n\n");
        }
        "setext_heading" => {
            if let Some(paragraph) = child(node, "paragraph") {
                render_block(&paragraph, source, out, false);
            }
        }
        "fenced_code_block" => {
            let code = child(node, "code_fence_content")
                .map(|content| content.text().to_string())
                .unwrap_or_default();
            let language = child(node, "info_string").and_then(|info| {
                child(&info, "language").map_or_else(
                    || info.text().split_whitespace().next().map(str::to_string),
                    |language| Some(language.text().to_string()),
                )
            });
            out.code_block(&code, language.as_deref());
        }
        "indented_code_block" => out.code_block(&dedent(&node.text()), None),
        "html_block" => {
            html::render(&node.text(), out);
            out.text("\n\n");
        }
        "list" => {
            render_children(node, source, out, true);
            out.text("\n");
        }
        "list_item" => render_list_item(node, source, out),
        "thematic_break" => out.text("---\n\n"),
        "pipe_table" => {
            out.text(node.text().trim_end());
            out.text("\n\n");
        }
        _ => {}
    }
}

fn render_children<D: ast_grep_core::Doc>(
    node: &Node<D>,
    source: &str,
    out: &mut Output<'_>,
    tight: bool,
) {
    for child in node.children() {
        render_block(&child, source, out, tight);
    }
}

/// Ordered items keep their number, everything else becomes `-`.
fn render_list_item<D: ast_grep_core::Doc>(item: &Node<D>, source: &str, out: &mut Output<'_>) {
    let marker = item
        .children()
        .find(|child| child.kind().starts_with("list_marker"))
        .map(|marker| marker.text().trim().to_string())
        .filter(|marker| marker.ends_with(['.', ')']))
        .unwrap_or_else(|| String::from("-"));
    out.text(&marker);
    out.text(" ");
    render_children(item, source, out, true);
}

fn child<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>, kind: &str) -> Option<Node<'r, D>> {
    node.children().find(|child| child.kind().as_ref() == kind)
}

/// Source of an `inline` node without the `>` / indentation continuations
/// of enclosing blocks.
fn inline_text<D: ast_grep_core::Doc>(inline: &Node<D>, source: &str) -> String {
    let range = inline.range();
    let mut text = String::with_capacity(range.len());
    let mut pos = range.start;
    for continuation in inline
        .children()
        .filter(|child| child.kind().as_ref() == "block_continuation")
    {
        let skipped = continuation.range();
        text.push_str(&source[pos..skipped.start]);
        pos = skipped.end;
    }
    text.push_str(&source[pos..range.end]);
    text
}

/// Strip the four-space (or tab) indent of an indented code block.
fn dedent(code: &str) -> String {
    code.lines()
        .map(|line| {
            line.strip_prefix('\t')
                .or_else(|| line.strip_prefix("    "))
                .unwrap_or_else(|| line.trim_start())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
