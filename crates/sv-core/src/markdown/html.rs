//! HTML bodies, tokenized by the `tree-sitter-html` grammar bundled with
//! `ast-grep-language`.

use ast_grep_core::Node;
use ast_grep_core::matcher::KindMatcher;
use ast_grep_language::{LanguageExt, SupportLang};

use super::Output;

/// Whether `source` parses as HTML whose first node is an element.
pub(super) fn opens_with_element(source: &str) -> bool {
    let root = SupportLang::Html.ast_grep(source);
    root.root().children().next().is_some_and(|first| {
        matches!(
            first.kind().as_ref(),
            "element" | "script_element" | "style_element" | "doctype" | "comment"
        )
    })
}

/// Render an HTML document or fragment into `out`.
pub(super) fn render(source: &str, out: &mut Output<'_>) {
    let root = SupportLang::Html.ast_grep(source);
    render_children(&root.root(), source, out);
}

/// Text content of an HTML fragment with tags removed and entities decoded.
pub(super) fn plain_text(source: &str) -> String {
    let root = SupportLang::Html.ast_grep(source);
    let mut text = String::new();
    collect_text(&root.root(), source, &mut text);
    text
}

/// Lowercased tag name of a lone start or end tag, and whether it closes.
pub(super) fn tag_info(tag: &str) -> Option<(String, bool)> {
    let closing = tag.starts_with("</");
    let root = SupportLang::Html.ast_grep(tag);
    let root_node = root.root();
    let name = root_node
        .find_all(KindMatcher::new("tag_name", SupportLang::Html))
        .next()
        .or_else(|| {
            root_node
                .find_all(KindMatcher::new("erroneous_end_tag_name", SupportLang::Html))
                .next()
        })?;
    Some((name.text().to_ascii_lowercase(), closing))
}

/// Line structure a tag contributes to terminal output.
pub(super) fn tag_break(name: &str, closing: bool) -> &'static str {
    match (name, closing) {
        ("p" | "div" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6", _) => "\n\n",
        ("br" | "ul" | "ol", _) => "\n",
        ("li", false) => "\n- ",
        ("hr", _) => "\n---\n",
        _ => "",
    }
}

/// Decode `&amp;`, `&#39;`, `&#x27;` and friends. The trailing `;` is optional.
pub(super) fn decode_entity(raw: &str) -> Option<char> {
    let name = raw.strip_prefix('&')?;
    let name = name.strip_suffix(';').unwrap_or(name);
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "hellip" => Some('\u{2026}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn push_entity(raw: &str, text: &mut String) {
    match decode_entity(raw) {
        Some(ch) => text.push(ch),
        None => text.push_str(raw),
    }
}

/// Render the children of `node`, keeping the source whitespace between them.
fn render_children<D: ast_grep_core::Doc>(node: &Node<D>, source: &str, out: &mut Output<'_>) {
    let range = node.range();
    let mut pos = range.start;
    for child in node.children() {
        let child_range = child.range();
        if child_range.start > pos {
            out.text(&source[pos..child_range.start]);
        }
        render_node(&child, source, out);
        pos = pos.max(child_range.end);
    }
    if range.end > pos {
        out.text(&source[pos..range.end]);
    }
}

fn render_node<D: ast_grep_core::Doc>(node: &Node<D>, source: &str, out: &mut Output<'_>) {
    match node.kind().as_ref() {
        "text" => out.text(&node.text()),
        "entity" => {
            let mut text = String::new();
            push_entity(&node.text(), &mut text);
            out.text(&text);
        }
        "element" => render_element(node, source, out),
        "start_tag" | "end_tag" | "self_closing_tag" | "erroneous_end_tag" | "script_element"
        | "style_element" | "comment" | "doctype" => {}
        _ if node.children().next().is_some() => render_children(node, source, out),
        _ => out.text(&node.text()),
    }
}

fn render_element<D: ast_grep_core::Doc>(node: &Node<D>, source: &str, out: &mut Output<'_>) {
    let name = tag_name(node).unwrap_or_default();
    match name.as_str() {
        "pre" => {
            let mut code = String::new();
            collect_text(node, source, &mut code);
            let language = node
                .children()
                .find(|child| {
                    child.kind().as_ref() == "element" && tag_name(child).as_deref() == Some("code")
                })
                .and_then(|code| attribute(&code, "class"))
                .or_else(|| attribute(node, "class"))
                .and_then(|class| class_language(&class));
            out.code_block(&code, language.as_deref());
        }
        "code" => {
            let mut code = String::new();
            collect_text(node, source, &mut code);
            out.inline_code(&code);
        }
        "br" | "hr" => out.text(tag_break(&name, false)),
        _ => {
            out.text(tag_break(&name, false));
            render_children(node, source, out);
            out.text(tag_break(&name, true));
        }
    }
}

/// Append the text under `node`, tags dropped, source whitespace kept.
fn collect_text<D: ast_grep_core::Doc>(node: &Node<D>, source: &str, text: &mut String) {
    let range = node.range();
    let mut pos = range.start;
    for child in node.children() {
        let child_range = child.range();
        if child_range.start > pos {
            text.push_str(&source[pos..child_range.start]);
        }
        match child.kind().as_ref() {
            "text" | "raw_text" => text.push_str(&child.text()),
            "entity" => push_entity(&child.text(), text),
            "start_tag" | "end_tag" | "self_closing_tag" | "erroneous_end_tag" | "comment" => {}
            _ if child.children().next().is_some() => collect_text(&child, source, text),
            _ => text.push_str(&child.text()),
        }
        pos = pos.max(child_range.end);
    }
    if range.end > pos {
        text.push_str(&source[pos..range.end]);
    }
}

fn tag_name<D: ast_grep_core::Doc>(element: &Node<D>) -> Option<String> {
    let tag = element
        .children()
        .find(|child| matches!(child.kind().as_ref(), "start_tag" | "self_closing_tag"))?;
    let name = tag
        .children()
        .find(|child| child.kind().as_ref() == "tag_name")?;
    Some(name.text().to_ascii_lowercase())
}

fn attribute<D: ast_grep_core::Doc>(element: &Node<D>, name: &str) -> Option<String> {
    let tag = element
        .children()
        .find(|child| matches!(child.kind().as_ref(), "start_tag" | "self_closing_tag"))?;
    tag.children()
        .filter(|child| child.kind().as_ref() == "attribute")
        .find(|attr| {
            attr.children().any(|part| {
                part.kind().as_ref() == "attribute_name" && part.text().eq_ignore_ascii_case(name)
            })
        })
        .and_then(|attr| {
            attr.children().find_map(|part| match part.kind().as_ref() {
                "attribute_value" => Some(part.text().to_string()),
                "quoted_attribute_value" => part
                    .children()
                    .find(|value| value.kind().as_ref() == "attribute_value")
                    .map(|value| value.text().to_string()),
                _ => None,
            })
        })
}

/// `rust` from `class="lang-rust"` or `class="hljs language-rust"`.
fn class_language(class: &str) -> Option<String> {
    class.split_whitespace().find_map(|token| {
        ["language-", "lang-"]
            .into_iter()
            .find_map(|prefix| token.strip_prefix(prefix))
            .filter(|language| !language.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tag_names_are_lowercased() {
        assert_eq!(tag_info("<CODE>"), Some((String::from("code"), false)));
        assert_eq!(
            tag_info("<a href=\"https://x\">"),
            Some((String::from("a"), false))
        );
        assert_eq!(tag_info("</code>"), Some((String::from("code"), true)));
    }

    #[test]
    fn plain_text_drops_tags_and_decodes() {
        assert_eq!(plain_text("a &lt; <b>b</b>"), "a < b");
    }

    #[test]
    fn entities_decode_named_and_numeric() {
        assert_eq!(decode_entity("&amp;"), Some('&'));
        assert_eq!(decode_entity("&#39;"), Some('\''));
        assert_eq!(decode_entity("&#x27;"), Some('\''));
        assert_eq!(decode_entity("&nope;"), None);
    }

    #[test]
    fn class_language_reads_either_prefix() {
        assert_eq!(class_language("lang-rust"), Some(String::from("rust")));
        assert_eq!(
            class_language("hljs language-python"),
            Some(String::from("python"))
        );
        assert_eq!(class_language("prettyprint"), None);
    }

    #[test]
    fn html_detection_needs_a_leading_element() {
        assert!(opens_with_element("<p>hi</p>"));
        assert!(!opens_with_element("plain text"));
    }
}
