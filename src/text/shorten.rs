//! Plain-text summaries of raw content.

use pulldown_cmark::{Event, Parser, TagEnd};

use super::front_matter;

/// Default summary length in characters.
pub const DEFAULT_LIMIT: usize = 240;

/// Flatten content to plain text and truncate at a word boundary.
///
/// Front matter is dropped, markup (Markdown or inline HTML) is reduced to
/// its text and whitespace collapsed. Output longer than `limit` characters
/// is cut at the last word boundary and terminated with `…`.
pub fn shorten(text: &str, limit: usize) -> String {
    let body = front_matter::extract(text).map_or(text, |(_, body)| body);
    truncate(&flatten(body), limit)
}

/// Reduce Markdown/HTML markup to its plain text.
fn flatten(text: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(text) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::Html(html) | Event::InlineHtml(html) => push_html_text(&mut out, &html),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            // Inline spans end mid-word; only block ends separate words
            Event::End(
                TagEnd::Emphasis
                | TagEnd::Strong
                | TagEnd::Strikethrough
                | TagEnd::Link
                | TagEnd::Image,
            ) => {}
            Event::End(_) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_html_text(out: &mut String, html: &str) {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return;
    };
    let parser = dom.parser();
    for handle in dom.children() {
        if let Some(node) = handle.get(parser) {
            out.push_str(&node.inner_text(parser));
            out.push(' ');
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let end = text
        .char_indices()
        .nth(limit)
        .map_or(text.len(), |(idx, _)| idx);
    let cut = if text[end..].starts_with(char::is_whitespace) {
        end
    } else {
        match text[..end].rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => idx,
            _ => end,
        }
    };
    format!("{}…", text[..cut].trim_end())
}
