//! Title extraction from raw content.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use super::front_matter;

/// Extract a title from raw content.
///
/// Front matter is skipped, then the first Markdown heading wins; HTML
/// content falls back to the first `<h1>`, then `<title>`.
pub fn extract(text: &str) -> Option<String> {
    let body = front_matter::extract(text).map_or(text, |(_, body)| body);
    markdown_heading(body).or_else(|| html_heading(body))
}

/// First heading in a Markdown event stream, any level.
fn markdown_heading(text: &str) -> Option<String> {
    let mut inside = false;
    let mut buf = String::new();
    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { .. }) => inside = true,
            Event::Text(t) if inside => buf.push_str(&t),
            Event::Code(t) if inside => buf.push_str(&t),
            Event::End(TagEnd::Heading(_)) => {
                let title = buf.trim();
                return (!title.is_empty()).then(|| title.to_string());
            }
            _ => {}
        }
    }
    None
}

/// First `<h1>` (then `<title>`) in an HTML document.
fn html_heading(text: &str) -> Option<String> {
    let dom = tl::parse(text, tl::ParserOptions::default()).ok()?;
    let parser = dom.parser();
    for selector in ["h1", "title"] {
        let Some(mut nodes) = dom.query_selector(selector) else {
            continue;
        };
        if let Some(node) = nodes.next().and_then(|handle| handle.get(parser)) {
            let title = node.inner_text(parser).trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}
