//! Front matter extraction: fenced TOML or simple key/value blocks.

use serde_json::Value;
use tracing::debug;

use crate::node::meta::MetaMap;

const TOML_FENCE: &str = "+++";
const PAIRS_FENCE: &str = "---";

/// Split leading front matter from a text.
///
/// Recognizes `+++` fenced TOML and `---` fenced `key: value` blocks at the
/// very start of the text (leading whitespace allowed). The closing fence
/// must sit on its own line. Returns the parsed map and the body after the
/// closing fence, or `None` when no block is present.
pub fn extract(text: &str) -> Option<(MetaMap, &str)> {
    let trimmed = text.trim_start();
    for (fence, toml) in [(TOML_FENCE, true), (PAIRS_FENCE, false)] {
        let Some(rest) = trimmed.strip_prefix(fence) else {
            continue;
        };
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
        let (block, body) = split_at_fence(rest, fence)?;
        let meta = if toml {
            parse_toml(block)
        } else {
            parse_pairs(block)
        };
        return Some((meta, body));
    }
    None
}

/// Find the closing fence line and split block from body.
fn split_at_fence<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    None
}

fn parse_toml(block: &str) -> MetaMap {
    match block.parse::<toml::Table>() {
        Ok(table) => table
            .into_iter()
            .map(|(key, value)| (key, toml_to_json(value)))
            .collect(),
        Err(err) => {
            debug!("front matter TOML rejected: {err}");
            MetaMap::new()
        }
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Parse a simple `key: value` block, coercing booleans and integers.
fn parse_pairs(block: &str) -> MetaMap {
    let mut meta = MetaMap::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        meta.insert(key.to_string(), coerce_scalar(value.trim()));
    }
    meta
}

fn coerce_scalar(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    Value::String(raw.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toml_front_matter() {
        let text = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\norder = 3\n+++\n\n# Body";
        let (meta, body) = extract(text).unwrap();

        assert_eq!(meta.get("title"), Some(&json!("Hello")));
        assert_eq!(meta.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(meta.get("order"), Some(&json!(3)));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_pairs_front_matter_coerces_scalars() {
        let text = "---\ntitle: Hello\norder: 42\ntwig: true\ndraft: FALSE\n---\nbody";
        let (meta, body) = extract(text).unwrap();

        assert_eq!(meta.get("title"), Some(&json!("Hello")));
        assert_eq!(meta.get("order"), Some(&json!(42)));
        assert_eq!(meta.get("twig"), Some(&json!(true)));
        assert_eq!(meta.get("draft"), Some(&json!(false)));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_front_matter() {
        assert!(extract("# Just content").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_unclosed_fence_is_not_front_matter() {
        assert!(extract("+++\ntitle = \"Hello\"\n\n# Body").is_none());
    }

    #[test]
    fn test_fence_must_be_own_line() {
        // `---` embedded mid-line never closes the block
        let text = "---\ntitle: a --- b\n---\nbody";
        let (meta, body) = extract(text).unwrap();
        assert_eq!(meta.get("title"), Some(&json!("a --- b")));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_invalid_toml_yields_empty_map() {
        let text = "+++\nnot toml ===\n+++\nbody";
        let (meta, body) = extract(text).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_toml_datetime_becomes_string() {
        let text = "+++\ndate = 2024-06-15\n+++\n";
        let (meta, _) = extract(text).unwrap();
        assert_eq!(meta.get("date"), Some(&json!("2024-06-15")));
    }

    #[test]
    fn test_pairs_skips_comments_and_blanks() {
        let text = "---\n# a comment\n\ntitle: Hello\n---\n";
        let (meta, _) = extract(text).unwrap();
        assert_eq!(meta.len(), 1);
    }
}
