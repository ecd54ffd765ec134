//! Request to backing-file resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::debug;

/// Index file names probed inside directories, in precedence order.
pub(crate) const INDEX_CANDIDATES: [&str; 2] = ["index.html", "index.md"];

/// Suffixes probed for exact file matches, in precedence order.
const SUFFIX_CANDIDATES: [&str; 2] = [".html", ".md"];

/// Map a request path to its backing content file.
///
/// Candidates are probed in strict precedence order, first existing wins:
///
/// 1. `<request>.html`
/// 2. `<request>.md`
/// 3. `<request>/index.html` when the request names a directory
/// 4. `<request>/index.md`
///
/// Probing stops at the first hit - the ordering IS the fallback policy.
/// `None` means no match and must be handled by the caller.
pub fn resolve_path(request: &Path) -> Option<PathBuf> {
    for suffix in SUFFIX_CANDIDATES {
        let candidate = with_suffix(request, suffix);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    if request.is_dir() {
        for name in INDEX_CANDIDATES {
            let candidate = request.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Append a literal suffix, keeping any existing extension
/// (`note.v2` -> `note.v2.html`, never an extension swap).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined = OsString::from(path.as_os_str());
    joined.push(suffix);
    PathBuf::from(joined)
}

/// Resolver bound to a content root.
///
/// Raw URL-ish requests are normalized before touching the filesystem:
/// percent decoding, query-string/fragment stripping, slash trimming and
/// `..` rejection.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw request string against the content root.
    ///
    /// An empty request (`""` or `"/"`) resolves the root itself, which
    /// falls through to its directory index.
    pub fn resolve(&self, request: &str) -> Option<PathBuf> {
        let clean = normalize_request(request)?;
        let target = if clean.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&clean)
        };
        let resolved = resolve_path(&target);
        debug!(request, resolved = ?resolved, "resolved request");
        resolved
    }
}

/// Decode and sanitize a request string.
///
/// Requests with a `..` segment are rejected outright rather than probed.
fn normalize_request(request: &str) -> Option<String> {
    let decoded = percent_decode_str(request)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| request.to_string());
    let path = decoded.split(['?', '#']).next().unwrap_or(&decoded);
    let clean = path.trim_matches('/');
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(clean.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn content_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.html"), "<h1>html</h1>").unwrap();
        fs::write(dir.path().join("foo.md"), "# md").unwrap();
        fs::write(dir.path().join("only.md"), "# only").unwrap();
        fs::create_dir(dir.path().join("bar")).unwrap();
        fs::write(dir.path().join("bar/index.md"), "# bar").unwrap();
        dir
    }

    #[test]
    fn test_html_wins_over_md() {
        let dir = content_dir();
        let resolved = resolve_path(&dir.path().join("foo")).unwrap();
        assert_eq!(resolved, dir.path().join("foo.html"));
    }

    #[test]
    fn test_md_fallback() {
        let dir = content_dir();
        let resolved = resolve_path(&dir.path().join("only")).unwrap();
        assert_eq!(resolved, dir.path().join("only.md"));
    }

    #[test]
    fn test_directory_index_fallback() {
        let dir = content_dir();
        let resolved = resolve_path(&dir.path().join("bar")).unwrap();
        assert_eq!(resolved, dir.path().join("bar/index.md"));
    }

    #[test]
    fn test_directory_index_html_wins() {
        let dir = content_dir();
        fs::write(dir.path().join("bar/index.html"), "<h1>bar</h1>").unwrap();
        let resolved = resolve_path(&dir.path().join("bar")).unwrap();
        assert_eq!(resolved, dir.path().join("bar/index.html"));
    }

    #[test]
    fn test_miss_is_none() {
        let dir = content_dir();
        assert_eq!(resolve_path(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_suffix_append_is_literal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("note.v2.md"), "# v2").unwrap();
        let resolved = resolve_path(&dir.path().join("note.v2")).unwrap();
        assert_eq!(resolved, dir.path().join("note.v2.md"));
    }

    #[test]
    fn test_resolver_trims_and_strips_query() {
        let dir = content_dir();
        let resolver = Resolver::new(dir.path());

        assert!(resolver.resolve("foo").is_some());
        assert!(resolver.resolve("/foo/").is_some());
        assert!(resolver.resolve("foo?draft=1").is_some());
        assert!(resolver.resolve("foo#section").is_some());
    }

    #[test]
    fn test_resolver_decodes_percent_encoding() {
        let dir = content_dir();
        let resolver = Resolver::new(dir.path());
        assert_eq!(
            resolver.resolve("%66oo"),
            Some(dir.path().join("foo.html"))
        );
    }

    #[test]
    fn test_resolver_rejects_traversal() {
        let dir = content_dir();
        let resolver = Resolver::new(dir.path().join("bar"));
        assert_eq!(resolver.resolve("../foo"), None);
        assert_eq!(resolver.resolve("%2e%2e/foo"), None);
    }

    #[test]
    fn test_resolver_empty_request_hits_root_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.md"), "# home").unwrap();
        let resolver = Resolver::new(dir.path());

        assert_eq!(resolver.resolve(""), Some(dir.path().join("index.md")));
        assert_eq!(resolver.resolve("/"), Some(dir.path().join("index.md")));
    }
}
