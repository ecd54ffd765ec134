//! Content nodes: lazily loaded files or directories with derived metadata.

pub mod id;
pub mod meta;
mod slug;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::resolve::{self, INDEX_CANDIDATES};
use crate::text::MetadataProvider;
use crate::utils::path::{basename, real_path, stem};
use crate::utils::time::{accessed_secs, created_secs};

use self::id::NodeId;
use self::meta::{MetaMap, NodeMeta, keys};

/// Errors surfaced by content loading and metadata derivation.
///
/// A missing file or directory is not an error - it collapses to empty
/// content. Only real storage faults (permissions, unreadable bytes) land
/// here.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// A resolvable unit of content: a file, or a directory with an `index`.
///
/// Content and metadata are loaded lazily and memoized per instance. The
/// node owns its memoization state exclusively - one node, one owner; the
/// `&mut self` getters make shared mutation impossible without an external
/// lock.
#[derive(Debug, Default)]
pub struct ContentNode {
    path: PathBuf,
    overrides: MetaMap,
    content: Option<String>,
    meta: Option<NodeMeta>,
    /// Child nodes, owned and populated entirely by the caller.
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create a node for a backing path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Attach caller-supplied metadata overrides.
    ///
    /// They merge over the filesystem defaults and under parsed front
    /// matter - see [`meta_with`](Self::meta_with).
    #[must_use]
    pub fn with_overrides(mut self, overrides: MetaMap) -> Self {
        self.overrides = overrides;
        self
    }

    /// Pre-supply content, skipping the first filesystem read.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Resolve a request path and wrap the match in a node.
    ///
    /// `None` when nothing matched - see [`resolve::resolve_path`].
    pub fn from_request(request: &Path, overrides: MetaMap) -> Option<Self> {
        resolve::resolve_path(request).map(|path| Self::new(path).with_overrides(overrides))
    }

    /// Backing filesystem path (immutable after construction).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing path currently names a file (queried live).
    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    /// Whether the backing path currently names a directory (queried live).
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    /// Node name without extension.
    pub fn name(&self) -> String {
        stem(&self.path)
    }

    /// Node name with extension.
    pub fn basename(&self) -> String {
        basename(&self.path)
    }

    /// Canonical absolute form of the backing path.
    pub fn real_path(&self) -> PathBuf {
        real_path(&self.path)
    }

    /// Owning directory: the node itself for directories, the parent for
    /// everything else.
    pub fn dir(&self) -> Option<PathBuf> {
        if self.path.is_dir() {
            return Some(self.real_path());
        }
        self.path.parent().map(real_path)
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Return the node's textual content, reading it on first access.
    ///
    /// Directories fall back to an `index.html` / `index.md` inside them,
    /// in that order; a missing backing file yields the empty string. The
    /// result - empty included - is memoized, so the filesystem is read at
    /// most once per instance.
    pub fn content(&mut self) -> Result<&str, NodeError> {
        if self.content.is_none() {
            let loaded = self.load_content()?;
            trace!(path = %self.path.display(), bytes = loaded.len(), "content loaded");
            self.content = Some(loaded);
        }
        Ok(self.content.as_deref().unwrap_or_default())
    }

    fn load_content(&self) -> Result<String, NodeError> {
        if self.path.is_dir() {
            for name in INDEX_CANDIDATES {
                let index = self.path.join(name);
                if index.is_file() {
                    return read_text(&index);
                }
            }
            return Ok(String::new());
        }
        if self.path.is_file() {
            return read_text(&self.path);
        }
        Ok(String::new())
    }

    /// Overwrite the memoized content.
    ///
    /// Metadata computed before the overwrite is NOT invalidated: derived
    /// values (`id`, `title`, parsed front matter) keep their old state
    /// until the node is rebuilt.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Shorthand for [`meta_with`](Self::meta_with) without extra overrides.
    pub fn meta(&mut self, provider: &dyn MetadataProvider) -> Result<NodeMeta, NodeError> {
        self.meta_with(provider, &MetaMap::new())
    }

    /// Return the node's metadata, deriving it on first call.
    ///
    /// Derivation merges rightmost-wins: filesystem defaults, overrides
    /// given at construction, front matter parsed from the content. The
    /// result is cached for the node's lifetime and never recomputed, even
    /// if the backing file changes. On later calls `extra` is layered
    /// *under* the cached map, so derived values stay authoritative.
    pub fn meta_with(
        &mut self,
        provider: &dyn MetadataProvider,
        extra: &MetaMap,
    ) -> Result<NodeMeta, NodeError> {
        if let Some(ref cached) = self.meta {
            let mut merged = NodeMeta::from_map(extra.clone());
            merged.overlay(cached.as_map().clone());
            return Ok(merged);
        }
        let derived = self.derive_meta(provider)?;
        self.meta = Some(derived.clone());
        Ok(derived)
    }

    fn derive_meta(&mut self, provider: &dyn MetadataProvider) -> Result<NodeMeta, NodeError> {
        let content = self.content()?.to_string();
        let title = provider
            .parse_title(&content)
            .unwrap_or_else(|| capitalize(&self.name()));

        let entry = fs::metadata(&self.path).ok();
        let created = entry.as_ref().and_then(created_secs);
        let access = entry.as_ref().and_then(accessed_secs);

        let mut meta = NodeMeta::new();
        meta.set(keys::ID, NodeId::compute(&content, &self.real_path()).to_hex());
        meta.set(keys::CLASS, self.name().to_lowercase().replace('.', ""));
        meta.set(keys::TITLE, title.clone());
        meta.set(keys::ORDER, title);
        meta.set(keys::DATE, created);
        meta.set(keys::CREATED, created);
        meta.set(keys::ACCESS, access);
        meta.set(keys::NAME, self.name());
        meta.set(keys::BASENAME, self.basename());
        meta.set(
            keys::DIR,
            self.dir().map(|d| d.to_string_lossy().into_owned()),
        );
        meta.set(
            keys::FILE,
            self.is_file()
                .then(|| self.real_path().to_string_lossy().into_owned()),
        );
        meta.set(keys::TWIG, false);

        meta.overlay(self.overrides.clone());
        meta.overlay(provider.parse_meta(&content));
        Ok(meta)
    }

    /// Read a metadata value by key.
    ///
    /// Before derivation this reads the constructor overrides; afterwards
    /// the cached map. Absent keys yield `None`, never an error.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.meta {
            Some(ref meta) => meta.get(key),
            None => self.overrides.get(key),
        }
    }

    /// Insert or overwrite a metadata value.
    ///
    /// Before derivation the value joins the override set and participates
    /// in the merge; afterwards it mutates the cached map directly.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        match self.meta {
            Some(ref mut meta) => meta.set(key, value),
            None => {
                self.overrides.insert(key.into(), value.into());
            }
        }
    }

    /// Whether a metadata key is present.
    pub fn has(&self, key: &str) -> bool {
        match self.meta {
            Some(ref meta) => meta.has(key),
            None => self.overrides.contains_key(key),
        }
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Canonical root-relative address of the node.
    ///
    /// Directories address themselves; files address their parent plus
    /// their extension-less name, except `index` files which collapse to
    /// the containing directory. See [`slug`] for the relativization rules.
    pub fn slug(&self, root: &Path) -> String {
        slug::compute(&self.path, root)
    }

    /// Whether this entry is a candidate content node.
    ///
    /// Directories pass unless their realpath is in `skip`. Files pass
    /// only with an `md` / `html` extension (case-insensitive) and an
    /// extension-less name not in `skip`.
    pub fn is_valid(&self, skip: &FxHashSet<String>) -> bool {
        if self.path.is_dir() {
            return !skip.contains(self.real_path().to_string_lossy().as_ref());
        }
        let Some(ext) = self.path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        (ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("html"))
            && !skip.contains(&self.name())
    }

    /// Automatic description: the `description` metadata value when set,
    /// else a shortened plain-text summary of the content.
    pub fn description(&mut self, provider: &dyn MetadataProvider) -> Result<String, NodeError> {
        let meta = self.meta(provider)?;
        if let Some(description) = meta.get_str(keys::DESCRIPTION) {
            return Ok(description.to_string());
        }
        Ok(provider.shorten(self.content()?))
    }
}

/// Read a file as UTF-8 text, treating a missing entry as empty.
fn read_text(path: &Path) -> Result<String, NodeError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(NodeError::Io(path.to_path_buf(), err)),
    }
}

/// Uppercase the first character (title fallback for bare names).
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
