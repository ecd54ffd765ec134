//! Canonical root-relative slugs.

use std::path::{Path, PathBuf};

use crate::utils::path::{real_path, stem};

/// Compute the canonical root-relative slug for a path.
///
/// Directories address themselves; files address their parent directory
/// plus their extension-less name, except `index` files which collapse to
/// the containing directory.
///
/// Relativization is path-aware: the root is normalized first and stripped
/// as a whole-path prefix, so trailing slashes or `.` segments in the
/// supplied root do not change the result. The content root itself yields
/// `/`; a root that is not a prefix leaves the full path untouched.
pub(crate) fn compute(path: &Path, root: &Path) -> String {
    let target = target(path);
    let root = real_path(root);
    match target.strip_prefix(&root) {
        Ok(rel) if rel.as_os_str().is_empty() => "/".to_string(),
        Ok(rel) => format!("/{}", rel.to_string_lossy()),
        Err(_) => target.to_string_lossy().into_owned(),
    }
}

fn target(path: &Path) -> PathBuf {
    if path.is_dir() {
        return real_path(path);
    }
    let dir = path.parent().map_or_else(|| real_path(path), real_path);
    let name = stem(path);
    if name == "index" { dir } else { dir.join(name) }
}
