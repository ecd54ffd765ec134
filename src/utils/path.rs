//! Filesystem path normalization and name splitting.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute canonical form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`). A path that
/// cannot be canonicalized - typically because it does not exist - is
/// returned as-is when absolute, or joined onto the current directory when
/// relative, so even a missing entry gets a stable absolute form.
pub fn real_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Entry name without its final extension.
///
/// Works for files (`about.md` -> `about`) and directories (`docs` ->
/// `docs`); a dotted directory name loses its last segment, matching how
/// extensions are split everywhere else in the crate.
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Entry name with its extension.
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
