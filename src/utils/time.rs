//! Filesystem timestamps as unix seconds.

use std::fs::Metadata;
use std::time::SystemTime;

/// Seconds since the unix epoch; `None` for pre-epoch times.
pub fn unix_secs(time: SystemTime) -> Option<i64> {
    let elapsed = time.duration_since(SystemTime::UNIX_EPOCH).ok()?;
    i64::try_from(elapsed.as_secs()).ok()
}

/// Creation time of an entry as unix seconds.
///
/// Falls back to the modification time on filesystems without birth-time
/// support.
pub fn created_secs(meta: &Metadata) -> Option<i64> {
    meta.created()
        .or_else(|_| meta.modified())
        .ok()
        .and_then(unix_secs)
}

/// Last-access time of an entry as unix seconds.
pub fn accessed_secs(meta: &Metadata) -> Option<i64> {
    meta.accessed().ok().and_then(unix_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_secs_epoch() {
        assert_eq!(unix_secs(SystemTime::UNIX_EPOCH), Some(0));
    }

    #[test]
    fn test_created_and_accessed_present_for_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stamp.md");
        std::fs::write(&path, "x").unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(created_secs(&meta).is_some());
        assert!(accessed_secs(&meta).is_some());
    }
}
