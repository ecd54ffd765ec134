//! Content-addressed node identity using blake3.

use std::fmt;
use std::path::Path;

/// A 256-bit node identity: blake3 over the node's content and real path.
///
/// Two nodes with identical content at an identical real path always produce
/// the same id; changing either changes the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId([u8; 32]);

impl NodeId {
    /// Create a NodeId from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the identity for a content/path pair.
    pub fn compute(content: &str, real_path: &Path) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content.as_bytes());
        hasher.update(real_path.as_os_str().as_encoded_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full 64-character hex digest (the `id` metadata value).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Parse back from a hex digest.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Some(Self(arr))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated hex for display; the metadata value keeps the full digest
        write!(f, "{}", &self.to_hex()[..16])
    }
}
