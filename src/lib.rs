//! Folio - a flat-file content core.
//!
//! Resolves request paths to backing files (exact file first, directory
//! `index` fallback second), wraps matches in lazily loaded
//! [`ContentNode`]s, and derives a metadata map - title, ordering key,
//! timestamps, visibility class, slug - from front matter, caller
//! overrides and filesystem state.
//!
//! ```no_run
//! use folio::{Config, ContentNode, MarkupProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("content");
//! let provider = MarkupProvider::new();
//!
//! if let Some(path) = config.resolver().resolve("/posts/hello") {
//!     let mut node = ContentNode::new(path).with_overrides(config.meta.clone());
//!     let meta = node.meta(&provider)?;
//!     println!(
//!         "{} -> {}",
//!         node.slug(&config.root),
//!         meta.get_str("title").unwrap_or_default()
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod node;
pub mod resolve;
pub mod text;
mod utils;

pub use config::{Config, ConfigError};
pub use node::id::NodeId;
pub use node::meta::{MetaMap, NodeMeta};
pub use node::{ContentNode, NodeError};
pub use resolve::{Resolver, resolve_path};
pub use text::{MarkupProvider, MetadataProvider};
