//! Text-parsing collaborators: front matter, titles, summaries.
//!
//! The content core consumes these through [`MetadataProvider`] and knows
//! nothing about the grammar itself; [`MarkupProvider`] is the bundled
//! implementation for Markdown and HTML content.

pub mod front_matter;
pub mod shorten;
pub mod title;

use crate::node::meta::MetaMap;

/// Capability boundary for pulling semantic metadata out of raw text.
///
/// Implementations must be pure: same text in, same values out, no side
/// effects.
pub trait MetadataProvider {
    /// Extract a title from raw text, if one can be found.
    fn parse_title(&self, text: &str) -> Option<String>;

    /// Extract embedded front matter as a metadata map.
    ///
    /// Text without front matter yields an empty map.
    fn parse_meta(&self, text: &str) -> MetaMap;

    /// Produce a short plain-text summary.
    fn shorten(&self, text: &str) -> String;
}

/// Front matter + Markdown/HTML title provider.
#[derive(Debug, Clone, Copy)]
pub struct MarkupProvider {
    /// Maximum summary length in characters.
    pub summary_limit: usize,
}

impl MarkupProvider {
    pub const fn new() -> Self {
        Self {
            summary_limit: shorten::DEFAULT_LIMIT,
        }
    }

    pub const fn with_limit(limit: usize) -> Self {
        Self {
            summary_limit: limit,
        }
    }
}

impl Default for MarkupProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for MarkupProvider {
    fn parse_title(&self, text: &str) -> Option<String> {
        title::extract(text)
    }

    fn parse_meta(&self, text: &str) -> MetaMap {
        front_matter::extract(text).map_or_else(MetaMap::new, |(meta, _)| meta)
    }

    fn shorten(&self, text: &str) -> String {
        shorten::shorten(text, self.summary_limit)
    }
}
