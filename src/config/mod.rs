//! Site configuration: content root, skip list, site-wide metadata.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::node::meta::MetaMap;
use crate::resolve::Resolver;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Site configuration.
///
/// Loaded from a TOML file or built in code. `meta` holds site-wide
/// metadata overrides that callers merge into every node they construct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content root all requests resolve against.
    pub root: PathBuf,
    /// Names (files) and realpaths (directories) excluded from walks.
    pub skip: Vec<String>,
    /// Site-wide metadata overrides.
    pub meta: MetaMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            skip: Vec::new(),
            meta: MetaMap::new(),
        }
    }
}

impl Config {
    /// Build a config rooted at `root`, defaults elsewhere.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the content root exists and is a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content root `{}` is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// Resolver bound to the content root.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(&self.root)
    }

    /// Skip list as a lookup set for [`crate::ContentNode::is_valid`].
    pub fn skip_set(&self) -> FxHashSet<String> {
        self.skip.iter().cloned().collect()
    }
}
