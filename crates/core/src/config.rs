//! Enrichment toggles.
//!
//! [`EnhanceConfig`] is resolved once when an [`Enhancer`](crate::Enhancer) is built and
//! is never re-read while articles are processed. It can come from code (the builder),
//! from a JSON file, or from `~/.config/lustre/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{LustreError, Result};

/// The five enrichment toggles.
///
/// Missing keys in a JSON file keep their defaults, so `{"extract_og": true}` is a
/// complete config.
///
/// # Example
///
/// ```rust
/// use lustre_core::EnhanceConfig;
///
/// let config = EnhanceConfig::builder()
///     .extract_og(true)
///     .upgrade_enclosures(true)
///     .build();
/// assert!(config.inline_enhancement);
/// assert!(config.wants_page());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Rewrite lazy and srcset `<img>` tags in content (default: true).
    pub inline_enhancement: bool,

    /// Infer missing enclosure MIME types (default: true).
    pub fix_enclosure_type: bool,

    /// Fetch the article page for Open Graph data when the article has no images (default: false).
    pub extract_og: bool,

    /// Prepend `og:description` to thin content. Only used with `extract_og` (default: false).
    pub enhance_content: bool,

    /// Replace image enclosures with larger renditions found on the page (default: false).
    pub upgrade_enclosures: bool,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            inline_enhancement: true,
            fix_enclosure_type: true,
            extract_og: false,
            enhance_content: false,
            upgrade_enclosures: false,
        }
    }
}

impl EnhanceConfig {
    pub fn builder() -> EnhanceConfigBuilder {
        EnhanceConfigBuilder::new()
    }

    /// True when some enabled step may need the article page.
    pub fn wants_page(&self) -> bool {
        self.extract_og || self.upgrade_enclosures
    }

    /// Reads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LustreError::FileNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| LustreError::ConfigError(format!("{}: {e}", path.display())))
    }

    /// Resolves the config: an explicit path must exist, otherwise the user config
    /// file is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `~/.config/lustre/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("lustre").join("config.json"))
    }
}

/// Builder for [`EnhanceConfig`], starting from the defaults.
pub struct EnhanceConfigBuilder {
    config: EnhanceConfig,
}

impl EnhanceConfigBuilder {
    pub fn new() -> Self {
        Self { config: EnhanceConfig::default() }
    }

    pub fn inline_enhancement(mut self, value: bool) -> Self {
        self.config.inline_enhancement = value;
        self
    }

    pub fn fix_enclosure_type(mut self, value: bool) -> Self {
        self.config.fix_enclosure_type = value;
        self
    }

    pub fn extract_og(mut self, value: bool) -> Self {
        self.config.extract_og = value;
        self
    }

    pub fn enhance_content(mut self, value: bool) -> Self {
        self.config.enhance_content = value;
        self
    }

    pub fn upgrade_enclosures(mut self, value: bool) -> Self {
        self.config.upgrade_enclosures = value;
        self
    }

    pub fn build(self) -> EnhanceConfig {
        self.config
    }
}

impl Default for EnhanceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
