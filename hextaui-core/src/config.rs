//! Site configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. CLI flags on `hextaui serve`
//! 2. `HEXTAUI_BASE_URL` / `HEXTAUI_BIND` environment variables
//! 3. Explicit `--config` file, or `./hextaui.yaml`, or
//!    `<platform config dir>/hextaui/config.yaml`
//! 4. Built-in defaults
//!
//! ```yaml
//! base_url: https://hextaui.com
//! bind: 127.0.0.1:3000
//! data_dir: ./data
//! cache_max_age: 3600
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::markdown::DEFAULT_BASE_URL;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "hextaui.yaml";

pub const ENV_BASE_URL: &str = "HEXTAUI_BASE_URL";
pub const ENV_BIND: &str = "HEXTAUI_BIND";

/// Runtime configuration for the catalog server and CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public site URL used in generated links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Socket address the server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory with catalog YAML files (embedded data when unset)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// `max-age` and `s-maxage` for markdown responses, in seconds
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bind: default_bind(),
            data_dir: None,
            cache_max_age: default_cache_max_age(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_cache_max_age() -> u64 {
    3600
}

impl SiteConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to parse site config YAML")
    }

    /// Load configuration from a file path
    ///
    /// Relative `data_dir` values are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config: {}", path.display()))?;

        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse site config: {}", path.display()))?;

        if let (Some(data_dir), Some(parent)) = (&config.data_dir, path.parent()) {
            if data_dir.is_relative() {
                config.data_dir = Some(parent.join(data_dir));
            }
        }

        Ok(config)
    }

    /// Resolve configuration from the standard locations, then apply
    /// environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover_file() {
                Some(path) => {
                    debug!("Using site config at {}", path.display());
                    Self::from_file(&path)?
                }
                None => {
                    debug!("No site config found, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config.with_env_overrides())
    }

    /// First existing config file: project, then platform config dir
    fn discover_file() -> Option<PathBuf> {
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        directories::ProjectDirs::from("com", "hextaui", "hextaui")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .filter(|path| path.is_file())
    }

    /// Apply `HEXTAUI_BASE_URL` and `HEXTAUI_BIND` when set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(base_url) = non_empty_env(ENV_BASE_URL) {
            debug!("{} overrides base_url", ENV_BASE_URL);
            self.base_url = base_url;
        }
        if let Some(bind) = non_empty_env(ENV_BIND) {
            debug!("{} overrides bind", ENV_BIND);
            self.bind = bind;
        }
        self
    }

    /// `Cache-Control` value for markdown responses
    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={age}, s-maxage={age}",
            age = self.cache_max_age
        )
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
