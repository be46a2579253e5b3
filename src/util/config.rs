//! Configuration file support for rtsgen.
//!
//! rtsgen supports two configuration file locations:
//! - Global: `~/.rtsgen/config.toml` - User-wide defaults
//! - Project: `rtsgen.toml` in the working directory - Project overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE: &str = "rtsgen.toml";

/// rtsgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output tree locations
    pub output: OutputConfig,

    /// Template settings
    pub templates: TemplatesConfig,

    /// Build settings
    pub build: BuildConfig,
}

/// Where generated files go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of the output tree (default: `install`)
    pub dir: Option<PathBuf>,

    /// Board support packages (default: `<dir>/BSPs`)
    pub bsps: Option<PathBuf>,

    /// Project files for the shared runtime (default: `<dir>/lib/gnat`)
    pub prjs: Option<PathBuf>,

    /// Shared runtime sources (default: `<dir>/include/rts-sources`)
    pub srcs: Option<PathBuf>,

    /// Where the built runtimes will be installed
    pub prefix: Option<PathBuf>,
}

/// Template settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory replacing the built-in templates
    pub dir: Option<PathBuf>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Only generate the board support packages
    #[serde(default)]
    pub bsps_only: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Output settings
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
        if other.output.bsps.is_some() {
            self.output.bsps = other.output.bsps;
        }
        if other.output.prjs.is_some() {
            self.output.prjs = other.output.prjs;
        }
        if other.output.srcs.is_some() {
            self.output.srcs = other.output.srcs;
        }
        if other.output.prefix.is_some() {
            self.output.prefix = other.output.prefix;
        }

        // Template settings
        if other.templates.dir.is_some() {
            self.templates.dir = other.templates.dir;
        }

        // Build settings
        if other.build.bsps_only {
            self.build.bsps_only = true;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (rtsgen.toml)
/// 2. Global config (~/.rtsgen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global rtsgen config directory (~/.rtsgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".rtsgen"))
}

/// Get the global config path (~/.rtsgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (rtsgen.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}
