//! Configuration file support for pxpack.
//!
//! pxpack supports two configuration file locations:
//! - Global: `~/.pxpack/config.toml` - User-wide defaults
//! - Project: `.pxpack/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Delay before the single retry of the source rename.
pub const DEFAULT_RENAME_RETRY_SECS: u64 = 10;

/// pxpack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// External tool overrides
    pub tools: ToolsConfig,

    /// Default recipe option values, applied before profile and CLI options
    pub options: BTreeMap<String, toml::Value>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Directory holding downloads, the extracted source and the build tree
    pub work_dir: Option<PathBuf>,

    /// Directory the package is assembled into
    pub package_dir: Option<PathBuf>,

    /// Seconds to wait before retrying the source rename
    pub rename_retry_secs: Option<u64>,

    /// Parallel jobs passed to `cmake --build`
    pub jobs: Option<usize>,

    /// CMake generator (e.g. "Ninja")
    pub generator: Option<String>,
}

/// Paths to external tools; PATH lookup is used when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub cmake: Option<PathBuf>,
    pub git: Option<PathBuf>,
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
        if other.build.work_dir.is_some() {
            self.build.work_dir = other.build.work_dir;
        }
        if other.build.package_dir.is_some() {
            self.build.package_dir = other.build.package_dir;
        }
        if other.build.rename_retry_secs.is_some() {
            self.build.rename_retry_secs = other.build.rename_retry_secs;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }

        if other.tools.cmake.is_some() {
            self.tools.cmake = other.tools.cmake;
        }
        if other.tools.git.is_some() {
            self.tools.git = other.tools.git;
        }

        self.options.extend(other.options);
    }

    /// Delay before retrying the source rename.
    pub fn rename_retry_delay(&self) -> Duration {
        Duration::from_secs(
            self.build
                .rename_retry_secs
                .unwrap_or(DEFAULT_RENAME_RETRY_SECS),
        )
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.pxpack/config.toml)
/// 2. Global config (~/.pxpack/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global pxpack config directory (~/.pxpack).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".pxpack"))
}

/// Get the project config path (.pxpack/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".pxpack").join("config.toml")
}
