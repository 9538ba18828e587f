//! Global context for pxpack operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Project directories for pxpack
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "pxpack", "pxpack"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Cache directory for downloaded archives
    cache: PathBuf,

    /// Merged global and project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let cache = if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.cache_dir().to_path_buf()
        } else {
            global_config_dir()
                .map(|h| h.join("cache"))
                .unwrap_or_else(|| cwd.join(".pxpack").join("cache"))
        };

        let global = global_config_dir().map(|dir| dir.join("config.toml"));
        let config = load_config(global.as_deref(), &project_config_path(&cwd));

        GlobalContext {
            cwd,
            cache,
            config,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the download cache directory.
    pub fn download_dir(&self) -> PathBuf {
        self.cache.join("downloads")
    }

    /// Get the project-local pxpack directory.
    pub fn project_dir(&self) -> PathBuf {
        self.cwd.join(".pxpack")
    }

    /// Work directory: configured value, else `.pxpack/work`.
    pub fn work_dir(&self) -> PathBuf {
        match &self.config.build.work_dir {
            Some(dir) => self.cwd.join(dir),
            None => self.project_dir().join("work"),
        }
    }

    /// Package directory: configured value, else `.pxpack/package`.
    pub fn package_dir(&self) -> PathBuf {
        match &self.config.build.package_dir {
            Some(dir) => self.cwd.join(dir),
            None => self.project_dir().join("package"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.download_dir().ends_with("downloads"));
    }

    #[test]
    fn test_default_dirs() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config(Config::default());

        assert_eq!(ctx.work_dir(), tmp.path().join(".pxpack/work"));
        assert_eq!(ctx.package_dir(), tmp.path().join(".pxpack/package"));
    }

    #[test]
    fn test_project_config_dirs() {
        let tmp = TempDir::new().unwrap();
        let config_path = project_config_path(tmp.path());
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "[build]\nwork-dir = \"build-physx\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.work_dir(), tmp.path().join("build-physx"));
    }
}
