//! Recipe file parsing.
//!
//! A recipe is a small TOML file that pins where the PhysX source
//! distribution comes from and which patches are applied on top of it:
//!
//! ```toml
//! [package]
//! name = "physx"
//! version = "4.1.1"
//!
//! [source]
//! url = "https://github.com/NVIDIAGameWorks/PhysX/archive/<rev>.tar.gz"
//! sha256 = "<64 hex chars>"
//!
//! [[patches]]
//! file = "patches/0001-fix-cmake.patch"
//! sha256 = "<64 hex chars>"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::hash::sha256_file;

/// Default recipe file name.
pub const RECIPE_FILE: &str = "Recipe.toml";

/// Archive suffixes the source step can unpack.
const ARCHIVE_SUFFIXES: [&str; 2] = [".tar.gz", ".tgz"];

/// A parsed recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: RecipePackage,

    /// Source archive
    pub source: RecipeSource,

    /// Patches to apply in order
    #[serde(default)]
    pub patches: Vec<RecipePatch>,

    /// Directory the recipe was loaded from; patch paths are relative to it
    #[serde(skip)]
    pub root: PathBuf,
}

/// Package metadata in a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePackage {
    /// Package name (must be lowercase [a-z0-9_-])
    pub name: String,

    /// Exact version
    pub version: String,
}

/// Where the source archive comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSource {
    /// Download URL of a gzip-compressed tarball
    pub url: String,

    /// SHA256 hash of the archive
    pub sha256: String,

    /// Top-level directory inside the archive.
    ///
    /// Defaults to `PhysX-<archive stem>`, which is what GitHub produces
    /// for `archive/<rev>.tar.gz` downloads.
    #[serde(default)]
    pub root_dir: Option<String>,
}

/// A patch to apply to the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePatch {
    /// Path to patch file, relative to the recipe's directory
    pub file: String,

    /// SHA256 hash of the patch file bytes
    pub sha256: String,
}

impl Recipe {
    /// Load and parse a recipe file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe file: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse a recipe from TOML content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut recipe: Recipe = toml::from_str(content)
            .with_context(|| format!("failed to parse recipe file: {}", path.display()))?;

        recipe.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        recipe.validate()?;
        Ok(recipe)
    }

    /// Validate the recipe file contents.
    pub fn validate(&self) -> Result<()> {
        validate_package_name(&self.package.name)?;

        semver::Version::parse(&self.package.version)
            .with_context(|| format!("invalid version '{}' in recipe", self.package.version))?;

        if !is_sha256(&self.source.sha256) {
            bail!(
                "source sha256 must be a 64-character hex string, got '{}'",
                self.source.sha256
            );
        }

        let url = url::Url::parse(&self.source.url)
            .with_context(|| format!("invalid source URL '{}' in recipe", self.source.url))?;
        if !matches!(url.scheme(), "http" | "https" | "file") {
            bail!("unsupported URL scheme '{}' in recipe", url.scheme());
        }

        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        if !ARCHIVE_SUFFIXES.iter().any(|ext| file_name.ends_with(ext)) {
            bail!(
                "source archive '{}' is not a gzip-compressed tarball\n\
                 help: use the .tar.gz download of the release (GitHub serves \
                 `archive/<rev>.tar.gz` for every revision)",
                file_name
            );
        }

        for patch in &self.patches {
            if !is_sha256(&patch.sha256) {
                bail!(
                    "patch sha256 must be a 64-character hex string for '{}', got '{}'",
                    patch.file,
                    patch.sha256
                );
            }
        }

        Ok(())
    }

    /// Name of the directory the archive extracts to.
    pub fn extracted_dir_name(&self) -> String {
        if let Some(root_dir) = &self.source.root_dir {
            return root_dir.clone();
        }

        let file_name = self
            .source
            .url
            .rsplit('/')
            .next()
            .unwrap_or(&self.source.url);

        let stem = ARCHIVE_SUFFIXES
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext))
            .unwrap_or(file_name);

        format!("PhysX-{}", stem)
    }

    /// Absolute path of a patch file.
    pub fn patch_path(&self, patch: &RecipePatch) -> PathBuf {
        self.root.join(&patch.file)
    }
}

fn is_sha256(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate a package name.
///
/// Package names must be:
/// - Lowercase only
/// - Characters: [a-z0-9_-]
/// - Non-empty
/// - First character must be [a-z]
pub fn validate_package_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        bail!("package name cannot be empty");
    };

    if !first_char.is_ascii_lowercase() {
        bail!(
            "invalid package name '{}': must start with lowercase letter [a-z]",
            name
        );
    }

    for c in name.chars() {
        if !matches!(c, 'a'..='z' | '0'..='9' | '_' | '-') {
            bail!(
                "invalid package name '{}': only [a-z0-9_-] allowed, found '{}'",
                name,
                c
            );
        }
    }

    Ok(())
}

/// Verify a patch file's hash matches the expected value.
pub fn verify_patch_hash(patch_path: &Path, expected_hash: &str) -> Result<()> {
    let actual_hash = sha256_file(patch_path)?;

    if !actual_hash.eq_ignore_ascii_case(expected_hash) {
        bail!(
            "patch file hash mismatch for '{}': expected {}, got {}",
            patch_path.display(),
            expected_hash,
            actual_hash
        );
    }

    Ok(())
}
