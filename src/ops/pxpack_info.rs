//! Implementation of `pxpack info`.
//!
//! Describes how to consume an assembled package: which libraries to link
//! and in what order, which system libraries they need, and which defines
//! and flags the headers expect.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::RecipeOptions;
use crate::core::platform::PlatformDescriptor;
use crate::resolver::LinkOrder;
use crate::select::{build_defines, build_flags, system_libs};
use crate::util::fs::write_string;

/// File the metadata is written to inside the package directory.
pub const INFO_FILE: &str = "pxpack-info.json";

/// Library extensions that produce a link name.
const LIB_EXTENSIONS: [&str; 4] = ["a", "so", "dylib", "lib"];

/// Consumer-facing package metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Link names in link order
    pub libs: Vec<String>,
    pub system_libs: Vec<String>,
    pub defines: Vec<String>,
    pub cxxflags: Vec<String>,
}

impl fmt::Display for PackageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "libs: {}", self.libs.join(" "))?;
        writeln!(f, "system_libs: {}", self.system_libs.join(" "))?;
        writeln!(f, "defines: {}", self.defines.join(" "))?;
        write!(f, "cxxflags: {}", self.cxxflags.join(" "))
    }
}

/// Link names of the libraries in `lib_dir`, sorted by file name.
///
/// `libPhysX_64.so` becomes `PhysX_64`; `PhysX_64.lib` keeps its `lib`-less
/// stem. A missing directory has no libraries.
pub fn collect_libs(lib_dir: &Path) -> Result<Vec<String>> {
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = Vec::new();

    for entry in std::fs::read_dir(lib_dir)
        .with_context(|| format!("failed to read directory: {}", lib_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut libs: Vec<String> = Vec::new();
    for file in &files {
        let (Some(stem), Some(ext)) = (
            file.file_stem().and_then(|s| s.to_str()),
            file.extension().and_then(|e| e.to_str()),
        ) else {
            continue;
        };

        if !LIB_EXTENSIONS.contains(&ext) {
            continue;
        }

        let name = match stem.strip_prefix("lib") {
            Some(rest) if ext != "lib" => rest,
            _ => stem,
        };

        if !libs.iter().any(|l| l == name) {
            libs.push(name.to_string());
        }
    }

    Ok(libs)
}

/// Compute the metadata for an assembled package.
pub fn package_info(
    descriptor: &PlatformDescriptor,
    options: &RecipeOptions,
    package_dir: &Path,
) -> Result<PackageInfo> {
    let collected = collect_libs(&package_dir.join("lib"))?;
    let order = LinkOrder::physx();

    for artifact in order.classify_all(&collected) {
        if artifact.logical.is_none() {
            tracing::debug!("{} has no declared link position; linking it last", artifact.file);
        }
    }

    let libs = order.apply(&collected);
    tracing::info!("LIBRARIES: {:?}", libs);

    Ok(PackageInfo {
        name: "PhysX".to_string(),
        libs,
        system_libs: system_libs(descriptor),
        defines: build_defines(descriptor, options),
        cxxflags: build_flags(descriptor),
    })
}

/// Write the metadata as JSON into the package directory.
pub fn write_info(package_dir: &Path, info: &PackageInfo) -> Result<()> {
    let json = serde_json::to_string_pretty(info).context("failed to serialize package info")?;
    write_string(&package_dir.join(INFO_FILE), &format!("{}\n", json))
}

/// Read previously written metadata.
pub fn read_info(package_dir: &Path) -> Result<PackageInfo> {
    let path = package_dir.join(INFO_FILE);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read package info: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse package info: {}", path.display()))
}
