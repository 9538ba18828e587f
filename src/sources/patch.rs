//! Applying recipe patches to the extracted source.

use std::path::Path;

use anyhow::{bail, Result};

use crate::core::recipe::{verify_patch_hash, Recipe};
use crate::util::process::ProcessBuilder;

/// Outcome of applying one patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    Applied,
    AlreadyApplied,
}

/// Verify and apply every recipe patch in order.
pub fn apply_patches(recipe: &Recipe, source_dir: &Path, git: &Path) -> Result<()> {
    for patch in &recipe.patches {
        let patch_path = recipe.patch_path(patch);

        if !patch_path.exists() {
            bail!(
                "patch file not found: {} (expected at {})",
                patch.file,
                patch_path.display()
            );
        }

        verify_patch_hash(&patch_path, &patch.sha256)?;

        if apply_single_patch(git, &patch_path, source_dir)? == PatchStatus::AlreadyApplied {
            tracing::info!("Patch already applied: {}", patch.file);
        }
    }

    Ok(())
}

/// Apply a single patch file with `git apply`.
///
/// A patch whose reverse applies cleanly is treated as already applied, so
/// re-running a build over a reused source tree is not an error.
pub fn apply_single_patch(git: &Path, patch_path: &Path, source_dir: &Path) -> Result<PatchStatus> {
    let check = ProcessBuilder::new(git)
        .args(["apply", "--check"])
        .arg(patch_path)
        .cwd(source_dir)
        .exec()?;

    if !check.status.success() {
        let reverse = ProcessBuilder::new(git)
            .args(["apply", "--reverse", "--check"])
            .arg(patch_path)
            .cwd(source_dir)
            .exec()?;

        if reverse.status.success() {
            return Ok(PatchStatus::AlreadyApplied);
        }

        let stderr = String::from_utf8_lossy(&check.stderr);
        bail!(
            "patch '{}' will not apply cleanly:\n{}",
            patch_path.display(),
            stderr
        );
    }

    tracing::info!("Applying patch: {}", patch_path.display());

    ProcessBuilder::new(git)
        .arg("apply")
        .arg(patch_path)
        .cwd(source_dir)
        .exec_and_check()?;

    Ok(PatchStatus::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::RECIPE_FILE;
    use crate::util::process::find_git;
    use std::fs;
    use tempfile::TempDir;

    const PATCH: &str = "\
--- a/CMakeLists.txt
+++ b/CMakeLists.txt
@@ -1 +1 @@
-cmake_minimum_required(VERSION 3.7)
+cmake_minimum_required(VERSION 3.10)
";

    fn source_tree(tmp: &TempDir) -> std::path::PathBuf {
        let src = tmp.path().join("source_subfolder");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.7)\n",
        )
        .unwrap();
        src
    }

    #[test]
    fn test_apply_single_patch_is_rerunnable() {
        let Some(git) = find_git() else {
            return;
        };
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp);
        let patch = tmp.path().join("0001-cmake-version.patch");
        fs::write(&patch, PATCH).unwrap();

        assert_eq!(apply_single_patch(&git, &patch, &src).unwrap(), PatchStatus::Applied);
        assert_eq!(
            fs::read_to_string(src.join("CMakeLists.txt")).unwrap(),
            "cmake_minimum_required(VERSION 3.10)\n"
        );

        assert_eq!(
            apply_single_patch(&git, &patch, &src).unwrap(),
            PatchStatus::AlreadyApplied
        );
    }

    #[test]
    fn test_apply_single_patch_conflict() {
        let Some(git) = find_git() else {
            return;
        };
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp);
        fs::write(src.join("CMakeLists.txt"), "project(PhysX)\n").unwrap();
        let patch = tmp.path().join("0001-cmake-version.patch");
        fs::write(&patch, PATCH).unwrap();

        let err = apply_single_patch(&git, &patch, &src).unwrap_err();
        assert!(err.to_string().contains("will not apply cleanly"));
    }

    #[test]
    fn test_apply_patches_checks_hash_first() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp);
        let patch = tmp.path().join("patches/0001.patch");
        fs::create_dir_all(patch.parent().unwrap()).unwrap();
        fs::write(&patch, PATCH).unwrap();

        let recipe_text = format!(
            r#"
[package]
name = "physx"
version = "4.1.1"

[source]
url = "https://example.com/PhysX.tar.gz"
sha256 = "{zero}"

[[patches]]
file = "patches/0001.patch"
sha256 = "{zero}"
"#,
            zero = "0".repeat(64)
        );
        let recipe = Recipe::parse(&recipe_text, &tmp.path().join(RECIPE_FILE)).unwrap();

        // The hash is checked before git is ever run
        let err = apply_patches(&recipe, &src, Path::new("git")).unwrap_err();
        assert!(err.to_string().contains("hash mismatch"));
    }
}
