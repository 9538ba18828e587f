//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions};
use walkdir::WalkDir;

use crate::util::hash::{sha256_file, Fingerprint};

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Files under `base` matching a glob pattern, sorted.
///
/// A missing `base` yields no files.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();
    if !base.is_dir() {
        return Ok(results);
    }

    // `[` in a build directory name must not be read as a character class
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&base.to_string_lossy()),
        pattern
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    for entry in
        glob_with(&full_pattern, options).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}

/// Copy files in `src_dir` matching `pattern` into `dst_dir`, flattened.
///
/// Returns the destination paths.
pub fn copy_matching(src_dir: &Path, pattern: &str, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    transfer_matching(src_dir, pattern, dst_dir, |from, to| {
        fs::copy(from, to).map(|_| ())
    })
}

/// Move files in `src_dir` matching `pattern` into `dst_dir`, flattened.
///
/// Returns the destination paths.
pub fn move_matching(src_dir: &Path, pattern: &str, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    transfer_matching(src_dir, pattern, dst_dir, |from, to| {
        // rename fails across filesystems; fall back to copy + delete
        fs::rename(from, to).or_else(|_| {
            fs::copy(from, to)?;
            fs::remove_file(from)
        })
    })
}

fn transfer_matching(
    src_dir: &Path,
    pattern: &str,
    dst_dir: &Path,
    transfer: impl Fn(&Path, &Path) -> std::io::Result<()>,
) -> Result<Vec<PathBuf>> {
    let files = glob_files(src_dir, pattern)?;
    if files.is_empty() {
        return Ok(Vec::new());
    }

    ensure_dir(dst_dir)?;
    let mut copied = Vec::with_capacity(files.len());

    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let dest = dst_dir.join(name);
        transfer(&file, &dest).with_context(|| {
            format!("failed to copy {} to {}", file.display(), dest.display())
        })?;
        copied.push(dest);
    }

    Ok(copied)
}

/// Rename `from` to `to`, retrying once after `delay` on failure.
///
/// Freshly extracted trees are sometimes still held open by scanners or
/// indexers on Windows; a single delayed retry covers that case.
pub fn rename_with_retry(from: &Path, to: &Path, delay: Duration) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(first) => {
            tracing::warn!(
                "failed to rename {} to {} ({}), retrying in {:?}",
                from.display(),
                to.display(),
                first,
                delay
            );
            thread::sleep(delay);

            fs::rename(from, to).with_context(|| {
                format!(
                    "failed to rename {} to {} after retry",
                    from.display(),
                    to.display()
                )
            })
        }
    }
}

/// Hash every file under `root` by relative path and contents.
///
/// Two trees hash equal iff they hold the same files with the same bytes.
pub fn hash_tree(root: &Path) -> Result<String> {
    let mut fp = Fingerprint::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        fp.update_str(&relative.to_string_lossy().replace('\\', "/"));
        fp.update_str(&sha256_file(entry.path())?);
    }

    Ok(fp.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("libPhysX.a"), "a").unwrap();
        fs::write(tmp.path().join("libPhysX.so"), "so").unwrap();
        fs::write(tmp.path().join("readme.txt"), "readme").unwrap();
        fs::create_dir(tmp.path().join("nested.a")).unwrap();

        let files = glob_files(tmp.path(), "*.a").unwrap();
        assert_eq!(files, vec![tmp.path().join("libPhysX.a")]);

        assert!(glob_files(&tmp.path().join("missing"), "*").unwrap().is_empty());
    }

    #[test]
    fn test_copy_matching_flattens() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("bin");
        let dst = tmp.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("PhysXGpu_64.dll"), "gpu").unwrap();
        fs::write(src.join("PhysXDevice64.dll"), "dev").unwrap();

        let copied = copy_matching(&src, "PhysXGpu*.dll", &dst).unwrap();

        assert_eq!(copied, vec![dst.join("PhysXGpu_64.dll")]);
        assert!(src.join("PhysXGpu_64.dll").exists());
        assert!(!dst.join("PhysXDevice64.dll").exists());
    }

    #[test]
    fn test_copy_matching_missing_source_is_noop() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("out");

        let copied = copy_matching(&tmp.path().join("missing"), "*.dll", &dst).unwrap();
        assert!(copied.is_empty());
        assert!(!dst.exists());
    }

    #[test]
    fn test_move_matching() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("lib/release");
        let dst = tmp.path().join("lib");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("libPhysX.so"), "so").unwrap();

        move_matching(&src, "*.so", &dst).unwrap();

        assert!(dst.join("libPhysX.so").exists());
        assert!(!src.join("libPhysX.so").exists());
    }

    #[test]
    fn test_rename_with_retry_succeeds_first_time() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("PhysX-abc");
        let to = tmp.path().join("source_subfolder");
        fs::create_dir(&from).unwrap();

        rename_with_retry(&from, &to, Duration::from_secs(60)).unwrap();
        assert!(to.exists());
        assert!(!from.exists());
    }

    #[test]
    fn test_rename_with_retry_recovers() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("PhysX-abc");
        let to = tmp.path().join("source_subfolder");

        let creator = {
            let from = from.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                fs::create_dir(&from).unwrap();
            })
        };

        rename_with_retry(&from, &to, Duration::from_millis(500)).unwrap();
        creator.join().unwrap();
        assert!(to.exists());
    }

    #[test]
    fn test_rename_with_retry_gives_up_after_one_retry() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("missing");
        let to = tmp.path().join("source_subfolder");
        let delay = Duration::from_millis(20);

        let start = Instant::now();
        let err = rename_with_retry(&from, &to, delay).unwrap_err();

        assert!(start.elapsed() >= delay);
        assert!(err.to_string().contains("after retry"));
    }

    #[test]
    fn test_hash_tree() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();

        for root in [a.path(), b.path()] {
            fs::create_dir_all(root.join("lib")).unwrap();
            fs::write(root.join("lib/libPhysX.a"), "x").unwrap();
        }
        assert_eq!(hash_tree(a.path()).unwrap(), hash_tree(b.path()).unwrap());

        fs::write(b.path().join("lib/libPhysX.a"), "y").unwrap();
        assert_ne!(hash_tree(a.path()).unwrap(), hash_tree(b.path()).unwrap());
    }
}
