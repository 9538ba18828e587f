//! Source archive download and extraction.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use url::Url;

use crate::util::fs::ensure_dir;
use crate::util::hash::{sha256_bytes, verify_sha256};

/// Fetch an archive, verifying its SHA256.
///
/// Verified archives are kept in `cache_dir` under their hash, so a second
/// fetch of the same archive does not touch the network.
pub fn fetch_archive(url: &str, sha256: &str, cache_dir: &Path) -> Result<Vec<u8>> {
    let cached = cache_dir.join(format!("{}.tar.gz", sha256.to_ascii_lowercase()));

    if cached.is_file() {
        let data = std::fs::read(&cached)
            .with_context(|| format!("failed to read cached archive: {}", cached.display()))?;
        if sha256_bytes(&data).eq_ignore_ascii_case(sha256) {
            tracing::info!("Using cached archive {}", cached.display());
            return Ok(data);
        }
        tracing::warn!("Cached archive {} is corrupt, downloading again", cached.display());
    }

    let data = download(url)?;
    verify_sha256(url, &data, sha256)?;
    tracing::debug!("Archive hash verified: {}", &sha256[..16]);

    // A cache entry is either absent or complete
    ensure_dir(cache_dir)?;
    let mut partial = tempfile::NamedTempFile::new_in(cache_dir)
        .context("failed to create temporary archive file")?;
    partial
        .write_all(&data)
        .context("failed to write temporary archive file")?;
    partial
        .persist(&cached)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write archive cache: {}", cached.display()))?;

    Ok(data)
}

/// Download the bytes behind an `http(s)://` or `file://` URL.
pub fn download(url: &str) -> Result<Vec<u8>> {
    let parsed = Url::parse(url).with_context(|| format!("invalid URL: {}", url))?;

    if parsed.scheme() == "file" {
        let path = parsed
            .to_file_path()
            .map_err(|_| anyhow::anyhow!("invalid file URL: {}", url))?;
        return std::fs::read(&path)
            .with_context(|| format!("failed to read archive: {}", path.display()));
    }

    tracing::info!("Downloading {}", url);

    let response = reqwest::blocking::get(parsed)
        .with_context(|| format!("failed to download archive from {}", url))?;

    if !response.status().is_success() {
        bail!(
            "failed to download archive from {}: HTTP {}",
            url,
            response.status()
        );
    }

    let bytes = response
        .bytes()
        .context("failed to read archive response body")?;

    Ok(bytes.to_vec())
}

/// Extract a gzip-compressed tarball into `dest`.
///
/// Returns the top-level names the archive created. Entries that would land
/// outside `dest` are rejected.
pub fn extract_tarball(data: &[u8], dest: &Path) -> Result<BTreeSet<String>> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    ensure_dir(dest)?;

    let mut archive = Archive::new(GzDecoder::new(data));
    let mut top_level = BTreeSet::new();

    for entry in archive.entries().context("failed to read tarball entries")? {
        let mut entry = entry.context("failed to read tarball entry")?;
        let entry_path: PathBuf = entry
            .path()
            .context("failed to get entry path")?
            .into_owned();

        let Some(first) = first_normal_component(&entry_path)? else {
            continue;
        };

        match entry.header().entry_type() {
            tar::EntryType::XGlobalHeader | tar::EntryType::XHeader => continue,
            _ => {}
        }

        let unpacked = entry.unpack_in(dest).with_context(|| {
            format!("failed to extract {}", entry_path.display())
        })?;
        if !unpacked {
            bail!(
                "tarball entry escapes destination directory: {}",
                entry_path.display()
            );
        }

        top_level.insert(first);
    }

    Ok(top_level)
}

fn first_normal_component(path: &Path) -> Result<Option<String>> {
    for component in path.components() {
        match component {
            Component::Normal(name) => return Ok(Some(name.to_string_lossy().into_owned())),
            Component::CurDir => continue,
            _ => bail!("tarball entry escapes destination directory: {}", path.display()),
        }
    }
    Ok(None)
}
