//! Implementation of `pxpack source`.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::BuildContext;
use crate::core::recipe::Recipe;
use crate::sources::{extract_tarball, fetch_archive};
use crate::util::fs::{ensure_dir, rename_with_retry};

/// Fetch and unpack the PhysX source into the work directory.
///
/// The archive's top-level directory is renamed to `source_subfolder`. An
/// existing `source_subfolder` is reused as-is.
pub fn source(ctx: &BuildContext, recipe: &Recipe) -> Result<PathBuf> {
    let source_dir = ctx.source_dir();

    if source_dir.is_dir() {
        tracing::info!("Reusing source tree at {}", source_dir.display());
        return Ok(source_dir);
    }

    ensure_dir(&ctx.work_dir)?;

    let data = fetch_archive(&recipe.source.url, &recipe.source.sha256, &ctx.download_dir)?;
    let top_level = extract_tarball(&data, &ctx.work_dir)?;

    let extracted_name = recipe.extracted_dir_name();
    let extracted = ctx.work_dir.join(&extracted_name);
    if !extracted.is_dir() {
        bail!(
            "archive did not contain `{}` (top-level entries: {})\n\
             hint: set `root_dir` in the recipe's [source] table",
            extracted_name,
            top_level.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    rename_with_retry(&extracted, &source_dir, ctx.rename_retry_delay)?;

    tracing::info!(
        "Extracted PhysX {} to {}",
        recipe.package.version,
        source_dir.display()
    );

    Ok(source_dir)
}
