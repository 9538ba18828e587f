//! Implementation of `pxpack build`.

use anyhow::{bail, Result};

use crate::builder::{BuildContext, CMakeBuilder};
use crate::core::recipe::Recipe;
use crate::select::validate;
use crate::sources::apply_patches;
use crate::util::process::require_tool;

/// Patch, configure and build the extracted source.
///
/// The configuration is validated before anything is run.
pub fn build(ctx: &BuildContext, recipe: &Recipe) -> Result<()> {
    validate(&ctx.descriptor, &ctx.options)?;

    let source_dir = ctx.source_dir();
    if !source_dir.is_dir() {
        bail!(
            "source tree not found at {}\n\
             hint: run `pxpack source` first",
            source_dir.display()
        );
    }

    if !recipe.patches.is_empty() {
        let git = require_tool("git", ctx.git.as_deref())?;
        apply_patches(recipe, &source_dir, &git)?;
    }

    tracing::info!(
        "Building PhysX {} for {} [{}]",
        recipe.package.version,
        ctx.descriptor,
        ctx.options
    );

    CMakeBuilder::new(ctx)?.build()
}
