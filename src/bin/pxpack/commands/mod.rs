//! Command implementations

pub mod build;
pub mod create;
pub mod info;
pub mod package;
pub mod package_id;
pub mod source;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::ConfigArgs;
use pxpack::builder::BuildContext;
use pxpack::core::{PlatformDescriptor, Profile, Recipe, RecipeOptions, RECIPE_FILE};
use pxpack::util::GlobalContext;

/// Resolve the target platform and recipe options.
///
/// Settings start from the host defaults; options from the `[options]`
/// table of the configuration. A `--profile` file is applied on top, then
/// any `-s`/`-o` values from the command line.
pub fn resolve_configuration(
    gctx: &GlobalContext,
    args: &ConfigArgs,
) -> Result<(PlatformDescriptor, RecipeOptions)> {
    let mut profile = Profile {
        options: gctx.config().options.clone(),
        ..Profile::default()
    };

    if let Some(path) = &args.profile {
        profile.merge(Profile::load(path)?);
    }

    for (key, value) in &args.settings {
        profile.set_setting(key, value);
    }
    for (key, value) in &args.options {
        profile.set_option(key, value);
    }

    profile.resolve(PlatformDescriptor::host())
}

/// Build the pipeline context for the resolved configuration.
pub fn build_context(gctx: &GlobalContext, args: &ConfigArgs) -> Result<BuildContext> {
    let (descriptor, options) = resolve_configuration(gctx, args)?;
    tracing::debug!("configuration: {} [{}]", descriptor, options);

    let mut ctx = BuildContext::from_global(gctx, descriptor, options);
    if let Some(dir) = &args.work_dir {
        ctx = ctx.with_work_dir(absolute(gctx, dir));
    }
    if let Some(dir) = &args.package_dir {
        ctx = ctx.with_package_dir(absolute(gctx, dir));
    }

    Ok(ctx)
}

/// Load the recipe named by `--recipe`, or `Recipe.toml` in the current
/// directory.
pub fn load_recipe(gctx: &GlobalContext, args: &ConfigArgs) -> Result<Recipe> {
    let path = match &args.recipe {
        Some(path) => absolute(gctx, path),
        None => gctx.cwd().join(RECIPE_FILE),
    };

    Recipe::load(&path).with_context(|| {
        format!(
            "could not load recipe\n\
             help: pass `--recipe <FILE>` or create {} in {}",
            RECIPE_FILE,
            gctx.cwd().display()
        )
    })
}

fn absolute(gctx: &GlobalContext, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        gctx.cwd().join(path)
    }
}
