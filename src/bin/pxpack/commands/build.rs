//! `pxpack build` command

use anyhow::Result;

use super::{build_context, load_recipe};
use crate::cli::ConfigArgs;
use pxpack::ops;
use pxpack::util::GlobalContext;

pub fn execute(args: &ConfigArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let recipe = load_recipe(&gctx, args)?;
    let ctx = build_context(&gctx, args)?;

    eprintln!(
        "   Compiling PhysX {} ({}, {})",
        recipe.package.version,
        ctx.variant(),
        ctx.options.linkage()
    );
    ops::build(&ctx, &recipe)?;
    eprintln!("    Finished {}", ctx.build_dir().display());

    Ok(())
}
