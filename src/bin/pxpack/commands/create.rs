//! `pxpack create` command

use anyhow::Result;

use super::{build_context, load_recipe};
use crate::cli::ConfigArgs;
use pxpack::ops;
use pxpack::util::GlobalContext;

pub fn execute(args: &ConfigArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let recipe = load_recipe(&gctx, args)?;
    let ctx = build_context(&gctx, args)?;

    let info = ops::create(&ctx, &recipe)?;
    eprintln!(
        "    Finished {} {} [{}] in {}",
        recipe.package.name,
        recipe.package.version,
        ops::package_id(&ctx.descriptor, &ctx.options),
        ctx.package_dir.display()
    );
    println!("{}", info);

    Ok(())
}
