//! `pxpack package` command

use anyhow::Result;

use super::build_context;
use crate::cli::ConfigArgs;
use pxpack::ops;
use pxpack::util::GlobalContext;

pub fn execute(args: &ConfigArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let ctx = build_context(&gctx, args)?;

    let info = ops::package(&ctx)?;
    eprintln!(
        "    Packaged {} ({} libraries) in {}",
        info.name,
        info.libs.len(),
        ctx.package_dir.display()
    );

    Ok(())
}
