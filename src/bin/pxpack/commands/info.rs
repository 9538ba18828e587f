//! `pxpack info` command

use anyhow::{bail, Context, Result};

use super::build_context;
use crate::cli::{ConfigArgs, InfoArgs};
use pxpack::ops::{package_info, read_info, INFO_FILE};
use pxpack::util::GlobalContext;

pub fn execute(config: &ConfigArgs, args: InfoArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let ctx = build_context(&gctx, config)?;

    if !ctx.package_dir.is_dir() {
        bail!(
            "no package at {}\n\
             help: Run `pxpack package` first, or pass `--package-dir`",
            ctx.package_dir.display()
        );
    }

    // Metadata recorded at packaging time wins over the current settings
    let info = if ctx.package_dir.join(INFO_FILE).is_file() {
        read_info(&ctx.package_dir)?
    } else {
        package_info(&ctx.descriptor, &ctx.options, &ctx.package_dir)?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&info).context("failed to serialize package info")?;
        println!("{}", json);
    } else {
        println!("{}", info);
    }

    Ok(())
}
