//! `pxpack package-id` command

use anyhow::Result;

use super::resolve_configuration;
use crate::cli::{ConfigArgs, PackageIdArgs};
use pxpack::ops::{package_id, package_id_inputs};
use pxpack::util::GlobalContext;

pub fn execute(config: &ConfigArgs, args: PackageIdArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let (descriptor, options) = resolve_configuration(&gctx, config)?;

    println!("{}", package_id(&descriptor, &options));

    if args.inputs {
        for (key, value) in package_id_inputs(&descriptor, &options) {
            println!("  {} = {}", key, value);
        }
    }

    Ok(())
}
