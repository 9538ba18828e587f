//! `pxpack validate` command

use anyhow::Result;

use super::resolve_configuration;
use crate::cli::ConfigArgs;
use pxpack::ops::package_id;
use pxpack::select::select;
use pxpack::util::GlobalContext;

pub fn execute(args: &ConfigArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let (descriptor, options) = resolve_configuration(&gctx, args)?;

    let selection = select(&descriptor, &options)?;

    eprintln!("    Accepted {} [{}]", descriptor, options);
    tracing::debug!("defines: {:?}", selection.defines);
    tracing::debug!("cxxflags: {:?}", selection.cxxflags);
    tracing::debug!("system libs: {:?}", selection.system_libs);
    if let Some(aux) = &selection.auxiliary {
        tracing::debug!("auxiliary binaries: {:?}", aux);
    }

    println!("{}", package_id(&descriptor, &options));

    Ok(())
}
