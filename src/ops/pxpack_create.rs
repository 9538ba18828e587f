//! Implementation of `pxpack create`: every step in order.

use anyhow::Result;

use crate::builder::BuildContext;
use crate::core::recipe::Recipe;
use crate::ops::pxpack_info::PackageInfo;
use crate::ops::{build, package, source};
use crate::select::validate;

/// Validate, fetch, build and package.
pub fn create(ctx: &BuildContext, recipe: &Recipe) -> Result<PackageInfo> {
    // Reject before downloading anything
    validate(&ctx.descriptor, &ctx.options)?;

    source(ctx, recipe)?;
    build(ctx, recipe)?;
    package(ctx)
}
