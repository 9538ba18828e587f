//! Implementation of `pxpack package`.

use anyhow::Result;

use crate::builder::{BuildContext, CMakeBuilder};
use crate::ops::pxpack_info::{package_info, write_info, PackageInfo};
use crate::select::{auxiliary_binary_path, validate};
use crate::util::fs::{
    copy_matching, hash_tree, move_matching, remove_dir_all_if_exists, write_string,
};

/// PhysX SDK license, shipped as `licenses/LICENSE`.
pub const PHYSX_LICENSE: &str = "\
Copyright (c) 2019 NVIDIA Corporation. All rights reserved.

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions
are met:
 * Redistributions of source code must retain the above copyright
   notice, this list of conditions and the following disclaimer.
 * Redistributions in binary form must reproduce the above copyright
   notice, this list of conditions and the following disclaimer in the
   documentation and/or other materials provided with the distribution.
 * Neither the name of NVIDIA CORPORATION nor the names of its
   contributors may be used to endorse or promote products derived
   from this software without specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS ``AS IS'' AND ANY
EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
PURPOSE ARE DISCLAIMED.  IN NO EVENT SHALL THE COPYRIGHT OWNER OR
CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY
OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.";

/// Where each installed file pattern ends up.
const LAYOUT: [(&str, &str); 5] = [
    ("*.a", "lib"),
    ("*.so", "lib"),
    ("*.dylib*", "lib"),
    ("*.lib", "lib"),
    ("*.dll", "bin"),
];

/// Install the build into the package directory and assemble the layout.
pub fn package(ctx: &BuildContext) -> Result<PackageInfo> {
    validate(&ctx.descriptor, &ctx.options)?;

    CMakeBuilder::new(ctx)?.install()?;
    assemble(ctx)?;

    let info = package_info(&ctx.descriptor, &ctx.options, &ctx.package_dir)?;
    write_info(&ctx.package_dir, &info)?;

    tracing::info!("Packaged PhysX into {}", ctx.package_dir.display());
    tracing::debug!("package tree hash: {}", hash_tree(&ctx.package_dir)?);
    Ok(info)
}

/// Rearrange an installed tree into the final package layout.
///
/// Libraries installed under `lib/<variant>/` are flattened into `lib/`
/// and `bin/`, the license is written, installed sources are dropped and
/// the prebuilt GPU/device binaries are copied in. Running it again over
/// its own output changes nothing.
pub fn assemble(ctx: &BuildContext) -> Result<()> {
    let package_dir = &ctx.package_dir;

    write_string(&package_dir.join("licenses").join("LICENSE"), PHYSX_LICENSE)?;

    let variant_lib_dir = ctx.installed_variant_lib_dir();
    for (pattern, dest) in LAYOUT {
        move_matching(&variant_lib_dir, pattern, &package_dir.join(dest))?;
    }

    remove_dir_all_if_exists(&variant_lib_dir)?;
    remove_dir_all_if_exists(&package_dir.join("source"))?;

    if let Some(aux) = auxiliary_binary_path(&ctx.descriptor, ctx.variant()) {
        let source_dir = ctx.source_dir();
        for copy in &aux.copies {
            let copied = copy_matching(
                &source_dir.join(&copy.dir),
                copy.pattern,
                &package_dir.join(copy.dest.as_str()),
            )?;
            tracing::debug!(
                "Copied {} prebuilt binaries from {}",
                copied.len(),
                copy.dir.display()
            );
        }
    }

    Ok(())
}
