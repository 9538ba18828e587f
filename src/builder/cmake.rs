//! CMake driver for the PhysX build.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::context::BuildContext;
use crate::select::cmake_defs::{cmake_definitions, CMakeDefinitions};
use crate::util::fs::ensure_dir;
use crate::util::process::{require_tool, ProcessBuilder};

/// Drives configure, build and install for one build context.
pub struct CMakeBuilder<'a> {
    ctx: &'a BuildContext,
    cmake: PathBuf,
    definitions: CMakeDefinitions,
}

impl<'a> CMakeBuilder<'a> {
    /// Create a builder, locating cmake and computing definitions.
    pub fn new(ctx: &'a BuildContext) -> Result<Self> {
        let cmake = require_tool("cmake", ctx.cmake.as_deref())?;
        Ok(Self::with_cmake(ctx, cmake))
    }

    /// Create a builder with an explicit cmake executable.
    pub fn with_cmake(ctx: &'a BuildContext, cmake: PathBuf) -> Self {
        let definitions = cmake_definitions(
            &ctx.descriptor,
            &ctx.options,
            &ctx.source_dir(),
            &ctx.package_dir,
        );

        CMakeBuilder {
            ctx,
            cmake,
            definitions,
        }
    }

    /// The `-D` definitions passed at configure time.
    pub fn definitions(&self) -> &CMakeDefinitions {
        &self.definitions
    }

    /// Configure and build.
    pub fn build(&self) -> Result<()> {
        self.configure()?;
        self.compile()
    }

    /// Run CMake configuration.
    pub fn configure(&self) -> Result<()> {
        tracing::info!(
            "Configuring PhysX ({}, {})",
            self.ctx.variant(),
            self.ctx.options.linkage()
        );

        ensure_dir(&self.ctx.build_dir())?;
        run_step("CMake configuration", self.configure_command())
    }

    /// Run CMake build.
    pub fn compile(&self) -> Result<()> {
        tracing::info!("Building PhysX");
        run_step("CMake build", self.build_command())
    }

    /// Run CMake install into the package directory.
    pub fn install(&self) -> Result<()> {
        tracing::info!("Installing PhysX into {}", self.ctx.package_dir.display());
        run_step("CMake install", self.install_command())
    }

    /// `cmake -S <src> -B <build> [-G <gen>] -D...`
    pub fn configure_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(self.ctx.cmake_source_dir())
            .arg("-B")
            .arg(self.ctx.build_dir());

        if let Some(generator) = &self.ctx.generator {
            cmd = cmd.arg("-G").arg(generator);
        }

        cmd.args(self.definitions.to_args())
    }

    /// `cmake --build <build> --config <variant> [--parallel N]`
    pub fn build_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(self.ctx.build_dir())
            .arg("--config")
            .arg(self.ctx.variant().as_str());

        if let Some(jobs) = self.ctx.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }

        cmd
    }

    /// `cmake --install <build> --config <variant> --prefix <package>`
    pub fn install_command(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.cmake)
            .arg("--install")
            .arg(self.ctx.build_dir())
            .arg("--config")
            .arg(self.ctx.variant().as_str())
            .arg("--prefix")
            .arg(&self.ctx.package_dir)
    }
}

fn run_step(what: &str, cmd: ProcessBuilder) -> Result<()> {
    let output = cmd.exec()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} failed:\n{}", what, stderr);
    }

    Ok(())
}
