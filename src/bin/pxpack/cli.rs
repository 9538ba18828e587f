//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pxpack::core::profile::parse_key_value;

/// pxpack - build and package the NVIDIA PhysX SDK
#[derive(Parser)]
#[command(name = "pxpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings, options and directories shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Profile file with [settings] and [options] tables
    #[arg(long, global = true, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Override a setting (os, arch, compiler, compiler.version, compiler.runtime, build_type)
    #[arg(short = 's', long = "setting", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub settings: Vec<(String, String)>,

    /// Override a recipe option (build_type, shared, enable_simd, enable_float_point_precise_math)
    #[arg(short = 'o', long = "option", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Recipe file (defaults to ./Recipe.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub recipe: Option<PathBuf>,

    /// Directory for the extracted source and build tree
    #[arg(long, global = true, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Directory the package is assembled into
    #[arg(long, global = true, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the configuration can be built
    Validate,

    /// Download and extract the PhysX source
    Source,

    /// Patch, configure and build the extracted source
    Build,

    /// Install the build and assemble the package
    Package,

    /// Show consumer metadata for an assembled package
    Info(InfoArgs),

    /// Run source, build and package in order
    Create,

    /// Print the binary package identifier
    PackageId(PackageIdArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PackageIdArgs {
    /// Also list the settings and options the identifier is computed from
    #[arg(long)]
    pub inputs: bool,
}
