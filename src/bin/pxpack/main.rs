//! pxpack CLI - build and package the NVIDIA PhysX SDK

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pxpack=debug")
    } else {
        EnvFilter::new("pxpack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = &cli.config;
    match cli.command {
        Commands::Validate => commands::validate::execute(config),
        Commands::Source => commands::source::execute(config),
        Commands::Build => commands::build::execute(config),
        Commands::Package => commands::package::execute(config),
        Commands::Info(args) => commands::info::execute(config, args),
        Commands::Create => commands::create::execute(config),
        Commands::PackageId(args) => commands::package_id::execute(config, args),
    }
}
