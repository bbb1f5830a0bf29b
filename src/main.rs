//! Goforge - Go toolchain provisioning and tool builds
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use goforge::cli::{Cli, Commands};
use goforge::config::Config;
use goforge::error::ForgeResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ForgeResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("goforge=warn"),
        1 => EnvFilter::new("goforge=info"),
        _ => EnvFilter::new("goforge=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Build(args) => goforge::cli::commands::build(args, &config).await,
        Commands::FetchBin(args) => goforge::cli::commands::fetch_bin(args).await,
        Commands::Resolve(args) => goforge::cli::commands::resolve(args, &config).await,
    }
}
