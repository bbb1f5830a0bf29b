//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Goforge - Go toolchain provisioning and tool builds
///
/// Downloads pinned Go releases into a content-addressed cache, fetches
/// prebuilt tool binaries from GitHub releases, and builds tools from
/// source with a hermetic environment.
#[derive(Parser, Debug)]
#[command(name = "goforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GOFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a toolchain and build a tool from source
    Build(BuildArgs),

    /// Install a prebuilt tool binary from a GitHub release
    FetchBin(FetchBinArgs),

    /// Print the resolved toolchain download for the host platform
    Resolve(ResolveArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Tool source directory containing the Go module to build
    pub tool_source: PathBuf,

    /// Toolchain version to use (e.g. 1.23.4)
    #[arg(long)]
    pub go_version: Option<String>,

    /// Cache root for downloaded toolchains
    #[arg(long, env = "GOFORGE_DATA_ROOT")]
    pub data_root: Option<PathBuf>,
}

/// Arguments for the fetch-bin command
#[derive(Parser, Debug)]
pub struct FetchBinArgs {
    /// GitHub repository root URL (https://github.com/<account>/<repo>)
    pub repo: String,

    /// Destination tool directory (binary lands in its bin/ subdirectory)
    pub dest: PathBuf,

    /// Checked-out revision to match against release tags
    #[arg(long)]
    pub revision: String,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Toolchain version to resolve (e.g. 1.22.1)
    #[arg(long)]
    pub go_version: Option<String>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}
