//! Resolve command - show the toolchain download for the host platform

use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::error::ForgeResult;
use crate::index;
use crate::platform::Platform;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> ForgeResult<()> {
    let version = args
        .go_version
        .as_deref()
        .unwrap_or_else(|| config.go_version());

    let release = index::resolve(&format!("go{version}"), &Platform::host())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&release)?);
    } else {
        println!("{}", release.url);
        println!("sha256: {}", release.digest);
    }
    Ok(())
}
