//! Build command - provision a toolchain and compile a tool from source

use console::style;

use crate::cli::args::BuildArgs;
use crate::config::Config;
use crate::error::ForgeResult;
use crate::platform::Platform;
use crate::runtime::GoRuntime;

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config) -> ForgeResult<()> {
    let version = args
        .go_version
        .as_deref()
        .unwrap_or_else(|| config.go_version());
    let data_root = args.data_root.clone().unwrap_or_else(|| config.data_root());

    let runtime = GoRuntime::new(version);
    let env: Vec<String> = std::env::vars().map(|(k, v)| format!("{k}={v}")).collect();
    runtime.setup(&data_root, &args.tool_source, &env).await?;

    let artifact = args.tool_source.join(Platform::host().artifact_path());
    println!("{} {}", style("Built").green().bold(), artifact.display());
    Ok(())
}
