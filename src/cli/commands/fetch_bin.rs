//! Fetch-bin command - install a prebuilt release binary

use console::style;

use crate::cli::args::FetchBinArgs;
use crate::error::{ForgeError, ForgeResult};
use crate::platform::Platform;
use crate::runtime::GoRuntime;
use crate::types::Tool;

/// Execute the fetch-bin command
pub async fn execute(args: FetchBinArgs) -> ForgeResult<()> {
    let tool = Tool::from_git("", args.repo.clone(), args.revision.clone());
    let runtime = GoRuntime::new("");

    let (installed, _) = runtime.binary(&tool, &args.dest, &[]).await?;
    if !installed {
        return Err(ForgeError::NoPrebuiltBinary { repo: args.repo });
    }

    let path = args.dest.join("bin").join(Platform::host().target_bin_name());
    println!("{} {}", style("Installed").green().bold(), path.display());
    Ok(())
}
