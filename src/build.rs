//! Go build invocation
//!
//! The build always runs the cached toolchain's `go` binary with a fully
//! explicit environment; nothing is inherited from the parent process. A
//! non-zero exit surfaces the child's stderr verbatim.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{ForgeError, ForgeResult};
use crate::platform::Platform;

/// Run `program args..` in `cwd` with exactly `env` as the environment.
/// Entries without `=` are skipped. The child is killed if the future is
/// dropped before it exits.
async fn run(program: &Path, args: &[&str], cwd: &Path, env: &[String]) -> ForgeResult<()> {
    let command_line = format!("{} {}", program.display(), args.join(" "));
    debug!("running: {command_line} (cwd {})", cwd.display());

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(cwd)
        .env_clear()
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for entry in env {
        if let Some((key, value)) = entry.split_once('=') {
            cmd.env(key, value);
        }
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| ForgeError::command_failed(command_line.clone(), e))?;
    if !output.status.success() {
        return Err(ForgeError::BuildFailed {
            command: command_line,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}

/// Compile the tool in `source_dir` into its `bin/` artifact using the
/// toolchain at `go_bin_dir`.
pub async fn run_go_build(go_bin_dir: &Path, source_dir: &Path, env: &[String]) -> ForgeResult<()> {
    let go = go_bin_dir.join("go");
    let artifact = Platform::host().artifact_path();
    info!("building {} in {}", artifact.display(), source_dir.display());
    let artifact = artifact.to_string_lossy().into_owned();
    run(
        &go,
        &["build", "-buildvcs=false", "-o", artifact.as_str()],
        source_dir,
        env,
    )
    .await
}

/// Compile a credential helper subcommand (`./<helper>/cmd/`) in `cwd`
/// into `out_path`.
pub async fn run_credential_helper_build(
    go_bin_dir: &Path,
    helper: &str,
    out_path: &Path,
    cwd: &Path,
    env: &[String],
) -> ForgeResult<()> {
    let go = go_bin_dir.join("go");
    let out = out_path.to_string_lossy().into_owned();
    let pkg = format!("./{helper}/cmd/");
    info!("building credential helper {helper}");
    run(
        &go,
        &["build", "-buildvcs=false", "-o", out.as_str(), pkg.as_str()],
        cwd,
        env,
    )
    .await
}
