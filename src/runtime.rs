//! Go runtime: provisioning, prebuilt-binary fetch, and source builds
//!
//! This is the surface the surrounding execution engine drives. The
//! blocking download/extract pipeline runs on the blocking pool; child
//! processes are natively async and are killed when their future is
//! dropped.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::build;
use crate::buildenv;
use crate::cache::ToolchainCache;
use crate::checksum;
use crate::download;
use crate::error::{ForgeError, ForgeResult};
use crate::extract::ReleaseExtractor;
use crate::index;
use crate::platform::Platform;
use crate::release;
use crate::types::Tool;

/// Command marker a tool uses to request this runtime. The variable is
/// expanded by the execution engine, not here.
pub const TOOL_SENTINEL: &str = "${GOFORGE_TOOL_DIR}/bin/goforge-go-tool";

/// Where credential helper sources and built binaries live.
#[derive(Debug, Clone)]
pub struct CredentialHelperDirs {
    pub bin_dir: PathBuf,
    pub repo_dir: PathBuf,
}

/// A pinned Go toolchain version acting as a tool runtime.
#[derive(Debug, Clone)]
pub struct GoRuntime {
    version: String,
}

impl GoRuntime {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Runtime identifier, e.g. `go1.23.4`.
    pub fn id(&self) -> String {
        format!("go{}", self.version)
    }

    /// Whether this runtime handles the tool: git-sourced and invoked
    /// through the sentinel command.
    pub fn supports(&self, tool: &Tool, cmd: &[String]) -> bool {
        tool.source.is_git() && cmd.first().map(String::as_str) == Some(TOOL_SENTINEL)
    }

    /// Provision the toolchain and build the tool at `tool_source` from
    /// source. Returns the environment entries the built tool needs
    /// appended (currently the `PATH` augmentation).
    pub async fn setup(
        &self,
        data_root: &Path,
        tool_source: &Path,
        env: &[String],
    ) -> ForgeResult<Vec<String>> {
        let bin_dir = self.provision(data_root).await?;
        let new_env = buildenv::append_path(env, &bin_dir);

        let mut build_env = buildenv::strip_toolchain_vars(env);
        build_env.extend(new_env.iter().cloned());
        build::run_go_build(&bin_dir, tool_source, &build_env).await?;
        Ok(new_env)
    }

    /// Try to install a prebuilt release binary into
    /// `<tool_source>/bin/` instead of building. Any failure along the
    /// way declines silently: the caller falls back to `setup`.
    pub async fn binary(
        &self,
        tool: &Tool,
        tool_source: &Path,
        env: &[String],
    ) -> ForgeResult<(bool, Vec<String>)> {
        let Some(repo) = tool.source.repo.clone() else {
            return Ok(prebuilt_outcome(false, env));
        };
        let dest = tool_source.join("bin");

        let installed = tokio::task::spawn_blocking(move || {
            fetch_prebuilt(&repo.root, &repo.revision, &dest)
        })
        .await
        .map_err(|e| ForgeError::Internal(format!("prebuilt fetch task failed: {e}")))?;

        Ok(prebuilt_outcome(installed, env))
    }

    /// Ensure the toolchain is present in the cache under `data_root` and
    /// return its `bin` directory.
    pub async fn provision(&self, data_root: &Path) -> ForgeResult<PathBuf> {
        let release = index::resolve(&self.id(), &Platform::host())?;
        let cache = ToolchainCache::new(data_root);

        let entry = tokio::task::spawn_blocking(move || {
            cache.ensure(&release.url, &release.digest, &ReleaseExtractor)
        })
        .await
        .map_err(|e| ForgeError::Internal(format!("provisioning task failed: {e}")))??;

        Ok(ToolchainCache::bin_dir(&entry))
    }

    /// Build a git credential helper from its checked-out source. The
    /// `file` helper is builtin and needs nothing.
    pub async fn build_credential_helper(
        &self,
        helper: &str,
        dirs: &CredentialHelperDirs,
        data_root: &Path,
        revision: &str,
        env: &[String],
    ) -> ForgeResult<()> {
        if helper == "file" {
            return Ok(());
        }
        let suffix = if helper == "wincred" { ".exe" } else { "" };

        let bin_dir = self.provision(data_root).await?;
        let new_env = buildenv::append_path(env, &bin_dir);
        let mut build_env = buildenv::strip_toolchain_vars(env);
        build_env.extend(new_env);

        let out = dirs
            .bin_dir
            .join(format!("goforge-credential-{helper}{suffix}"));
        info!("building credential helper {helper}");
        build::run_credential_helper_build(
            &bin_dir,
            helper,
            &out,
            &dirs.repo_dir.join(revision),
            &build_env,
        )
        .await
    }
}

/// Shape of the `binary` result: a successful install hands the caller's
/// env back unchanged (the prebuilt binary needs no augmentation), a
/// decline carries no env at all.
fn prebuilt_outcome(installed: bool, env: &[String]) -> (bool, Vec<String>) {
    if installed {
        (true, env.to_vec())
    } else {
        (false, Vec::new())
    }
}

/// Blocking half of the prebuilt-binary path. `true` means the binary is
/// verified and in place; `false` means "build from source instead".
fn fetch_prebuilt(root: &str, revision: &str, dest_dir: &Path) -> bool {
    let Some(release) = release::resolve(root, revision) else {
        debug!("no release resolvable for {root}");
        return false;
    };
    let platform = Platform::host();

    let Some(digest) = checksum::fetch(&release, &release.src_bin_name(&platform)) else {
        debug!("no checksum entry for {root}, declining prebuilt binary");
        return false;
    };

    let url = release.bin_url(&platform);
    let dest = dest_dir.join(platform.target_bin_name());
    match download::fetch_verified(&url, &dest, &digest) {
        Ok(()) => {
            info!("installed prebuilt binary from {url}");
            true
        }
        Err(e) => {
            debug!("prebuilt binary download failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_tool() -> Tool {
        Tool::from_git("t", "https://github.com/acme/tool", "deadbeef")
    }

    #[test]
    fn id_carries_version() {
        assert_eq!(GoRuntime::new("1.23.4").id(), "go1.23.4");
    }

    #[test]
    fn supports_requires_git_and_sentinel() {
        let rt = GoRuntime::new("1.23.4");
        let sentinel = vec![TOOL_SENTINEL.to_string()];

        assert!(rt.supports(&git_tool(), &sentinel));
        assert!(!rt.supports(&Tool::default(), &sentinel));
        assert!(!rt.supports(&git_tool(), &["go run .".to_string()]));
        assert!(!rt.supports(&git_tool(), &[]));
    }

    #[test]
    fn prebuilt_success_returns_caller_env_verbatim() {
        let env = vec!["PATH=/bin".to_string(), "HOME=/home/x".to_string()];
        assert_eq!(prebuilt_outcome(true, &env), (true, env.clone()));
        assert_eq!(prebuilt_outcome(false, &env), (false, Vec::new()));
    }

    #[tokio::test]
    async fn binary_declines_non_git_tool() {
        let rt = GoRuntime::new("1.23.4");
        let dir = tempfile::tempdir().unwrap();
        let (installed, env) = rt
            .binary(&Tool::default(), dir.path(), &[])
            .await
            .unwrap();
        assert!(!installed);
        assert!(env.is_empty());
    }

    #[tokio::test]
    async fn binary_declines_foreign_host_without_network() {
        let rt = GoRuntime::new("1.23.4");
        let dir = tempfile::tempdir().unwrap();
        let tool = Tool::from_git("t", "https://example.com/acme/tool", "deadbeef");
        let (installed, _) = rt.binary(&tool, dir.path(), &[]).await.unwrap();
        assert!(!installed);
    }

    #[tokio::test]
    async fn setup_with_unknown_version_fails_before_network() {
        let rt = GoRuntime::new("0.0.0-nosuch");
        let dir = tempfile::tempdir().unwrap();
        let err = rt
            .setup(dir.path(), dir.path(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ToolchainRelease { .. }));
    }

    #[tokio::test]
    async fn file_credential_helper_is_noop() {
        let rt = GoRuntime::new("1.23.4");
        let dir = tempfile::tempdir().unwrap();
        let dirs = CredentialHelperDirs {
            bin_dir: dir.path().join("bin"),
            repo_dir: dir.path().join("repo"),
        };
        rt.build_credential_helper("file", &dirs, dir.path(), "deadbeef", &[])
            .await
            .unwrap();
    }
}
