//! Platform naming for toolchain releases and tool artifacts
//!
//! All OS/architecture branching lives here as pure functions so the rest
//! of the pipeline never inspects `std::env::consts` directly. Names follow
//! the Go release conventions (`linux`/`darwin`/`windows`, `amd64`/`arm64`).

use std::path::PathBuf;

/// Fixed name of the built tool artifact (without platform suffix).
pub const TOOL_BIN: &str = "goforge-go-tool";

/// An (OS, architecture) pair in Go release naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this process is running on, translated from Rust's
    /// naming to Go's.
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            other => other,
        };
        Self::new(os, arch)
    }

    /// Executable filename suffix (`.exe` on windows, empty elsewhere).
    pub fn exe_suffix(&self) -> &'static str {
        if self.os == "windows" {
            ".exe"
        } else {
            ""
        }
    }

    /// Archive extension the toolchain ships as for this platform.
    pub fn archive_ext(&self) -> &'static str {
        if self.os == "windows" {
            ".zip"
        } else {
            ".tar.gz"
        }
    }

    /// Release index key, e.g. `go1.22.1.linux-amd64`. Index entries are
    /// matched by filename prefix against this key.
    pub fn release_key(&self, toolchain_id: &str) -> String {
        format!("{toolchain_id}.{}-{}", self.os, self.arch)
    }

    /// Name a release binary has at the source host, e.g.
    /// `sometool-linux-amd64`.
    pub fn src_bin_name(&self, repo: &str) -> String {
        format!("{repo}-{}-{}{}", self.os, self.arch, self.exe_suffix())
    }

    /// Name the binary is installed as in the tool's `bin/` directory.
    pub fn target_bin_name(&self) -> String {
        format!("{TOOL_BIN}{}", self.exe_suffix())
    }

    /// Relative path of the build output artifact.
    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from("bin").join(self.target_bin_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_naming() {
        let p = Platform::new("linux", "amd64");
        assert_eq!(p.exe_suffix(), "");
        assert_eq!(p.archive_ext(), ".tar.gz");
        assert_eq!(p.release_key("go1.22.1"), "go1.22.1.linux-amd64");
        assert_eq!(p.src_bin_name("sometool"), "sometool-linux-amd64");
        assert_eq!(p.target_bin_name(), "goforge-go-tool");
        assert_eq!(p.artifact_path(), PathBuf::from("bin/goforge-go-tool"));
    }

    #[test]
    fn windows_naming() {
        let p = Platform::new("windows", "amd64");
        assert_eq!(p.exe_suffix(), ".exe");
        assert_eq!(p.archive_ext(), ".zip");
        assert_eq!(p.src_bin_name("sometool"), "sometool-windows-amd64.exe");
        assert_eq!(p.target_bin_name(), "goforge-go-tool.exe");
    }

    #[test]
    fn darwin_arm64_key() {
        let p = Platform::new("darwin", "arm64");
        assert_eq!(p.release_key("go1.23.4"), "go1.23.4.darwin-arm64");
    }

    #[test]
    fn host_uses_go_names() {
        let p = Platform::host();
        assert_ne!(p.os, "macos");
        assert_ne!(p.arch, "x86_64");
        assert_ne!(p.arch, "aarch64");
    }
}
