//! Embedded Go release index
//!
//! A bundled manifest maps release archive filenames to their expected
//! SHA-256 digests. The manifest is parsed once per process into an
//! immutable table; lookups are a prefix scan against the platform key.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{ForgeError, ForgeResult};
use crate::platform::Platform;

/// Download base for official Go releases.
const DOWNLOAD_BASE: &str = "https://go.dev/dl/";

/// Bundled release manifest: `<digest>  <filename>` per line.
const RELEASES: &str = include_str!("digests.txt");

/// A resolved toolchain download: where to fetch it and what it must hash to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainRelease {
    pub url: String,
    pub digest: String,
}

#[derive(Debug)]
struct IndexEntry {
    digest: String,
    file: String,
}

/// Read-only release table, loaded once at first use.
#[derive(Debug)]
pub struct ReleaseIndex {
    entries: Vec<IndexEntry>,
}

impl ReleaseIndex {
    fn parse(data: &str) -> Self {
        let entries = data
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let digest = fields.next()?;
                let file = fields.next()?;
                if fields.next().is_some() {
                    return None;
                }
                Some(IndexEntry {
                    digest: digest.to_string(),
                    file: file.to_string(),
                })
            })
            .collect();
        Self { entries }
    }

    /// The process-wide index backed by the bundled manifest.
    pub fn embedded() -> &'static Self {
        static INDEX: OnceLock<ReleaseIndex> = OnceLock::new();
        INDEX.get_or_init(|| Self::parse(RELEASES))
    }

    /// Look up the download for `toolchain_id` on `platform`. The first
    /// entry whose filename starts with the platform key wins.
    pub fn lookup(&self, toolchain_id: &str, platform: &Platform) -> ForgeResult<ToolchainRelease> {
        let key = platform.release_key(toolchain_id);
        self.entries
            .iter()
            .find(|e| e.file.starts_with(&key))
            .map(|e| ToolchainRelease {
                url: format!("{DOWNLOAD_BASE}{}", e.file),
                digest: e.digest.clone(),
            })
            .ok_or_else(|| ForgeError::ToolchainRelease {
                id: toolchain_id.to_string(),
                os: platform.os.clone(),
                arch: platform.arch.clone(),
            })
    }
}

/// Resolve against the bundled manifest.
pub fn resolve(toolchain_id: &str, platform: &Platform) -> ForgeResult<ToolchainRelease> {
    ReleaseIndex::embedded().lookup(toolchain_id, platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
abc123  go1.22.1.linux-amd64.tar.gz
def456  go1.22.1.darwin-arm64.tar.gz
fed789  go1.22.1.windows-amd64.zip
";

    #[test]
    fn lookup_matches_platform_key() {
        let index = ReleaseIndex::parse(MANIFEST);
        let rel = index
            .lookup("go1.22.1", &Platform::new("linux", "amd64"))
            .unwrap();
        assert_eq!(rel.url, "https://go.dev/dl/go1.22.1.linux-amd64.tar.gz");
        assert_eq!(rel.digest, "abc123");
    }

    #[test]
    fn lookup_other_platform() {
        let index = ReleaseIndex::parse(MANIFEST);
        let rel = index
            .lookup("go1.22.1", &Platform::new("darwin", "arm64"))
            .unwrap();
        assert_eq!(rel.digest, "def456");
    }

    #[test]
    fn lookup_unlisted_platform_fails() {
        let index = ReleaseIndex::parse(MANIFEST);
        let err = index
            .lookup("go1.22.1", &Platform::new("plan9", "mips"))
            .unwrap_err();
        assert!(err.to_string().contains("os=plan9"));
    }

    #[test]
    fn lookup_unknown_version_fails() {
        let index = ReleaseIndex::parse(MANIFEST);
        assert!(index
            .lookup("go1.9.9", &Platform::new("linux", "amd64"))
            .is_err());
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let index = ReleaseIndex::parse("not-a-pair\nabc  file.tar.gz  extra\n\nxyz  go1.0.linux-amd64.tar.gz\n");
        assert_eq!(index.entries.len(), 1);
        assert_eq!(index.entries[0].digest, "xyz");
    }

    #[test]
    fn embedded_index_resolves_default_platforms() {
        // The bundled manifest must cover the versions the CLI defaults to.
        for platform in [
            Platform::new("linux", "amd64"),
            Platform::new("linux", "arm64"),
            Platform::new("darwin", "amd64"),
            Platform::new("darwin", "arm64"),
            Platform::new("windows", "amd64"),
        ] {
            let rel = resolve("go1.22.1", &platform).unwrap();
            assert!(rel.url.starts_with("https://go.dev/dl/go1.22.1."));
            assert_eq!(rel.digest.len(), 64);
        }
    }

    #[test]
    fn embedded_windows_entry_is_zip() {
        let rel = resolve("go1.23.4", &Platform::new("windows", "amd64")).unwrap();
        assert!(rel.url.ends_with(".zip"));
    }
}
