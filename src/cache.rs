//! Content-addressed toolchain cache
//!
//! Entries are keyed by a fingerprint of (download URL, expected digest)
//! and committed by atomic rename: a directory at the final path always
//! holds a completely extracted toolchain, never a partial one. An existing
//! entry is trusted without re-verification.
//!
//! Concurrent invocations racing on the same fingerprint are not
//! serialized; both may download, and the losing rename surfaces an error
//! on platforms that refuse to replace a directory. A retry then hits the
//! winner's entry. Callers needing at-most-once extraction must add
//! external mutual exclusion keyed by the fingerprint (see DESIGN.md).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{ForgeError, ForgeResult};
use crate::extract::ArchiveExtractor;

/// Cache subdirectory for this runtime under the data root.
const RUNTIME_DIR: &str = "golang";

/// Suffix of the transient staging directory next to a cache entry.
const STAGING_SUFFIX: &str = ".download";

/// Stable cache key for a (url, digest) pair.
pub fn fingerprint(url: &str, digest: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update([0u8]);
    hasher.update(digest.as_bytes());
    hex::encode(hasher.finalize())
}

/// On-disk cache of extracted toolchains.
#[derive(Debug, Clone)]
pub struct ToolchainCache {
    root: PathBuf,
}

impl ToolchainCache {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            root: data_root.into().join(RUNTIME_DIR),
        }
    }

    /// Final path of the entry for a (url, digest) pair.
    pub fn entry_path(&self, url: &str, digest: &str) -> PathBuf {
        self.root.join(fingerprint(url, digest))
    }

    /// Executable directory of a cache entry (`<entry>/go/bin`).
    pub fn bin_dir(entry: &Path) -> PathBuf {
        entry.join("go").join("bin")
    }

    /// Return the entry directory for (url, digest), extracting on a miss.
    /// At most one download happens per unique pair across the cache's
    /// lifetime; only "does not exist" is treated as a miss, any other
    /// probe failure propagates.
    pub fn ensure(
        &self,
        url: &str,
        digest: &str,
        extractor: &dyn ArchiveExtractor,
    ) -> ForgeResult<PathBuf> {
        let target = self.entry_path(url, digest);
        match fs::metadata(&target) {
            Ok(_) => {
                debug!("cache hit: {}", target.display());
                return Ok(target);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ForgeError::io(
                    format!("probing cache entry {}", target.display()),
                    e,
                ))
            }
        }

        info!("cache miss, fetching {url}");
        let staging = StagingDir::create(&target)?;
        extractor.extract(url, digest, staging.path())?;

        // Rename is the commit point: a crash or failure before this line
        // leaves nothing at the final path.
        fs::rename(staging.path(), &target).map_err(|e| {
            ForgeError::io(format!("committing cache entry {}", target.display()), e)
        })?;
        Ok(target)
    }
}

/// Staging directory removed on drop, success or failure. After a
/// successful rename the path no longer exists and the drop is a no-op.
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    fn create(target: &Path) -> ForgeResult<Self> {
        let mut name = target.as_os_str().to_os_string();
        name.push(STAGING_SUFFIX);
        let path = PathBuf::from(name);
        fs::create_dir_all(&path)
            .map_err(|e| ForgeError::io(format!("creating staging dir {}", path.display()), e))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
