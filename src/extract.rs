//! Archive retrieval and unpacking for toolchain releases
//!
//! The cache consumes extraction through a trait so provisioning logic can
//! be tested without touching the network. The default implementation
//! verifies the digest while the archive is still a single staged file,
//! before any entry is unpacked.

use std::fs;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::download;
use crate::error::{ForgeError, ForgeResult};

/// Seam between the cache and the network: fetch a release archive and
/// unpack it into `dest`, verifying `expected_digest` before completion.
pub trait ArchiveExtractor {
    fn extract(&self, url: &str, expected_digest: &str, dest: &Path) -> ForgeResult<()>;
}

/// Downloads the archive into `dest` with digest verification, then unpacks
/// it by extension. The archive's own directory layout is preserved: Go
/// releases keep their `go/` top-level directory.
pub struct ReleaseExtractor;

impl ArchiveExtractor for ReleaseExtractor {
    fn extract(&self, url: &str, expected_digest: &str, dest: &Path) -> ForgeResult<()> {
        let name = url.rsplit('/').next().unwrap_or("archive");
        let archive_path = dest.join(name);

        download::fetch_verified(url, &archive_path, expected_digest)?;
        unpack(&archive_path, dest)?;

        fs::remove_file(&archive_path)
            .map_err(|e| ForgeError::io(format!("removing {}", archive_path.display()), e))?;
        Ok(())
    }
}

/// Unpack `archive` into `dest`, choosing the format by extension.
pub fn unpack(archive: &Path, dest: &Path) -> ForgeResult<()> {
    let name = archive.to_string_lossy();
    debug!("unpacking {name}");
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        unpack_tar_gz(archive, dest)
    } else if name.ends_with(".zip") {
        unpack_zip(archive, dest)
    } else {
        Err(ForgeError::UnsupportedArchive(name.into_owned()))
    }
}

fn unpack_tar_gz(archive: &Path, dest: &Path) -> ForgeResult<()> {
    let file = fs::File::open(archive)
        .map_err(|e| ForgeError::io(format!("opening {}", archive.display()), e))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    // tar's unpack refuses entries that would escape dest.
    tar.unpack(dest)
        .map_err(|e| ForgeError::io(format!("unpacking {}", archive.display()), e))
}

fn unpack_zip(archive: &Path, dest: &Path) -> ForgeResult<()> {
    let file = fs::File::open(archive)
        .map_err(|e| ForgeError::io(format!("opening {}", archive.display()), e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| ForgeError::ExtractFailed {
        archive: archive.to_path_buf(),
        reason: e.to_string(),
    })?;
    // ZipArchive::extract sanitizes entry names against traversal.
    zip.extract(dest).map_err(|e| ForgeError::ExtractFailed {
        archive: archive.to_path_buf(),
        reason: e.to_string(),
    })
}
