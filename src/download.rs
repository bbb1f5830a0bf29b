//! Verified HTTP downloads
//!
//! Binaries and archives are streamed to disk while a SHA-256 digest is
//! computed over the raw bytes. A digest mismatch removes the destination
//! file and surfaces an integrity error distinct from transport failures.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ForgeError, ForgeResult};

/// Generous timeout: release archives run to ~70 MB.
const REQUEST_TIMEOUT_SECS: u64 = 300;

const BUF_SIZE: usize = 8192;

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build()
        .into()
}

/// GET `url`, failing on transport errors and on non-success statuses
/// before any body bytes are consumed.
pub(crate) fn get(url: &str) -> ForgeResult<ureq::http::Response<ureq::Body>> {
    let resp = agent()
        .get(url)
        .call()
        .map_err(|e| ForgeError::http(url, e))?;
    if !resp.status().is_success() {
        return Err(ForgeError::HttpStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    Ok(resp)
}

/// Fetch a small text document (checksum manifests and the like).
pub fn fetch_text(url: &str) -> ForgeResult<String> {
    let mut resp = get(url)?;
    resp.body_mut()
        .read_to_string()
        .map_err(|e| ForgeError::http(url, e))
}

/// Stream `url` to `dest`, verifying the SHA-256 digest of the bytes as
/// they are written. On success the file is marked executable; on digest
/// mismatch it is removed before the error is returned.
pub fn fetch_verified(url: &str, dest: &Path, expected: &str) -> ForgeResult<()> {
    let resp = get(url)?;
    debug!("downloading {url} to {}", dest.display());
    write_verified(resp.into_body().into_reader(), dest, url, expected)
}

fn write_verified(mut reader: impl Read, dest: &Path, url: &str, expected: &str) -> ForgeResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ForgeError::io(format!("creating {}", parent.display()), e))?;
    }

    let mut file = fs::File::create(dest)
        .map_err(|e| ForgeError::io(format!("creating {}", dest.display()), e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUF_SIZE];

    loop {
        let n = reader
            .read(&mut buffer)
            .map_err(|e| ForgeError::io(format!("reading response from {url}"), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        file.write_all(&buffer[..n])
            .map_err(|e| ForgeError::io(format!("writing {}", dest.display()), e))?;
    }

    file.flush()
        .map_err(|e| ForgeError::io(format!("flushing {}", dest.display()), e))?;
    drop(file);

    let actual = hex::encode(hasher.finalize());
    if actual != expected.to_lowercase() {
        // The bytes cannot be trusted; do not leave them behind.
        let _ = fs::remove_file(dest);
        return Err(ForgeError::ChecksumMismatch {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }

    make_executable(dest)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> ForgeResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| ForgeError::io(format!("marking {} executable", path.display()), e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> ForgeResult<()> {
    Ok(())
}
