//! Error types for goforge
//!
//! All modules use `ForgeResult<T>` as their return type. "Not resolvable"
//! outcomes on best-effort paths (release lookup, checksum manifests) are
//! modeled as `Option`, not as errors; only hard failures land here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for goforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// All errors that can occur in goforge
#[derive(Error, Debug)]
pub enum ForgeError {
    // Release index errors
    #[error("no {id} release for os={os} arch={arch}")]
    ToolchainRelease {
        id: String,
        os: String,
        arch: String,
    },

    // Network errors
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("bad HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // Integrity errors
    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    // Archive errors
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(String),

    #[error("failed to extract {archive}: {reason}")]
    ExtractFailed { archive: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("build failed: {command}\n{stderr}")]
    BuildFailed { command: String, stderr: String },

    // Prebuilt binary mode
    #[error("no prebuilt binary available for {repo}")]
    NoPrebuiltBinary { repo: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // General errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl ForgeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP transport error
    pub fn http(url: impl Into<String>, source: ureq::Error) -> Self {
        Self::Http {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Whether this error means the downloaded bytes cannot be trusted
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}
