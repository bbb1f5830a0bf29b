//! Goforge - Go toolchain provisioning and tool builds
//!
//! Downloads pinned Go releases into a content-addressed cache, fetches
//! prebuilt tool binaries from GitHub releases, and builds tools from
//! source with a hermetic environment.

pub mod build;
pub mod buildenv;
pub mod cache;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod index;
pub mod platform;
pub mod release;
pub mod runtime;
pub mod types;

pub use error::{ForgeError, ForgeResult};
