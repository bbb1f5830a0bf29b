//! Build environment construction
//!
//! Environments travel as ordered `KEY=value` entries, matching what the
//! surrounding execution engine passes around. The build must not inherit
//! ambient toolchain configuration, so `GO*` entries are stripped before a
//! child `go` process is spawned.

use std::path::Path;

/// Reserved prefix: any entry whose key starts with this is dropped.
const TOOLCHAIN_VAR_PREFIX: &str = "GO";

const PATH_VAR: &str = "PATH";

#[cfg(windows)]
const PATH_SEP: char = ';';
#[cfg(not(windows))]
const PATH_SEP: char = ':';

/// Remove every entry whose key carries the reserved toolchain prefix.
pub fn strip_toolchain_vars(env: &[String]) -> Vec<String> {
    env.iter()
        .filter(|entry| !entry.starts_with(TOOLCHAIN_VAR_PREFIX))
        .cloned()
        .collect()
}

/// Build the augmentation entries for a toolchain directory: a single
/// `PATH=` entry with `dir` prepended to the caller's search path. The
/// caller appends these after its own env, so the new `PATH` wins.
pub fn append_path(env: &[String], dir: &Path) -> Vec<String> {
    let existing = env
        .iter()
        .find_map(|entry| entry.strip_prefix("PATH="))
        .unwrap_or("");
    let entry = if existing.is_empty() {
        format!("{PATH_VAR}={}", dir.display())
    } else {
        format!("{PATH_VAR}={}{PATH_SEP}{existing}", dir.display())
    };
    vec![entry]
}
