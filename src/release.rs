//! GitHub release resolution for tool repositories
//!
//! Resolution is best-effort: every network, status, or shape failure yields
//! `None` so callers fall back to building from source. A single failed call
//! is final; there are no retries.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::platform::Platform;

const GITHUB_HOST: &str = "https://github.com/";

/// Base URL of the tags API.
const API_BASE: &str = "https://api.github.com";

/// Base URL of the web host serving the latest-release redirect.
const WEB_BASE: &str = "https://github.com";

/// Per-request timeout for the metadata lookups.
const LOOKUP_TIMEOUT_SECS: u64 = 30;

/// A published release of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRelease {
    pub account: String,
    pub repo: String,
    pub label: String,
}

impl GithubRelease {
    /// URL of the release's checksum manifest.
    pub fn checksums_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/download/{}/checksums.txt",
            self.account, self.repo, self.label
        )
    }

    /// URL of the platform-specific release binary.
    pub fn bin_url(&self, platform: &Platform) -> String {
        format!(
            "https://github.com/{}/{}/releases/download/{}/{}",
            self.account,
            self.repo,
            self.label,
            self.src_bin_name(platform)
        )
    }

    /// Name the binary carries within the release's assets.
    pub fn src_bin_name(&self, platform: &Platform) -> String {
        platform.src_bin_name(&self.repo)
    }
}

#[derive(Debug, Deserialize)]
struct Tag {
    #[serde(default)]
    name: String,
    #[serde(default)]
    commit: Commit,
}

#[derive(Debug, Default, Deserialize)]
struct Commit {
    #[serde(default)]
    sha: String,
}

/// Split a repository root URL into (account, repo). Only
/// `https://github.com/<account>/<repo>[.git]` qualifies.
fn parse_repo_root(root: &str) -> Option<(String, String)> {
    let rest = root.strip_prefix(GITHUB_HOST)?;
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let mut parts = rest.split('/');
    let account = parts.next()?;
    let repo = parts.next()?;
    if account.is_empty() || repo.is_empty() || parts.next().is_some() {
        return None;
    }
    Some((account.to_string(), repo.to_string()))
}

/// Agent that never follows redirects: the latest-release lookup reads the
/// redirect target instead of the page it points at.
fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .max_redirects(0)
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(LOOKUP_TIMEOUT_SECS)))
        .build()
        .into()
}

/// Resolve the release matching `revision`, or the latest release when no
/// tag matches. `None` means "not resolvable", never a surfaced error.
pub fn resolve(root: &str, revision: &str) -> Option<GithubRelease> {
    resolve_at(root, revision, API_BASE, WEB_BASE)
}

fn resolve_at(root: &str, revision: &str, api_base: &str, web_base: &str) -> Option<GithubRelease> {
    let (account, repo) = parse_repo_root(root)?;
    let agent = agent();

    // A tag whose commit matches the requested revision wins over "latest".
    if let Some(label) = tag_for_revision(&agent, api_base, &account, &repo, revision) {
        debug!("matched tag {label} for revision {revision}");
        return Some(GithubRelease { account, repo, label });
    }

    let label = latest_label(&agent, web_base, &account, &repo)?;
    debug!("using latest release {label} for {account}/{repo}");
    Some(GithubRelease { account, repo, label })
}

fn tag_for_revision(
    agent: &ureq::Agent,
    api_base: &str,
    account: &str,
    repo: &str,
    revision: &str,
) -> Option<String> {
    let url = format!("{api_base}/repos/{account}/{repo}/tags");
    let mut resp = agent.get(&url).call().ok()?;
    if !resp.status().is_success() {
        return None;
    }
    let body = resp.body_mut().read_to_string().ok()?;
    let tags: Vec<Tag> = serde_json::from_str(&body).ok()?;
    tags.into_iter()
        .find(|t| t.commit.sha == revision)
        .map(|t| t.name)
}

fn latest_label(agent: &ureq::Agent, web_base: &str, account: &str, repo: &str) -> Option<String> {
    let url = format!("{web_base}/{account}/{repo}/releases/latest");
    let resp = agent.get(&url).call().ok()?;
    if resp.status() != ureq::http::StatusCode::FOUND {
        return None;
    }
    let target = resp
        .headers()
        .get(ureq::http::header::LOCATION)?
        .to_str()
        .ok()?;
    let label = target.rsplit('/').next()?;
    if label.is_empty() {
        return None;
    }
    Some(label.to_string())
}
