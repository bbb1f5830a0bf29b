//! Checksum manifest retrieval for GitHub releases
//!
//! Releases publish a `checksums.txt` mapping digests to asset filenames.
//! Fetching is best-effort; a missing manifest or entry means "verification
//! impossible" and callers must decline the prebuilt-binary path.

use tracing::debug;

use crate::download;
use crate::release::GithubRelease;

/// Fetch the digest for `filename` from the release's checksum manifest.
pub fn fetch(release: &GithubRelease, filename: &str) -> Option<String> {
    let url = release.checksums_url();
    let text = match download::fetch_text(&url) {
        Ok(text) => text,
        Err(e) => {
            debug!("checksum manifest fetch failed: {e}");
            return None;
        }
    };
    parse_manifest(&text, filename)
}

/// Scan a manifest for `filename`. A line qualifies only when it has exactly
/// two whitespace-separated fields and the second equals the filename; the
/// first qualifying line wins.
pub fn parse_manifest(text: &str, filename: &str) -> Option<String> {
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 || fields[1] != filename {
            continue;
        }
        return Some(fields[0].to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
abc123  toolX-linux-amd64
def456  toolX-darwin-arm64
";

    #[test]
    fn finds_platform_entry() {
        assert_eq!(
            parse_manifest(MANIFEST, "toolX-linux-amd64"),
            Some("abc123".to_string())
        );
        assert_eq!(
            parse_manifest(MANIFEST, "toolX-darwin-arm64"),
            Some("def456".to_string())
        );
    }

    #[test]
    fn unlisted_platform_is_unresolvable() {
        assert_eq!(parse_manifest(MANIFEST, "toolX-windows-amd64.exe"), None);
    }

    #[test]
    fn first_qualifying_line_wins() {
        let text = "aaa  dup\nbbb  dup\n";
        assert_eq!(parse_manifest(text, "dup"), Some("aaa".to_string()));
    }

    #[test]
    fn ignores_lines_with_wrong_field_count() {
        let text = "onlyonefield\naaa  bbb  ccc\nabc  target\n";
        assert_eq!(parse_manifest(text, "target"), Some("abc".to_string()));
    }

    #[test]
    fn empty_manifest_is_unresolvable() {
        assert_eq!(parse_manifest("", "anything"), None);
    }
}
