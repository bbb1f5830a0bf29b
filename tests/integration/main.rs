//! Integration tests for Goforge

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn goforge() -> Command {
        let mut cmd = cargo_bin_cmd!("goforge");
        // Keep tests hermetic: never pick up a user config file.
        cmd.env("GOFORGE_CONFIG", "/nonexistent/goforge-config.toml");
        cmd
    }

    #[test]
    fn help_displays() {
        goforge()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Go toolchain provisioning"));
    }

    #[test]
    fn version_displays() {
        goforge()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("goforge"));
    }

    #[test]
    fn resolve_known_version() {
        goforge()
            .args(["resolve", "--go-version", "1.22.1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("go.dev/dl"))
            .stdout(predicate::str::contains("sha256:"));
    }

    #[test]
    fn resolve_json_output() {
        goforge()
            .args(["resolve", "--go-version", "1.22.1", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"url\""))
            .stdout(predicate::str::contains("\"digest\""));
    }

    #[test]
    fn resolve_unknown_version_fails() {
        goforge()
            .args(["resolve", "--go-version", "0.0.0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no go0.0.0 release"));
    }

    #[test]
    fn fetch_bin_requires_revision() {
        goforge()
            .args(["fetch-bin", "https://github.com/acme/tool", "/tmp/dest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--revision"));
    }

    #[test]
    fn fetch_bin_foreign_host_declines() {
        // A non-GitHub root never resolves a release, so no network is hit.
        let dir = tempfile::tempdir().unwrap();
        goforge()
            .args([
                "fetch-bin",
                "https://example.com/acme/tool",
                dir.path().to_str().unwrap(),
                "--revision",
                "deadbeef",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no prebuilt binary"));
    }

    #[test]
    fn build_help_displays() {
        goforge()
            .args(["build", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--go-version"))
            .stdout(predicate::str::contains("--data-root"));
    }

    #[test]
    fn build_requires_tool_source() {
        goforge().arg("build").assert().failure();
    }
}
