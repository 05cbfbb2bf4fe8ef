//! Integration tests for cachetree

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn cachetree() -> Command {
        cargo_bin_cmd!("cachetree")
    }

    /// Config file pointing the builder at `binary`
    fn write_config(dir: &Path, binary: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!("[builder]\nbinary = \"{binary}\"\n\n[display]\ncolors = false\n"),
        )
        .unwrap();
        path
    }

    #[test]
    fn help_displays() {
        cachetree()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build cache"));
    }

    #[test]
    fn version_displays() {
        cachetree()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cachetree"));
    }

    #[test]
    fn unknown_action_fails() {
        cachetree().arg("shred").assert().failure();
    }

    #[test]
    fn prune_requires_until() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "/nonexistent/docker");
        cachetree()
            .args(["prune", "--config"])
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required option --until"))
            // Rejected before the builder binary is run
            .stderr(predicate::str::contains("Failed to run command").not());
    }

    #[test]
    fn prune_rejects_bad_cutoff() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "/nonexistent/docker");
        cachetree()
            .args(["prune", "--until", "whenever", "--config"])
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cutoff"));
    }

    #[test]
    fn missing_builder_binary_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "/nonexistent/docker");
        cachetree()
            .args(["view", "--config"])
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to run command"));
    }

    #[cfg(unix)]
    mod fake_builder {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Shell script answering `buildx du` and `buildx prune` with canned
        /// reports: base <- step <- app, base <- other
        const SCRIPT: &str = r#"#!/bin/sh
case "$*" in
  *"--builder remote"*)
    echo "ERROR: no builder \"remote\" found" >&2
    exit 1
    ;;
  *"du --verbose"*)
    cat <<'EOF'
ID:             base
Created at:     2024-01-01 10:00:00 +0000 UTC
Size:           80MB
Usage count:    3
Last used:      2 months ago
Description:    pulled from docker.io/library/alpine:3.19

ID:             step
Parent:         base
Created at:     2024-01-02 10:00:00 +0000 UTC
Size:           10MB
Usage count:    1
Last used:      2 months ago
Description:    mount / from exec /bin/sh -c apk add --no-cache git

ID:             app
Parent:         step
Created at:     2024-01-03 10:00:00 +0000 UTC
Size:           1MB
Usage count:    1
Last used:      2 months ago
Description:    mount / from exec /bin/sh -c true && make

ID:             other
Parent:         base
Created at:     2024-01-04 10:00:00 +0000 UTC
Size:           2MB
Usage count:    5
Last used:      1 hour ago
Description:    mount / from exec /bin/sh -c echo hi

Reclaimable:    93MB
Total:          93MB
EOF
    ;;
  *"until="*)
    printf 'ID: app\nParent: step\nSize: 1MB\nUsage count: 1\n\nTotal: 1MB\n'
    ;;
  *"id=step"*)
    printf 'ID: step\nParent: base\nSize: 10MB\nUsage count: 1\n\nTotal: 10MB\n'
    ;;
  *)
    echo "unexpected: $*" >&2
    exit 3
    ;;
esac
"#;

        fn fake_docker(dir: &Path) -> PathBuf {
            let path = dir.join("docker");
            std::fs::write(&path, SCRIPT).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn view_renders_forest() {
            let temp = TempDir::new().unwrap();
            let docker = fake_docker(temp.path());
            let config = write_config(temp.path(), docker.to_str().unwrap());

            cachetree()
                .args(["view", "--config"])
                .arg(&config)
                .assert()
                .success()
                .stdout(predicate::str::contains("base"))
                .stdout(predicate::str::contains("    app"))
                .stdout(predicate::str::contains("apk add --no-cache git"))
                .stdout(predicate::str::contains("/bin/sh -c").not())
                .stdout(predicate::str::contains("Total: 93MB"));
        }

        #[test]
        fn view_total_only() {
            let temp = TempDir::new().unwrap();
            let docker = fake_docker(temp.path());
            let config = write_config(temp.path(), docker.to_str().unwrap());

            cachetree()
                .args(["view", "--total-only", "--config"])
                .arg(&config)
                .assert()
                .success()
                .stdout(predicate::eq("Total: 93MB\n"));
        }

        #[test]
        fn prune_removes_left_behind_chain() {
            let temp = TempDir::new().unwrap();
            let docker = fake_docker(temp.path());
            let config = write_config(temp.path(), docker.to_str().unwrap());

            cachetree()
                .args(["prune", "--until", "720h", "--format", "plain", "--config"])
                .arg(&config)
                .assert()
                .success()
                .stdout(predicate::eq("app\nstep\n"));
        }

        #[test]
        fn prune_table_shows_both_passes() {
            let temp = TempDir::new().unwrap();
            let docker = fake_docker(temp.path());
            let config = write_config(temp.path(), docker.to_str().unwrap());

            cachetree()
                .args(["prune", "--until", "720h", "--config"])
                .arg(&config)
                .assert()
                .success()
                .stdout(predicate::str::contains("Reclaimed: 1MB"))
                .stdout(predicate::str::contains("Reclaimed (extra): 10MB"));
        }

        #[test]
        fn failing_builder_reports_command_and_output() {
            let temp = TempDir::new().unwrap();
            let docker = fake_docker(temp.path());
            let config = write_config(temp.path(), docker.to_str().unwrap());

            cachetree()
                .args(["view", "--builder", "remote", "--config"])
                .arg(&config)
                .assert()
                .failure()
                .stderr(predicate::str::contains("--builder remote"))
                .stderr(predicate::str::contains("no builder \"remote\" found"));
        }
    }
}
