//! Integration tests for geyser-sync

mod fixtures;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn geyser_sync(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("geyser-sync");
        cmd.current_dir(dir.path())
            .env_remove("GEYSER_SYNC_STATE")
            .arg("--config")
            .arg(dir.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        geyser_sync(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("deploy the latest Geyser build"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        geyser_sync(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("geyser-sync"));
    }

    #[test]
    fn missing_state_file_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        geyser_sync(&dir)
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("State file not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn status_masks_password() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("host.json"),
            r#"{"ftp_server":"mc.example.org","username":"steve","password":"hunter2",
                "jenkins_host":"https://ci.example.org/job/Geyser/","last_build":"B1"}"#,
        )
        .unwrap();

        geyser_sync(&dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("mc.example.org"))
            .stdout(predicate::str::contains("Geyser-Spigot-B1.jar"))
            .stdout(predicate::str::contains("hunter2").not());
    }

    #[test]
    fn cache_clear_removes_files() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("download");
        fs::create_dir(&cache).unwrap();
        fs::write(cache.join("Geyser-Spigot-B1.jar"), b"jar").unwrap();

        geyser_sync(&dir)
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared 1 artifact(s)"));

        assert!(cache.is_dir());
        assert_eq!(fs::read_dir(&cache).unwrap().count(), 0);
    }

    #[test]
    fn cache_info_on_empty_cache() {
        let dir = TempDir::new().unwrap();
        geyser_sync(&dir)
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached artifacts"));
    }
}

mod run_tests {
    use super::fixtures::{FakeFtp, FakeJenkins};
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const JAR: &[u8] = b"PK\x03\x04 not really a jar";

    fn jenkins_for(build: &str, result: &str) -> FakeJenkins {
        let api = format!(
            r#"{{"displayName":"{}","result":"{}","artifacts":[
                {{"fileName":"Geyser-Spigot.jar","relativePath":"x/Geyser-Spigot.jar"}},
                {{"fileName":"Geyser-Velocity.jar","relativePath":"y/Geyser-Velocity.jar"}}]}}"#,
            build, result
        );
        FakeJenkins::start(vec![
            (
                "/job/geyser/lastSuccessfulBuild/api/json".to_string(),
                api.into_bytes(),
            ),
            (
                "/job/geyser/lastSuccessfulBuild/artifact/x/Geyser-Spigot.jar".to_string(),
                JAR.to_vec(),
            ),
        ])
    }

    fn write_state(dir: &Path, ftp: &str, jenkins: &str, last_build: &str) {
        let state = serde_json::json!({
            "ftp_server": ftp,
            "username": "steve",
            "password": "pw",
            "jenkins_host": format!("{}/job/geyser/", jenkins),
            "last_build": last_build,
            "server_name": "survival",
        });
        fs::write(dir.join("host.json"), state.to_string()).unwrap();
    }

    fn read_state(dir: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(dir.join("host.json")).unwrap()).unwrap()
    }

    fn run(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("geyser-sync");
        cmd.current_dir(dir.path())
            .env_remove("GEYSER_SYNC_STATE")
            .arg("--config")
            .arg(dir.path().join("config.toml"))
            .arg("run");
        cmd
    }

    #[test]
    fn deploys_new_build() {
        let dir = TempDir::new().unwrap();
        let jenkins = jenkins_for("B2", "SUCCESS");
        let ftp = FakeFtp::start(false);
        write_state(dir.path(), &ftp.address, &jenkins.base, "B1");

        run(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Uploaded Geyser-Spigot-B2.jar"))
            .stdout(predicate::str::contains("Removed Geyser-Spigot-B1.jar"));

        let cached = dir.path().join("download").join("Geyser-Spigot-B2.jar");
        assert_eq!(fs::read(cached).unwrap(), JAR);

        let log = ftp.log();
        assert_eq!(
            log.stored,
            vec![("plugins/Geyser-Spigot-B2.jar".to_string(), JAR.len())]
        );
        assert_eq!(log.deleted, vec!["plugins/Geyser-Spigot-B1.jar"]);
        assert_eq!(log.sessions, 2);

        let state = read_state(dir.path());
        assert_eq!(state["last_build"], "B2");
        assert_eq!(state["server_name"], "survival");

        let audit = fs::read_to_string(dir.path().join("geyser-sync-audit.log")).unwrap();
        assert!(audit.contains("artifact.downloaded"));
        assert!(audit.contains("state.advanced"));
    }

    #[test]
    fn up_to_date_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let jenkins = jenkins_for("B2", "SUCCESS");
        // Nothing listens here; any FTP attempt would fail the run
        write_state(dir.path(), "127.0.0.1:1", &jenkins.base, "B2");

        run(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("No new build"));

        assert_eq!(
            jenkins.requests(),
            vec!["/job/geyser/lastSuccessfulBuild/api/json"]
        );
        assert_eq!(read_state(dir.path())["last_build"], "B2");
        assert_eq!(
            fs::read_dir(dir.path().join("download")).unwrap().count(),
            0
        );
    }

    #[test]
    fn failed_build_is_skipped() {
        let dir = TempDir::new().unwrap();
        let jenkins = jenkins_for("B3", "FAILURE");
        write_state(dir.path(), "127.0.0.1:1", &jenkins.base, "B2");

        run(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("finished FAILURE"));

        assert_eq!(jenkins.requests().len(), 1);
        assert_eq!(read_state(dir.path())["last_build"], "B2");
    }

    #[test]
    fn refused_delete_still_records_build() {
        let dir = TempDir::new().unwrap();
        let jenkins = jenkins_for("B2", "SUCCESS");
        let ftp = FakeFtp::start(true);
        write_state(dir.path(), &ftp.address, &jenkins.base, "B1");

        run(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Could not remove Geyser-Spigot-B1.jar"));

        assert_eq!(ftp.log().stored.len(), 1);
        assert!(ftp.log().deleted.is_empty());
        assert_eq!(read_state(dir.path())["last_build"], "B2");
    }

    #[test]
    fn unreachable_ftp_keeps_state() {
        let dir = TempDir::new().unwrap();
        let jenkins = jenkins_for("B2", "SUCCESS");
        write_state(dir.path(), "127.0.0.1:1", &jenkins.base, "B1");

        run(&dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains("FTP upload failed"));

        assert_eq!(read_state(dir.path())["last_build"], "B1");
        // Downloaded artifact stays cached for the next attempt
        assert!(dir
            .path()
            .join("download")
            .join("Geyser-Spigot-B2.jar")
            .exists());
    }
}
