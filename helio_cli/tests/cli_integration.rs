use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// One good payload, one junk line, one partial follow-up.
fn write_replay_file(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("telemetry.jsonl");
    fs::write(
        &path,
        "{\"sensors\":{\"LG\":512,\"PG\":480},\"position\":{\"X\":10,\"Y\":20}}\n\
         not-json\n\
         {\"sensors\":{\"PG\":481}}\n",
    )
    .unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "self-check ok", "stdout")]
#[case(&["ports"], 0, "", "stdout")]
#[case(&["watch"], -1, "serial port", "stderr")]
#[case(&["watch", "--port", "/dev/ttyUSB0", "--baud", "1234"], -1, "baud", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert();
    let assert = if exit_code >= 0 {
        assert.code(exit_code)
    } else {
        assert.failure()
    };

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn replay_applies_payloads_and_reports_junk() {
    let dir = tempdir().unwrap();
    let file = write_replay_file(&dir);

    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.arg("replay").arg(&file);

    cmd.assert()
        .success()
        // First payload landed...
        .stdout(predicate::str::contains("512"))
        // ...the junk line was surfaced...
        .stdout(predicate::str::contains("malformed payload"))
        // ...the follow-up overwrote PG...
        .stdout(predicate::str::contains("481"))
        // ...and slots nothing reported stay unset.
        .stdout(predicate::str::contains("--"));
}

#[test]
fn sim_watch_renders_the_panel_and_stops() {
    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.args(["watch", "--sim", "--max-updates", "2"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("connected to scripted tracker"))
        .stdout(predicate::str::contains("LG"))
        .stdout(predicate::str::contains("512"));
}

#[test]
fn watch_on_a_bogus_port_fails_with_open_error() {
    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.args(["watch", "--port", "/dev/definitely-not-a-port"]);

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("could not be opened"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.args(["--config", "/nonexistent/helio.toml", "self-check"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn config_values_reach_the_watch_path() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("helio.toml");
    fs::write(
        &cfg,
        r#"
[serial]
port = "/dev/definitely-not-a-port"
baud = 115200
read_timeout_ms = 100
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.arg("--config").arg(&cfg).arg("watch");

    // The configured port is picked up and fails to open, proving the
    // config flowed through; exit code 3 is the Open mapping.
    cmd.assert().failure().code(3);
}

#[test]
fn bad_config_is_rejected_before_running() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("helio.toml");
    fs::write(&cfg, "[serial]\nbaud = 1234\n").unwrap();

    let mut cmd = Command::cargo_bin("helio_cli").unwrap();
    cmd.arg("--config").arg(&cfg).arg("self-check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("baud"));
}
