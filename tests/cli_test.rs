mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_single_probe_against_local_listener() {
    let addr = common::spawn_echo_responder();
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["--no-color", "-n", "-c", "1", "127.0.0.1"])
        .arg(addr.port().to_string())
        .assert()
        .success()
        .stdout(contains("TCPPING 127.0.0.1 (127.0.0.1) TCP SYN/ACK/close"))
        .stdout(contains(format!("TCP/ACK from 127.0.0.1[{}]: tcp_seq=1 time=", addr.port())))
        .stdout(contains("--- 127.0.0.1 tcpping statistics ---"))
        .stdout(contains("1 connections attempted, 1 established, 0% failed"));
}

#[test]
fn test_short_interval_is_raised_with_warning() {
    let addr = common::spawn_echo_responder();
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["--no-color", "-n", "-c", "2", "-i", "0.05", "127.0.0.1"])
        .arg(addr.port().to_string())
        .assert()
        .success()
        .stdout(contains("Warning: interval has been adjusted to 0.2s."))
        .stdout(contains("tcp_seq=2"))
        .stdout(contains("2 connections attempted, 2 established, 0% failed"));
}

#[test]
fn test_refused_probes_are_counted_as_failures() {
    let port = common::closed_port();
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["--no-color", "-n", "-c", "2", "-i", "0.2", "127.0.0.1"])
        .arg(port.to_string())
        .assert()
        .success()
        .stdout(contains("TCP/ACK from").not())
        .stdout(contains("2 connections attempted, 0 established, 100% failed"))
        .stderr(contains("tcp_seq=1"))
        .stderr(contains("connection error"));
}

#[cfg(feature = "json")]
#[test]
fn test_json_summary_is_the_whole_stdout() {
    let addr = common::spawn_echo_responder();
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    let output = cmd
        .args(["-n", "-c", "1", "-i", "0.05", "--json", "127.0.0.1"])
        .arg(addr.port().to_string())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is one JSON document");
    assert_eq!(v["attempted"], 1);
    assert_eq!(v["succeeded"], 1);
    assert_eq!(v["interrupted"], false);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TCPPING 127.0.0.1 (127.0.0.1)"));
    assert!(stderr.contains("tcp_seq=1"));
    assert!(stderr.contains("Warning: interval has been adjusted to 0.2s."));
}

#[test]
fn test_unresolvable_host_exits_with_fatal_code() {
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["--no-color", "-c", "1", "no.such.domain.invalid", "80"])
        .assert()
        .code(9)
        .stderr(contains("Error:"));
}

#[test]
fn test_oversized_interval_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["--no-color", "-n", "-c", "2", "-i", "1e20", "127.0.0.1", "1"])
        .assert()
        .code(2)
        .stderr(contains("invalid interval"));
}

#[cfg(unix)]
#[test]
fn test_ctrl_c_still_prints_summary() {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread;
    use std::time::Duration;

    let addr = common::spawn_echo_responder();
    let child = StdCommand::new(assert_cmd::cargo::cargo_bin("tcpping"))
        .args(["--no-color", "-n", "-c", "100", "-i", "0.5", "127.0.0.1"])
        .arg(addr.port().to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(1500));
    let status = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--- 127.0.0.1 tcpping statistics ---"));
    assert!(stdout.contains("tcp_seq=1"));
    assert!(!stdout.contains("100 connections attempted"));
}

#[test]
fn test_port_zero_is_rejected() {
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.args(["127.0.0.1", "0"]).assert().failure();
}

#[test]
fn test_invalid_input_no_args() {
    let mut cmd = Command::cargo_bin("tcpping").unwrap();
    cmd.arg("--no-color").assert().failure();
}
