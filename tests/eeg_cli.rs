use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_eeg_cli"))
}

#[test]
fn test_register_then_login() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("users.db");
    let db = db.to_str().unwrap();

    let register = cli()
        .args(["--db", db, "register", "--username", "ana", "--password", "pw"])
        .output()
        .expect("register command");
    assert!(register.status.success(), "register exited with {:?}", register.status);

    let duplicate = cli()
        .args(["--db", db, "register", "--username", "ana", "--password", "x"])
        .output()
        .expect("duplicate register command");
    assert_eq!(duplicate.status.code(), Some(1));
    let stderr = String::from_utf8(duplicate.stderr).expect("stderr utf8");
    assert!(stderr.contains("Username already exists!"), "got {stderr}");

    let login = cli()
        .args(["--db", db, "login", "--username", "ana", "--password", "pw"])
        .output()
        .expect("login command");
    assert!(login.status.success());

    let bad_login = cli()
        .args(["--db", db, "login", "--username", "ana", "--password", "nope"])
        .output()
        .expect("bad login command");
    assert_eq!(bad_login.status.code(), Some(2));
}

#[test]
fn test_fast_calibration_writes_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out.csv");

    let result = cli()
        .args([
            "--in-memory",
            "calibrate",
            "--register",
            "--username",
            "ana",
            "--password",
            "pw",
            "--fast",
            "--seed",
            "5",
            "--assets",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .output()
        .expect("calibrate command");

    assert!(
        result.status.success(),
        "calibrate exited with {:?}",
        result.status.code()
    );
    let stdout = String::from_utf8(result.stdout).expect("stdout utf8");
    assert!(stdout.contains("Progress: 4/4"), "got {stdout}");

    let csv = std::fs::read_to_string(&output).expect("csv written");
    let headers: Vec<&str> = csv.lines().step_by(2).collect();
    assert_eq!(
        headers,
        vec!["Left Click", "Right Click", "Scroll Up", "Scroll Down"]
    );
}

#[test]
fn test_calibrate_rejects_unknown_user() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = cli()
        .args([
            "--in-memory",
            "calibrate",
            "--username",
            "ghost",
            "--password",
            "pw",
            "--fast",
            "--output",
            dir.path().join("out.csv").to_str().unwrap(),
        ])
        .output()
        .expect("calibrate command");

    assert_eq!(result.status.code(), Some(2));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_electrodes_outputs_json() {
    let result = cli()
        .args(["electrodes", "--seed", "3"])
        .output()
        .expect("electrodes command");
    assert!(result.status.success());

    let payload: Value = serde_json::from_slice(&result.stdout).expect("json payload");
    let electrodes = payload["electrodes"].as_array().expect("electrode list");
    assert_eq!(electrodes.len(), 8);
    assert_eq!(electrodes[0]["name"], "Electrode 1");
}

#[test]
fn test_yes_flag_confirms_exit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out.csv");

    let result = cli()
        .args([
            "--in-memory",
            "calibrate",
            "--register",
            "--username",
            "ana",
            "--password",
            "pw",
            "--fast",
            "--yes",
            "--output",
            output.to_str().unwrap(),
        ])
        .output()
        .expect("calibrate command");

    assert!(result.status.success());
    let stderr = String::from_utf8(result.stderr).expect("stderr utf8");
    assert!(
        stderr.contains("[confirm] Exit Application: Do you want to exit the application? -> true"),
        "got {stderr}"
    );
    let stdout = String::from_utf8(result.stdout).expect("stdout utf8");
    assert!(stdout.contains("Exiting"), "got {stdout}");
    assert!(output.exists());
}

#[test]
fn test_confirm_defaults_to_no() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out.csv");

    let result = cli()
        .args([
            "--in-memory",
            "calibrate",
            "--register",
            "--username",
            "ana",
            "--password",
            "pw",
            "--fast",
            "--output",
            output.to_str().unwrap(),
        ])
        .output()
        .expect("calibrate command");

    assert!(result.status.success());
    let stderr = String::from_utf8(result.stderr).expect("stderr utf8");
    assert!(stderr.contains("-> false"), "got {stderr}");
    let stdout = String::from_utf8(result.stdout).expect("stdout utf8");
    assert!(!stdout.contains("Exiting"));
}

#[test]
fn test_register_failure_is_logged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("users.db");
    let db = db.to_str().unwrap();

    let first = cli()
        .args(["--db", db, "register", "--username", "ana", "--password", "pw"])
        .output()
        .expect("register command");
    assert!(first.status.success());

    let result = cli()
        .args([
            "--db",
            db,
            "calibrate",
            "--register",
            "--username",
            "ana",
            "--password",
            "other",
            "--fast",
            "--output",
            dir.path().join("out.csv").to_str().unwrap(),
        ])
        .output()
        .expect("calibrate command");

    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8(result.stderr).expect("stderr utf8");
    assert!(stderr.contains("Registration of ana failed"), "got {stderr}");
}
