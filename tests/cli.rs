use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn prints_chart_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("oxlore")?;
    cmd.arg("--seed").arg("7");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("flowchart TD;\n"));

    Ok(())
}

#[test]
fn same_seed_is_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let first = Command::cargo_bin("oxlore")?
        .args(["--seed", "99", "--anchor-aware"])
        .output()?;
    let second = Command::cargo_bin("oxlore")?
        .args(["--seed", "99", "--anchor-aware"])
        .output()?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn writes_chart_with_explicit_routes_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let output_path = tmp.path().join("chart.mmd");

    let mut cmd = Command::cargo_bin("oxlore")?;
    cmd.arg("--routes")
        .arg("Test Source City -- Test Path --> Test Destination City")
        .arg("--seed")
        .arg("1")
        .arg("--output")
        .arg(&output_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated diagram"));

    let chart = fs::read_to_string(&output_path)?;
    assert!(chart.starts_with("flowchart TD;\n"));
    assert!(chart.contains("(Test Source City) --Test Path--- "));

    Ok(())
}

#[test]
fn reads_routes_from_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let input_path = tmp.path().join("routes.txt");
    fs::write(&input_path, "Keep\nGate -. Hidden Stair .-> Keep\n")?;

    let mut cmd = Command::cargo_bin("oxlore")?;
    cmd.arg("--input").arg(&input_path).args(["--seed", "5"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(Gate) -.Hidden Stair.-> "));

    Ok(())
}

#[test]
fn reads_routes_from_stdin_line_by_line() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::cargo_bin("oxlore")?
        .args(["--input", "-", "--seed", "5"])
        .write_stdin("Keep\nGate -. Hidden Stair .-> Keep\n")
        .output()?;
    assert!(output.status.success());

    let chart = String::from_utf8(output.stdout)?;
    assert!(chart.contains("(Gate) -.Hidden Stair.-> "));
    for line in chart.lines().skip(1) {
        assert!(
            line.contains("--") || line.contains("-."),
            "line without a connector: {line:?}"
        );
    }

    Ok(())
}

#[test]
fn summary_emits_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::cargo_bin("oxlore")?
        .args(["--seed", "3", "--summary"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(json["routes"].is_array());
    assert!(json["chart"].as_str().unwrap_or_default().starts_with("flowchart TD;"));

    Ok(())
}

#[test]
fn malformed_routes_fail() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("oxlore")?;
    cmd.args(["--routes", "Gate -- Old Road"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed route expression"));

    Ok(())
}

#[test]
fn config_file_is_applied() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let config_path = tmp.path().join("config.json");
    fs::write(&config_path, r#"{ "dotted_probability": 1.0, "seed": 4 }"#)?;

    let output = Command::cargo_bin("oxlore")?
        .arg("--config")
        .arg(&config_path)
        .output()?;
    assert!(output.status.success());

    let chart = String::from_utf8(output.stdout)?;
    for line in chart.lines().skip(1) {
        assert!(line.contains(".-> "), "expected dotted route in '{line}'");
    }

    Ok(())
}
