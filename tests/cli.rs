use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("pareto-plot").unwrap()
}

const TRIALS: &str = "\
trial_id,cfg_brevity,metric_energy_total_J,metric_rougeL
0,short,10.0,0.30
1,medium,14.0,0.42
2,long,18.0,0.40
3,long,22.0,N/A
";

#[test]
fn writes_chart_with_default_columns() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trials.csv");
    fs::write(&input, TRIALS).unwrap();
    let out = dir.path().join("plots/pareto.png");
    let frontier = dir.path().join("plots/frontier.csv");

    cmd()
        .arg("--csv")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--frontier-csv")
        .arg(&frontier)
        .args(["--width", "600", "--height", "420"])
        .assert()
        .success()
        .stdout(contains("Saved Pareto plot to"))
        .stdout(contains("pareto.png"));

    assert!(out.is_file());
    assert_eq!(
        fs::read_to_string(&frontier).unwrap(),
        "metric_energy_total_J,metric_rougeL,cfg_brevity\n10.0,0.3,short\n14.0,0.42,medium\n"
    );
}

#[test]
fn no_valid_points_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trials.csv");
    fs::write(&input, TRIALS).unwrap();
    let out = dir.path().join("pareto.png");

    cmd()
        .arg("--csv")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--y", "cfg_brevity"])
        .assert()
        .success()
        .stdout(contains("No valid data points."));

    assert!(!out.exists());
}

#[test]
fn missing_input_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.csv");

    cmd()
        .arg("--csv")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("absent.csv"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trials.txt");
    fs::write(&input, TRIALS).unwrap();

    cmd()
        .arg("--csv")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("unsupported table format"));
}
