//! CLI end-to-end tests.
//!
//! Each test runs the `kestrel` binary on files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const BELL: &str = r#"{
  "name": "bell",
  "qubit_count": 2,
  "bit_count": 2,
  "instructions": [
    {"type": "hadamard", "qubits": [0]},
    {"type": "control_x", "qubits": [0, 1]},
    {"type": "readout", "qubits": [0], "bits": [0]},
    {"type": "readout", "qubits": [1], "bits": [1]}
  ]
}"#;

const FLIPPED: &str = r#"{
  "qubit_count": 2,
  "bit_count": 2,
  "instructions": [
    {"type": "sigma_x", "qubits": [0]},
    {"type": "readout", "qubits": [0], "bits": [0]},
    {"type": "readout", "qubits": [1], "bits": [1]}
  ]
}"#;

fn kestrel(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kestrel"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("KESTREL_CONFIG")
        .output()
        .expect("failed to run kestrel")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn s(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// transpile
// ============================================================================

#[test]
fn test_transpile_to_file_and_compare() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.json", BELL);
    let output = dir.path().join("bell.native.json");

    let run = kestrel(&[
        "transpile",
        "-i",
        s(&input),
        "--device",
        "line:3",
        "--verify",
        "-o",
        s(&output),
    ]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let text = fs::read_to_string(&output).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["name"], "bell");
    assert_eq!(document["qubit_count"], 2);
    let kinds: Vec<&str> = document["instructions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["type"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"control_z"));
    assert!(!kinds.contains(&"control_x"));
    assert!(!kinds.contains(&"hadamard"));

    let compare = kestrel(&["compare", s(&input), s(&output)]);
    assert!(compare.status.success());
    assert!(String::from_utf8_lossy(&compare.stdout).contains("equivalent"));
}

#[test]
fn test_transpile_job_payload_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.json", BELL);

    let run = kestrel(&["transpile", "-i", s(&input), "-d", "line:2", "--shots", "500"]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let payload: serde_json::Value = serde_json::from_slice(&run.stdout).unwrap();
    assert_eq!(payload["shot_count"], 500);
    let records = payload["circuit"].as_array().unwrap();
    let readouts: Vec<_> = records.iter().filter(|r| r["type"] == "readout").collect();
    assert_eq!(readouts.len(), 2);
    assert_eq!(readouts[0]["bits"][0], readouts[0]["qubits"][0]);
}

#[test]
fn test_transpile_with_yaml_config() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.json", BELL);
    let config = write(
        &dir,
        "device.yaml",
        "device:\n  qubit_count: 4\n  connectivity_type: lattice\n  rows: 2\n  cols: 2\n",
    );

    let run = kestrel(&["transpile", "-i", s(&input), "-c", s(&config), "--verify"]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
}

#[test]
fn test_transpile_circuit_too_large_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.json", BELL);

    let run = kestrel(&["transpile", "-i", s(&input), "--device", "line:1"]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("Error:"));
}

#[test]
fn test_transpile_needs_a_device() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.json", BELL);

    let run = kestrel(&["transpile", "-i", s(&input)]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("--device or --config"));
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_different_circuits_fails() {
    let dir = TempDir::new().unwrap();
    let bell = write(&dir, "bell.json", BELL);
    let flipped = write(&dir, "flipped.json", FLIPPED);

    let run = kestrel(&["compare", s(&bell), s(&flipped)]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("not equivalent"));
}

#[test]
fn test_compare_missing_file() {
    let run = kestrel(&["compare", "/nonexistent/a.json", "/nonexistent/b.json"]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("File not found"));
}

// ============================================================================
// describe
// ============================================================================

#[test]
fn test_describe_device_and_circuit() {
    let dir = TempDir::new().unwrap();
    let bell = write(&dir, "bell.json", BELL);

    let run = kestrel(&["describe", "--device", "lattice:2x3", "-i", s(&bell)]);
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
    let stdout = String::from_utf8_lossy(&run.stdout);
    assert!(stdout.contains("1 - 2 - 3"));
    assert!(stdout.contains("4 - 5 - 6"));
    assert!(stdout.contains("2 qubits, 2 bits, 4 instructions"));
}

#[test]
fn test_describe_needs_something() {
    let run = kestrel(&["describe"]);
    assert!(!run.status.success());
}
