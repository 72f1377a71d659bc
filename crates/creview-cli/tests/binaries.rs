//! End-to-end runs of both binaries against temporary contract files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CHECK_DISCLOSURE: &str = env!("CARGO_BIN_EXE_check-disclosure");
const ANALYZE_COMPLEXITY: &str = env!("CARGO_BIN_EXE_analyze-complexity");

const LEAKY: &str = "\
witness getAge(): Uint<8>;
witness get_secret(): Field;

export circuit prove(): [] {
  let h = persistentHash(getAge());
  if get_secret() {
    counter.increment(1);
  }
}
";

const CLEAN: &str = "\
ledger total: Counter;

export circuit bump(): [] {
  total.increment(1);
}
";

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn disclosure_clean_file_passes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "clean.compact", CLEAN);
    let p = path.to_str().unwrap();

    let out = run(CHECK_DISCLOSURE, &[p, "--color", "never"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout(&out),
        format!("[PASS] Disclosure Check: {p}\n\nNo disclosure issues detected.\n")
    );
}

#[test]
fn disclosure_issues_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "leaky.compact", LEAKY);
    let p = path.to_str().unwrap();

    let out = run(CHECK_DISCLOSURE, &[p, "--color", "never"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with(&format!("[FAIL] Disclosure Check: {p}\n\nPotential violations:\n")));
    assert!(text.contains("  - Line 5: 🔴 Low-entropy witness 'getAge' (Uint<8>)"));
    assert!(text.contains("  - Line 6: 🟠 Control flow depends on witness value"));
}

#[test]
fn disclosure_output_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "leaky.compact", LEAKY);
    let p = path.to_str().unwrap();

    let first = run(CHECK_DISCLOSURE, &[p, "--color", "never"]);
    let second = run(CHECK_DISCLOSURE, &[p, "--color", "never"]);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn disclosure_wrong_extension_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "notes.txt", CLEAN);
    let p = path.to_str().unwrap();

    let out = run(CHECK_DISCLOSURE, &[p]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        stdout(&out),
        format!("[FAIL] Disclosure Check: {p}\nError: Not a .compact file: {p}\n")
    );
}

#[test]
fn disclosure_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.compact");
    let p = path.to_str().unwrap();

    let out = run(CHECK_DISCLOSURE, &[p]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).contains(&format!("Error: File not found: {p}")));
}

#[test]
fn disclosure_without_argument_prints_usage() {
    let out = run(CHECK_DISCLOSURE, &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).contains("Usage:"));
}

#[test]
fn disclosure_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "leaky.compact", LEAKY);
    let p = path.to_str().unwrap();

    let out = run(CHECK_DISCLOSURE, &[p, "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["path"], p);
    assert_eq!(json["witnesses"].as_array().unwrap().len(), 2);
    assert_eq!(json["issues"][0]["severity"], "critical");
    assert_eq!(json["issues"][0]["rule"], "low-entropy-hash");
}

#[test]
fn complexity_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "h.compact",
        "export circuit h(x: Bytes<32>): Bytes<32> {\n  return persistentHash(sha256(x));\n}\n",
    );
    let p = path.to_str().unwrap();

    let out = run(ANALYZE_COMPLEXITY, &[p, "--color", "never"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.starts_with(&format!("Complexity Analysis: {p}\n\nCircuit: h (line 1)\n")));
    assert!(text.contains("  Estimated constraints: ~26,000\n"));
    assert!(text.contains("Overall complexity: High (~26,000 estimated constraints)\n"));
    assert!(text.ends_with(
        "Note: Estimates are heuristic-based. Actual constraint count requires compilation.\n"
    ));
}

#[test]
fn complexity_no_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "w.compact", "witness k(): Field;\n");
    let p = path.to_str().unwrap();

    let out = run(ANALYZE_COMPLEXITY, &[p]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout(&out),
        format!("Complexity Analysis: {p}\n\nNo circuits found in file.\n")
    );
}

#[test]
fn complexity_error_codes() {
    let dir = tempfile::tempdir().unwrap();
    let wrong = write(dir.path(), "c.rs", "");
    let w = wrong.to_str().unwrap();
    let out = run(ANALYZE_COMPLEXITY, &[w]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), format!("Error: Not a .compact file: {w}\n"));

    let absent = dir.path().join("gone.compact");
    let a = absent.to_str().unwrap();
    let out = run(ANALYZE_COMPLEXITY, &[a]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stdout(&out), format!("Error: File not found: {a}\n"));

    let out = run(ANALYZE_COMPLEXITY, &[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn complexity_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "m.compact", "circuit m(): [] {\n  const t: MerkleTree<24> = x;\n}\n");
    let p = path.to_str().unwrap();

    let out = run(ANALYZE_COMPLEXITY, &[p, "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["total_constraints"], 24_000);
    assert_eq!(json["circuits"][0]["operations"]["merkle_depth"], 24);
}

#[test]
fn help_exits_zero() {
    assert_eq!(run(CHECK_DISCLOSURE, &["--help"]).status.code(), Some(0));
    assert_eq!(run(ANALYZE_COMPLEXITY, &["--version"]).status.code(), Some(0));
}
