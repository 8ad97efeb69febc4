//! Integration tests for non-interactive runs (--row / -o)

use std::path::PathBuf;
use std::process::Command;

fn run_formcalc(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_formcalc"))
        .args(args)
        .output()
        .expect("Failed to execute formcalc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_md(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("formcalc_cli_{}_{}.md", std::process::id(), name))
}

struct Cleanup(PathBuf);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_export_seeded_table() {
    let path = temp_md("seeded");
    let _cleanup = Cleanup(path.clone());

    let (stdout, _, code) = run_formcalc(&["-o", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), format!("Exported to {}", path.display()));

    let md = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines[0], "# Table");
    assert_eq!(
        lines[2],
        "|   | Value A | Value B | A * B | B as % of A |"
    );
    assert_eq!(lines[4], "| 1 | 100 | 10 | 1000.00 | 0.10% |");
    assert_eq!(lines[5], "| 2 | 200 | 50 | 10000.00 | 0.25% |");
    assert_eq!(lines[6], "| 3 | 50 | 20 | 1000.00 | 0.40% |");
    assert_eq!(lines[7], "| 4 | 400 | 80 | 32000.00 | 0.20% |");
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_rows_are_recomputed_before_export() {
    let path = temp_md("rows");
    let _cleanup = Cleanup(path.clone());

    let (_, _, code) = run_formcalc(&[
        "--row",
        "5,2",
        "--row",
        "0,7",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);

    let md = std::fs::read_to_string(&path).unwrap();
    assert!(md.contains("| 5 | 5 | 2 | 10.00 | 0.40% |"));
    // Zero A gives a zero ratio rather than a division error.
    assert!(md.contains("| 6 | 0 | 7 | 0.00 | 0.00% |"));
}

#[test]
fn test_invalid_row_is_rejected_without_export() {
    let path = temp_md("invalid");
    let _cleanup = Cleanup(path.clone());

    let (stdout, stderr, code) = run_formcalc(&[
        "--row",
        "abc,2",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error: rows given with --row were rejected"));
    assert!(stderr.contains("Value A"));
    assert!(!path.exists());
}

#[test]
fn test_help() {
    let (_, stderr, code) = run_formcalc(&["--help"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Usage: formcalc [OPTIONS]"));
    assert!(stderr.contains("--row"));
}

#[test]
fn test_unknown_option_fails() {
    let (_, stderr, code) = run_formcalc(&["--bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: Unknown option: --bogus"));
}
