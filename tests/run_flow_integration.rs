//! Integration tests for the run_flow CLI on the fixture flows in tests/fixtures/.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

fn run_flow(args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_run_flow"))
    .args(args)
    .env_remove("CODEFLOW_ENTRY_NODE_ID")
    .output()
    .expect("spawn run_flow")
}

fn stdout(out: &Output) -> String {
  String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn run_flow_prints_usage_without_args() {
  let out = run_flow(&[]);
  assert!(!out.status.success());
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("Usage") || stderr.contains("usage"));
}

#[test]
fn run_flow_help_lists_env_vars() {
  let out = run_flow(&["--help"]);
  assert!(out.status.success());
  let text = stdout(&out);
  assert!(text.contains("CODEFLOW_API_BASE_URL"));
  assert!(text.contains("CODEFLOW_SETTLE_DELAY_MS"));
}

#[test]
fn run_flow_exits_1_for_missing_file() {
  let out = run_flow(&["/nonexistent/flow.json"]);
  assert_eq!(out.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&out.stderr).contains("Error loading"));
}

#[test]
fn graph_mode_prints_path_and_output() {
  let path = fixture("linear.json");
  let out = run_flow(&[path.to_str().unwrap()]);
  assert!(
    out.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&out.stderr)
  );
  let text = stdout(&out);
  assert!(text.contains("Graph run completed"));
  assert!(text.contains("a -> b -> c"));
  assert!(text.contains(r#"{"total":3}"#));
}

#[test]
fn graph_mode_honors_start_flag() {
  let path = fixture("linear.json");
  let out = run_flow(&["--start", "b", path.to_str().unwrap()]);
  assert!(out.status.success());
  assert!(stdout(&out).contains("b -> c"));
}

#[test]
fn graph_mode_failure_exits_1() {
  let path = fixture("failing.json");
  let out = run_flow(&[path.to_str().unwrap()]);
  assert_eq!(out.status.code(), Some(1));
  let text = stdout(&out);
  assert!(text.contains("Graph run failed"));
  assert!(text.contains("boom"));
}

#[test]
fn step_mode_runs_entry_node_without_network() {
  let path = fixture("queue.json");
  let out = run_flow(&["--mode", "step", "--cursor", "0", path.to_str().unwrap()]);
  assert!(out.status.success());
  let text = stdout(&out);
  assert!(text.contains("Node: entry"));
  assert!(text.contains("initialized"));
  assert!(text.contains("Has next: true"));
}

#[test]
fn step_mode_past_the_end_reports_sentinel() {
  let path = fixture("queue.json");
  let out = run_flow(&["--mode", "step", "--cursor", "3", path.to_str().unwrap()]);
  assert_eq!(out.status.code(), Some(1));
  let text = stdout(&out);
  assert!(text.contains("no node at step 3"));
  assert!(text.contains("Has next: false"));
}

#[test]
fn report_flag_writes_json_report() {
  let dir = tempfile::tempdir().unwrap();
  let report = dir.path().join("out").join("report.json");
  let path = fixture("branching.json");
  let out = run_flow(&[
    "--report",
    report.to_str().unwrap(),
    path.to_str().unwrap(),
  ]);
  assert!(out.status.success());
  let written: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
  assert_eq!(written["mode"], "graph");
  assert_eq!(written["success"], true);
  assert_eq!(written["execution_path"], serde_json::json!(["check", "zero"]));
}
