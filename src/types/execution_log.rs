//! Log records produced during a run, and the report the CLI exports from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LogSeverity;

/// Node id used for run-level records (run start, completion, failure).
pub const SYSTEM_NODE_ID: &str = "system";
/// Display name used for run-level records.
pub const SYSTEM_NODE_NAME: &str = "System";

/// One entry of the log trail. Append-only; the core never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogRecord {
  pub node_id: String,
  pub node_name: String,
  pub timestamp: DateTime<Utc>,
  pub severity: LogSeverity,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<Value>,
}

impl ExecutionLogRecord {
  pub fn is_system(&self) -> bool {
    self.node_id == SYSTEM_NODE_ID
  }
}

/// Summary of one run, written by `run_flow --report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
  /// Report format version.
  pub version: u32,
  /// `graph`, `queue` or `step`.
  pub mode: String,
  pub run_id: String,
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub success: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub execution_path: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub final_output: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub logs: Vec<ExecutionLogRecord>,
}
