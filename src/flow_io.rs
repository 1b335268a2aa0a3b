//! Flow documents in, run reports out (JSON).

use std::path::Path;

use tracing::instrument;

use crate::error::FlowError;
use crate::types::{FlowGraph, RunReport};

/// Current [RunReport] format version.
pub const RUN_REPORT_VERSION: u32 = 1;

/// Loads a flow (`{"nodes": [...], "edges": [...]}`) from `path`.
#[instrument(level = "trace", skip(path))]
pub fn load_flow(path: &Path) -> Result<FlowGraph, FlowError> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Writes `report` to `path` as pretty JSON, creating parent directories.
#[instrument(level = "trace", skip(path, report))]
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<(), FlowError> {
  let json = serde_json::to_string_pretty(report)?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)?;
  Ok(())
}
