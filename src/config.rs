//! Runner configuration: defaults, environment overlay, and the derived sandbox settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::queue::{CallTemplate, default_templates};
use crate::sandbox::SandboxConfig;

/// Base URL the call templates are resolved against.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Pause between nodes in `run_all`.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
pub const DEFAULT_SCRIPT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_LOOP_ITERATION_LIMIT: u64 = 1_000_000;
/// Id of the node that always heads the execution queue.
pub const DEFAULT_ENTRY_NODE_ID: &str = "entry";

pub const ENV_API_BASE_URL: &str = "CODEFLOW_API_BASE_URL";
pub const ENV_SETTLE_DELAY_MS: &str = "CODEFLOW_SETTLE_DELAY_MS";
pub const ENV_SCRIPT_TIMEOUT_MS: &str = "CODEFLOW_SCRIPT_TIMEOUT_MS";
pub const ENV_ENTRY_NODE_ID: &str = "CODEFLOW_ENTRY_NODE_ID";

/// Settings shared by both executors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
  pub api_base_url: String,
  pub settle_delay_ms: u64,
  pub script_timeout_ms: u64,
  pub loop_iteration_limit: u64,
  pub entry_node_id: String,
  pub templates: Vec<CallTemplate>,
}

impl Default for RunnerConfig {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_BASE_URL.to_string(),
      settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
      script_timeout_ms: DEFAULT_SCRIPT_TIMEOUT_MS,
      loop_iteration_limit: DEFAULT_LOOP_ITERATION_LIMIT,
      entry_node_id: DEFAULT_ENTRY_NODE_ID.to_string(),
      templates: default_templates(),
    }
  }
}

impl RunnerConfig {
  /// Defaults overlaid with `CODEFLOW_*` environment variables.
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Defaults overlaid with whatever `lookup` returns for the `CODEFLOW_*` keys.
  /// Unparsable numbers are ignored.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let mut config = Self::default();
    if let Some(url) = lookup(ENV_API_BASE_URL).filter(|s| !s.trim().is_empty()) {
      config.api_base_url = url;
    }
    if let Some(ms) = parse_ms(ENV_SETTLE_DELAY_MS, lookup(ENV_SETTLE_DELAY_MS)) {
      config.settle_delay_ms = ms;
    }
    if let Some(ms) = parse_ms(ENV_SCRIPT_TIMEOUT_MS, lookup(ENV_SCRIPT_TIMEOUT_MS)) {
      config.script_timeout_ms = ms;
    }
    if let Some(id) = lookup(ENV_ENTRY_NODE_ID).filter(|s| !s.trim().is_empty()) {
      config.entry_node_id = id;
    }
    config
  }

  pub fn settle_delay(&self) -> Duration {
    Duration::from_millis(self.settle_delay_ms)
  }

  pub fn sandbox(&self) -> SandboxConfig {
    SandboxConfig {
      timeout: Duration::from_millis(self.script_timeout_ms),
      loop_iteration_limit: self.loop_iteration_limit,
    }
  }
}

fn parse_ms(key: &str, raw: Option<String>) -> Option<u64> {
  let raw = raw?;
  match raw.trim().parse::<u64>() {
    Ok(v) => Some(v),
    Err(_) => {
      warn!(key, value = %raw, "ignoring unparsable number");
      None
    }
  }
}
