//! Sandboxed script runner.
//!
//! Scripts are JavaScript function bodies executed by an embedded engine
//! (`boa_engine`). Each invocation gets a fresh engine whose global object is
//! stripped down to the capability table in [bindings].

pub mod bindings;
mod program;
mod script_runner;
mod truthiness;
#[cfg(test)]
mod truthiness_test;

use std::time::Duration;

use thiserror::Error;

pub use bindings::{BINDINGS, Binding, Capability};
pub use script_runner::ScriptRunner;
pub use truthiness::classify_truthiness;

/// Tag prepended to every line a script logs through `console`.
pub const SCRIPT_LOG_PREFIX: &str = "[Script]";

/// Guard rails for one script invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxConfig {
  /// Wall-clock limit around the whole invocation.
  ///
  /// When it fires the caller gets a failure right away, but the engine
  /// thread keeps running until the script ends or hits
  /// `loop_iteration_limit`. Runtime shutdown waits for that thread, so keep
  /// the loop limit in proportion to the timeout.
  pub timeout: Duration,
  /// Loop iterations the engine allows before aborting the script.
  pub loop_iteration_limit: u64,
}

impl Default for SandboxConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_millis(crate::config::DEFAULT_SCRIPT_TIMEOUT_MS),
      loop_iteration_limit: crate::config::DEFAULT_LOOP_ITERATION_LIMIT,
    }
  }
}

/// Why a script produced no value. Flattened into `ExecutionResult::failure` at the boundary.
#[derive(Debug, Error)]
pub enum ScriptError {
  /// The body does not parse.
  #[error("{0}")]
  Compile(String),

  /// The body threw, rejected, or hit an engine limit.
  #[error("{0}")]
  Runtime(String),

  #[error("script timed out after {0} ms")]
  Timeout(u128),

  #[error("script did not settle: its promise never resolved")]
  Unsettled,

  #[error("script engine error: {0}")]
  Engine(String),
}
