//! Transient execution annotations a caller keeps next to each node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ExecutionResult;

/// Per-node execution annotations.
///
/// The executors never mutate caller state; a caller derives these from the
/// observer callbacks (`started` on node start, `completed` on node completion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAnnotations {
  pub output: Option<Value>,
  pub has_error: bool,
  pub error_message: Option<String>,
  pub executing: bool,
}

impl NodeAnnotations {
  /// Annotations for a node whose invocation has just begun. Keeps the last output.
  pub fn started(&self) -> Self {
    Self {
      output: self.output.clone(),
      has_error: false,
      error_message: None,
      executing: true,
    }
  }

  /// Annotations after an invocation finished. `executing` is always cleared.
  pub fn completed(result: &ExecutionResult) -> Self {
    if result.success {
      Self {
        output: result.output.clone(),
        has_error: false,
        error_message: None,
        executing: false,
      }
    } else {
      Self {
        output: None,
        has_error: true,
        error_message: Some(result.error_message().to_string()),
        executing: false,
      }
    }
  }
}
