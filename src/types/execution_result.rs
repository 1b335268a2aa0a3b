//! Result of executing a single node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of executing a single node. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ExecutionResult {
  pub fn success(output: Value) -> Self {
    Self {
      success: true,
      output: Some(output),
      error: None,
    }
  }

  pub fn failure(error: impl Into<String>) -> Self {
    Self {
      success: false,
      output: None,
      error: Some(error.into()),
    }
  }

  /// Output value, `Value::Null` when absent.
  pub fn output_or_null(&self) -> Value {
    self.output.clone().unwrap_or(Value::Null)
  }

  pub fn error_message(&self) -> &str {
    self.error.as_deref().unwrap_or("unknown error")
  }
}
