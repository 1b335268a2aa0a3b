//! Inputs of a single script invocation.

use serde_json::Value;

use super::Variables;

/// Inputs of one node invocation: the previous node's output and the scratch bag.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
  /// Output of the previous node, `Value::Null` for the first node.
  pub input: Value,
  /// Always empty at call time for now.
  pub variables: Variables,
}

impl ExecutionContext {
  pub fn with_input(input: Value) -> Self {
    Self {
      input,
      variables: Variables::new(),
    }
  }
}
