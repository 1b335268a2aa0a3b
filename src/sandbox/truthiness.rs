//! Turning a node's output into a branch decision.

use serde_json::Value;

/// The one policy for deciding a branch from node output.
///
/// Booleans pass through, numbers are truthy when nonzero, strings and arrays
/// when non-empty, `null` is false, and every object (even `{}`) is true.
pub fn classify_truthiness(output: &Value) -> bool {
  match output {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(_) => true,
  }
}
