//! A code node: identity, display label and script body.

use serde::{Deserialize, Serialize};

/// A code node as supplied by the caller.
///
/// Execution annotations are not stored here; see [NodeAnnotations](super::NodeAnnotations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
  pub id: String,
  /// Display label; falls back to the id when absent or empty.
  #[serde(default)]
  pub label: Option<String>,
  #[serde(default)]
  pub script: String,
}

impl FlowNode {
  pub fn new(id: impl Into<String>, script: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      label: None,
      script: script.into(),
    }
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  /// Name shown in log records.
  pub fn display_name(&self) -> &str {
    match self.label.as_deref() {
      Some(l) if !l.trim().is_empty() => l,
      _ => &self.id,
    }
  }
}
