//! A directed edge between two code nodes.

use serde::{Deserialize, Serialize};

/// A directed edge. Carries no condition: branching is decided from node output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
  pub id: String,
  pub source: String,
  pub target: String,
  #[serde(default)]
  pub source_handle: Option<String>,
  #[serde(default)]
  pub target_handle: Option<String>,
}

impl FlowEdge {
  pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      source: source.into(),
      target: target.into(),
      source_handle: None,
      target_handle: None,
    }
  }
}
