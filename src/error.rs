//! Error types for flow loading and structural run failures.

use thiserror::Error;

/// Structural and I/O errors. The `Display` text is what lands in result `error` fields.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("no start node: every node has an incoming edge")]
  NoStartNode,

  #[error("node not found: {0}")]
  NodeNotFound(String),

  #[error("execution queue is empty: entry node '{0}' is missing")]
  EmptyQueue(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid flow JSON: {0}")]
  Json(#[from] serde_json::Error),
}
