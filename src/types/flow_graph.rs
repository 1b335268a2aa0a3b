//! Snapshot of a flow: the node and edge collections as the caller holds them.

use serde::{Deserialize, Serialize};

use super::{FlowEdge, FlowNode};

/// Node/edge snapshot handed to the executors. Read-only for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
  #[serde(default)]
  pub nodes: Vec<FlowNode>,
  #[serde(default)]
  pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
  pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
    Self { nodes, edges }
  }

  pub fn node(&self, id: &str) -> Option<&FlowNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  /// Outgoing edges of `node_id` in insertion order.
  pub fn outgoing_edges(&self, node_id: &str) -> Vec<&FlowEdge> {
    self.edges.iter().filter(|e| e.source == node_id).collect()
  }

  pub fn has_incoming(&self, node_id: &str) -> bool {
    self.edges.iter().any(|e| e.target == node_id)
  }
}
