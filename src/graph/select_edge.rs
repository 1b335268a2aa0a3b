//! Next-node selection for graph mode.

use serde_json::Value;
use tracing::warn;

use crate::sandbox::classify_truthiness;
use crate::types::FlowGraph;

/// How a node routes to its successor, derived from its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeSelector {
  /// No outgoing edge.
  Terminal,
  /// Exactly one outgoing edge, followed regardless of output.
  Unconditional(String),
  /// Two outgoing edges: first taken on truthy output, second on falsy.
  Predicate { when_true: String, when_false: String },
  /// More outgoing edges than routing supports; treated as terminal.
  Unsupported(usize),
}

impl EdgeSelector {
  /// Builds the selector for `node_id` from its outgoing edges in insertion order.
  pub fn for_node(graph: &FlowGraph, node_id: &str) -> Self {
    let edges = graph.outgoing_edges(node_id);
    match edges.as_slice() {
      [] => EdgeSelector::Terminal,
      [only] => EdgeSelector::Unconditional(only.target.clone()),
      [first, second] => EdgeSelector::Predicate {
        when_true: first.target.clone(),
        when_false: second.target.clone(),
      },
      more => EdgeSelector::Unsupported(more.len()),
    }
  }

  /// Target for `output`, or `None` when the run should end here.
  pub fn resolve(&self, output: &Value) -> Option<&str> {
    match self {
      EdgeSelector::Terminal | EdgeSelector::Unsupported(_) => None,
      EdgeSelector::Unconditional(target) => Some(target.as_str()),
      EdgeSelector::Predicate {
        when_true,
        when_false,
      } => {
        if classify_truthiness(output) {
          Some(when_true.as_str())
        } else {
          Some(when_false.as_str())
        }
      }
    }
  }
}

/// Next node after `node_id` produced `output`.
pub fn select_next(graph: &FlowGraph, node_id: &str, output: &Value) -> Option<String> {
  let selector = EdgeSelector::for_node(graph, node_id);
  if let EdgeSelector::Unsupported(count) = selector {
    warn!(node_id, outgoing = count, "more than two outgoing edges; ending run here");
  }
  selector.resolve(output).map(str::to_string)
}
