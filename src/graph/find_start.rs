//! Start-node selection for graph mode.

use crate::error::FlowError;
use crate::types::FlowGraph;

/// First node, in collection order, with no incoming edge.
pub fn find_start_id(graph: &FlowGraph) -> Result<&str, FlowError> {
  graph
    .nodes
    .iter()
    .find(|n| !graph.has_incoming(&n.id))
    .map(|n| n.id.as_str())
    .ok_or(FlowError::NoStartNode)
}
