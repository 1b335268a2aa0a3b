//! Deterministic execution order for queue mode.

use crate::types::FlowNode;

/// Creation timestamp embedded in a node id: the digits right after the first `-`.
///
/// `node-1700000000000` gives `1700000000000`; ids without such digits (or
/// with a value that overflows) give `0`.
pub fn creation_token(id: &str) -> u64 {
  let Some((_, rest)) = id.split_once('-') else {
    return 0;
  };
  let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
  digits.parse().unwrap_or(0)
}

/// Nodes in execution order: the entry node, then the rest by ascending creation token.
///
/// Empty when no node has id `entry_id`. Edges play no part. Equal tokens keep
/// collection order.
pub fn ordered_nodes<'a>(nodes: &'a [FlowNode], entry_id: &str) -> Vec<&'a FlowNode> {
  let Some(entry) = nodes.iter().find(|n| n.id == entry_id) else {
    return Vec::new();
  };
  let mut rest: Vec<&FlowNode> = nodes.iter().filter(|n| n.id != entry_id).collect();
  rest.sort_by_key(|n| creation_token(&n.id));
  std::iter::once(entry).chain(rest).collect()
}

/// Node ids in execution order. See [ordered_nodes].
pub fn build_queue(nodes: &[FlowNode], entry_id: &str) -> Vec<String> {
  ordered_nodes(nodes, entry_id)
    .into_iter()
    .map(|n| n.id.clone())
    .collect()
}
