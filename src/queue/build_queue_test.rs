//! Tests for queue derivation.

use proptest::prelude::*;

use super::build_queue::{build_queue, creation_token};
use crate::types::FlowNode;

const ENTRY: &str = "entry";

fn nodes(ids: &[&str]) -> Vec<FlowNode> {
  ids.iter().map(|id| FlowNode::new(*id, "")).collect()
}

#[test]
fn creation_token_parses_digits_after_first_dash() {
  assert_eq!(creation_token("node-1000"), 1000);
  assert_eq!(creation_token("node-1700000000000-copy"), 1_700_000_000_000);
  assert_eq!(creation_token("node-12abc"), 12);
}

#[test]
fn creation_token_defaults_to_zero() {
  assert_eq!(creation_token("entry"), 0);
  assert_eq!(creation_token("node-abc"), 0);
  assert_eq!(creation_token("node-"), 0);
  assert_eq!(creation_token("node-99999999999999999999999"), 0);
}

#[test]
fn scenario_order() {
  let q = build_queue(&nodes(&["node-2000", ENTRY, "node-1000"]), ENTRY);
  assert_eq!(q, vec![ENTRY, "node-1000", "node-2000"]);
}

#[test]
fn missing_entry_gives_empty_queue() {
  assert!(build_queue(&nodes(&["node-1", "node-2"]), ENTRY).is_empty());
  assert!(build_queue(&[], ENTRY).is_empty());
}

#[test]
fn untokened_ids_sort_first_in_collection_order() {
  let q = build_queue(&nodes(&["node-5", "beta", ENTRY, "alpha"]), ENTRY);
  assert_eq!(q, vec![ENTRY, "beta", "alpha", "node-5"]);
}

#[test]
fn custom_entry_id() {
  let q = build_queue(&nodes(&["node-3", "start-node"]), "start-node");
  assert_eq!(q, vec!["start-node", "node-3"]);
}

proptest! {
  #[test]
  fn queue_without_entry_is_empty(tokens in proptest::collection::vec(0u64..1_000_000, 0..12)) {
    let ns: Vec<FlowNode> = tokens
      .iter()
      .enumerate()
      .map(|(i, t)| FlowNode::new(format!("node-{t}-{i}"), ""))
      .collect();
    prop_assert!(build_queue(&ns, ENTRY).is_empty());
  }

  #[test]
  fn queue_starts_with_entry_and_is_sorted(tokens in proptest::collection::vec(0u64..1_000_000, 0..12)) {
    let mut ns: Vec<FlowNode> = tokens
      .iter()
      .enumerate()
      .map(|(i, t)| FlowNode::new(format!("node-{t}-{i}"), ""))
      .collect();
    ns.insert(tokens.len() / 2, FlowNode::new(ENTRY, ""));
    let q = build_queue(&ns, ENTRY);
    prop_assert_eq!(q.len(), tokens.len() + 1);
    prop_assert_eq!(q[0].as_str(), ENTRY);
    let rest: Vec<u64> = q[1..].iter().map(|id| creation_token(id)).collect();
    prop_assert!(rest.windows(2).all(|w| w[0] <= w[1]));
  }
}
