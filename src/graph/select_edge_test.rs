//! Tests for `EdgeSelector` and `select_next`.

use serde_json::{Value, json};

use super::{EdgeSelector, select_next};
use crate::types::{FlowEdge, FlowGraph, FlowNode};

fn graph(edges: Vec<FlowEdge>) -> FlowGraph {
  FlowGraph::new(
    vec![
      FlowNode::new("check", ""),
      FlowNode::new("yes", ""),
      FlowNode::new("no", ""),
      FlowNode::new("other", ""),
    ],
    edges,
  )
}

#[test]
fn no_edges_is_terminal() {
  let g = graph(vec![]);
  assert_eq!(EdgeSelector::for_node(&g, "check"), EdgeSelector::Terminal);
  assert_eq!(select_next(&g, "check", &json!(true)), None);
}

#[test]
fn single_edge_ignores_output() {
  let g = graph(vec![FlowEdge::new("e1", "check", "yes")]);
  assert_eq!(select_next(&g, "check", &Value::Null).as_deref(), Some("yes"));
  assert_eq!(select_next(&g, "check", &json!(0)).as_deref(), Some("yes"));
}

#[test]
fn two_edges_branch_on_truthiness() {
  let g = graph(vec![
    FlowEdge::new("e1", "check", "yes"),
    FlowEdge::new("e2", "check", "no"),
  ]);
  assert_eq!(
    EdgeSelector::for_node(&g, "check"),
    EdgeSelector::Predicate {
      when_true: "yes".to_string(),
      when_false: "no".to_string()
    }
  );
  for truthy in [json!({}), json!("x"), json!(1), json!(true), json!([1])] {
    assert_eq!(select_next(&g, "check", &truthy).as_deref(), Some("yes"));
  }
  for falsy in [json!(0), json!(""), json!([]), Value::Null, json!(false)] {
    assert_eq!(select_next(&g, "check", &falsy).as_deref(), Some("no"));
  }
}

#[test]
fn branch_slots_follow_insertion_order_not_ids() {
  let g = graph(vec![
    FlowEdge::new("z", "check", "no"),
    FlowEdge::new("a", "check", "yes"),
  ]);
  assert_eq!(select_next(&g, "check", &json!(true)).as_deref(), Some("no"));
}

#[test]
fn edges_of_other_nodes_are_ignored() {
  let g = graph(vec![
    FlowEdge::new("e0", "yes", "no"),
    FlowEdge::new("e1", "check", "other"),
  ]);
  assert_eq!(select_next(&g, "check", &json!(false)).as_deref(), Some("other"));
}

#[test]
fn three_edges_are_unsupported_and_end_the_run() {
  let g = graph(vec![
    FlowEdge::new("e1", "check", "yes"),
    FlowEdge::new("e2", "check", "no"),
    FlowEdge::new("e3", "check", "other"),
  ]);
  assert_eq!(EdgeSelector::for_node(&g, "check"), EdgeSelector::Unsupported(3));
  assert_eq!(select_next(&g, "check", &json!(true)), None);
}
