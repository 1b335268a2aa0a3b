//! Graph-mode execution loop: runs scripts node by node until a terminal or revisited node.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::find_start::find_start_id;
use super::select_edge::select_next;
use crate::error::FlowError;
use crate::observer::RunObserver;
use crate::sandbox::ScriptRunner;
use crate::types::{ExecutionContext, FlowGraph};

/// Final result of a graph-mode run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRunResult {
  pub success: bool,
  /// Node ids in the order they ran. Never contains a repeat.
  pub execution_path: Vec<String>,
  /// Output of the last node that ran successfully.
  pub final_output: Option<Value>,
  pub error: Option<String>,
}

impl GraphRunResult {
  fn failed(execution_path: Vec<String>, error: impl Into<String>) -> Self {
    Self {
      success: false,
      execution_path,
      final_output: None,
      error: Some(error.into()),
    }
  }
}

/// Walks a [FlowGraph] from its start node, threading each output into the next script.
#[derive(Debug, Clone, Default)]
pub struct GraphExecutor {
  runner: ScriptRunner,
}

impl GraphExecutor {
  pub fn new(runner: ScriptRunner) -> Self {
    Self { runner }
  }

  /// Runs the graph from `start_id`, or from the first node without an incoming edge.
  ///
  /// A script failure or a dangling node id stops the run with `success: false`.
  /// Reaching an already visited node ends the run successfully.
  #[instrument(level = "trace", skip(self, graph, observer))]
  pub async fn run(
    &self,
    graph: &FlowGraph,
    start_id: Option<&str>,
    observer: &dyn RunObserver,
  ) -> GraphRunResult {
    let start = match start_id {
      Some(id) => id.to_string(),
      None => match find_start_id(graph) {
        Ok(id) => id.to_string(),
        Err(e) => return GraphRunResult::failed(vec![], e.to_string()),
      },
    };

    let mut visited: HashSet<String> = HashSet::new();
    let mut execution_path: Vec<String> = Vec::new();
    let mut input = Value::Null;
    let mut final_output = None;
    let mut current = Some(start);

    while let Some(node_id) = current.take() {
      if !visited.insert(node_id.clone()) {
        info!(node_id = %node_id, "node already visited; ending run");
        break;
      }
      execution_path.push(node_id.clone());

      let Some(node) = graph.node(&node_id) else {
        return GraphRunResult::failed(execution_path, FlowError::NodeNotFound(node_id).to_string());
      };

      info!(node_id = %node.id, step = execution_path.len(), "executing node");
      observer.on_node_start(&node.id);
      let result = self
        .runner
        .execute(&node.script, ExecutionContext::with_input(input))
        .await;
      observer.on_node_complete(&node.id, &result);

      if !result.success {
        info!(node_id = %node.id, error = result.error_message(), "node failed; aborting run");
        return GraphRunResult::failed(execution_path, result.error_message());
      }

      let output = result.output_or_null();
      current = select_next(graph, &node.id, &output);
      final_output = Some(output.clone());
      input = output;
    }

    info!(path = ?execution_path, "graph run complete");
    GraphRunResult {
      success: true,
      execution_path,
      final_output,
      error: None,
    }
  }
}
