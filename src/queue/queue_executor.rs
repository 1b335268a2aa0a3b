//! Queue-mode driver: `run_all`, the stateless step, and the resumable [RunHandle].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::build_queue::{build_queue, ordered_nodes};
use super::dispatch::{DispatchError, HttpDispatcher, NodeDispatcher, NodeStrategy, entry_payload};
use super::run_log::RunLogger;
use crate::config::RunnerConfig;
use crate::error::FlowError;
use crate::observer::RunObserver;
use crate::types::{ExecutionLogRecord, ExecutionResult, FlowGraph, FlowNode, LogSeverity};

/// Result of one node within a queue run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRunRecord {
  pub node_id: String,
  pub result: ExecutionResult,
}

/// Final result of [QueueExecutor::run_all].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueExecutionResult {
  pub run_id: Uuid,
  /// False only when the run could not proceed at all; node failures do not clear it.
  pub success: bool,
  pub node_results: Vec<NodeRunRecord>,
  pub logs: Vec<ExecutionLogRecord>,
  pub error: Option<String>,
}

/// Result of executing one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
  /// Node that ran, `None` when the cursor was past the end.
  pub node_id: Option<String>,
  pub result: ExecutionResult,
  pub has_next: bool,
}

impl StepOutcome {
  fn out_of_range(cursor: usize) -> Self {
    Self {
      node_id: None,
      result: ExecutionResult::failure(format!("no node at step {cursor}")),
      has_next: false,
    }
  }
}

/// Resumable stepwise run: a snapshot of the queue plus a cursor.
///
/// The snapshot is taken when the handle is created, so later edits to the
/// caller's node set do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHandle {
  pub run_id: Uuid,
  queue: Vec<FlowNode>,
  cursor: usize,
}

impl RunHandle {
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  pub fn is_finished(&self) -> bool {
    self.cursor >= self.queue.len()
  }

  /// Node ids in execution order.
  pub fn queue_ids(&self) -> Vec<&str> {
    self.queue.iter().map(|n| n.id.as_str()).collect()
  }

  /// Node the next `step` will run.
  pub fn next_node(&self) -> Option<&FlowNode> {
    self.queue.get(self.cursor)
  }
}

/// Drives nodes through the queue order, dispatching non-entry nodes externally.
#[derive(Clone)]
pub struct QueueExecutor {
  dispatcher: Arc<dyn NodeDispatcher>,
  entry_node_id: String,
  settle_delay: Duration,
}

impl QueueExecutor {
  pub fn new(
    dispatcher: Arc<dyn NodeDispatcher>,
    entry_node_id: impl Into<String>,
    settle_delay: Duration,
  ) -> Self {
    Self {
      dispatcher,
      entry_node_id: entry_node_id.into(),
      settle_delay,
    }
  }

  /// Executor dispatching over HTTP with the configured base URL and templates.
  pub fn from_config(config: &RunnerConfig) -> Self {
    let dispatcher = HttpDispatcher::new(config.api_base_url.clone(), config.templates.clone());
    Self::new(
      Arc::new(dispatcher),
      config.entry_node_id.clone(),
      config.settle_delay(),
    )
  }

  pub fn entry_node_id(&self) -> &str {
    &self.entry_node_id
  }

  pub fn build_queue(&self, nodes: &[FlowNode]) -> Vec<String> {
    build_queue(nodes, &self.entry_node_id)
  }

  /// Runs every node in queue order. Edges in `graph` are not consulted.
  ///
  /// A failing node is logged and reported, and the run moves on to the next one.
  #[instrument(level = "trace", skip(self, graph, observer))]
  pub async fn run_all(&self, graph: &FlowGraph, observer: &dyn RunObserver) -> QueueExecutionResult {
    let run_id = Uuid::new_v4();
    let mut log = RunLogger::new(observer);
    let queue = ordered_nodes(&graph.nodes, &self.entry_node_id);
    info!(%run_id, nodes = queue.len(), "queue run starting");
    log.system(
      LogSeverity::Info,
      format!("Starting execution of {} nodes", queue.len()),
      Some(json!({ "run_id": run_id.to_string() })),
    );

    if queue.is_empty() {
      let error = FlowError::EmptyQueue(self.entry_node_id.clone()).to_string();
      warn!(%run_id, %error, "queue run cannot start");
      log.system(LogSeverity::Error, format!("Execution failed: {error}"), None);
      return QueueExecutionResult {
        run_id,
        success: false,
        node_results: Vec::new(),
        logs: log.into_records(),
        error: Some(error),
      };
    }

    let mut node_results = Vec::with_capacity(queue.len());
    for (position, node) in queue.iter().enumerate() {
      observer.on_node_start(&node.id);
      log.node(
        node,
        LogSeverity::Info,
        format!("Executing {}", node.display_name()),
        None,
      );

      let result = self.execute_node(node, position).await;
      if result.success {
        log.node(
          node,
          LogSeverity::Success,
          "Node completed successfully",
          result.output.clone(),
        );
      } else {
        warn!(%run_id, node_id = %node.id, error = result.error_message(), "node failed");
        log.node(
          node,
          LogSeverity::Error,
          format!("Node failed: {}", result.error_message()),
          None,
        );
      }
      observer.on_node_complete(&node.id, &result);
      node_results.push(NodeRunRecord {
        node_id: node.id.clone(),
        result,
      });

      if position + 1 < queue.len() && !self.settle_delay.is_zero() {
        tokio::time::sleep(self.settle_delay).await;
      }
    }

    let succeeded = node_results.iter().filter(|r| r.result.success).count();
    info!(%run_id, succeeded, total = node_results.len(), "queue run complete");
    log.system(
      LogSeverity::Success,
      format!(
        "Execution completed: {succeeded} of {} nodes succeeded",
        node_results.len()
      ),
      None,
    );
    QueueExecutionResult {
      run_id,
      success: true,
      node_results,
      logs: log.into_records(),
      error: None,
    }
  }

  /// Runs the node at `cursor` of a freshly derived queue, without delay.
  pub async fn run_one_step(&self, nodes: &[FlowNode], cursor: usize) -> StepOutcome {
    let queue = ordered_nodes(nodes, &self.entry_node_id);
    let Some(node) = queue.get(cursor) else {
      return StepOutcome::out_of_range(cursor);
    };
    let result = self.execute_node(node, cursor).await;
    StepOutcome {
      node_id: Some(node.id.clone()),
      result,
      has_next: cursor + 1 < queue.len(),
    }
  }

  /// Snapshots the queue for stepwise execution.
  pub fn start(&self, nodes: &[FlowNode]) -> RunHandle {
    let queue: Vec<FlowNode> = ordered_nodes(nodes, &self.entry_node_id)
      .into_iter()
      .cloned()
      .collect();
    RunHandle {
      run_id: Uuid::new_v4(),
      queue,
      cursor: 0,
    }
  }

  /// Runs the handle's next node and advances its cursor.
  pub async fn step(&self, handle: &mut RunHandle) -> StepOutcome {
    let cursor = handle.cursor;
    let Some(node) = handle.queue.get(cursor) else {
      return StepOutcome::out_of_range(cursor);
    };
    let result = self.execute_node(node, cursor).await;
    let outcome = StepOutcome {
      node_id: Some(node.id.clone()),
      result,
      has_next: cursor + 1 < handle.queue.len(),
    };
    handle.cursor += 1;
    outcome
  }

  #[instrument(level = "trace", skip(self, node), fields(node_id = %node.id))]
  async fn execute_node(&self, node: &FlowNode, position: usize) -> ExecutionResult {
    match NodeStrategy::for_position(position) {
      NodeStrategy::Entry => ExecutionResult::success(entry_payload(Utc::now())),
      NodeStrategy::External { position } => match self.dispatch_isolated(node, position).await {
        Ok(output) => ExecutionResult::success(output),
        Err(e) => ExecutionResult::failure(e.to_string()),
      },
    }
  }

  /// Runs the dispatcher on its own task so a panic fails this node only.
  async fn dispatch_isolated(&self, node: &FlowNode, position: usize) -> Result<Value, DispatchError> {
    let dispatcher = Arc::clone(&self.dispatcher);
    let node = node.clone();
    let task = tokio::spawn(async move { dispatcher.dispatch(&node, position).await });
    match task.await {
      Ok(result) => result,
      Err(join) if join.is_panic() => Err(DispatchError::Panicked(panic_message(join.into_panic()))),
      Err(join) => Err(DispatchError::Transport(join.to_string())),
    }
  }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "non-string panic payload".to_string()
  }
}
