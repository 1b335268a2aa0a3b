//! Observer hooks through which a run's progress becomes visible while it happens.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::types::{ExecutionLogRecord, ExecutionResult};

/// Callbacks invoked by the executors during a run. All methods default to no-ops.
pub trait RunObserver: Send + Sync {
  fn on_node_start(&self, _node_id: &str) {}

  fn on_node_complete(&self, _node_id: &str, _result: &ExecutionResult) {}

  fn on_log(&self, _record: &ExecutionLogRecord) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// One observer callback, as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
  NodeStarted {
    node_id: String,
  },
  NodeCompleted {
    node_id: String,
    result: ExecutionResult,
  },
  Log {
    record: ExecutionLogRecord,
  },
}

/// Forwards every callback as a [RunEvent] over an unbounded channel.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
  tx: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelObserver {
  pub fn new(tx: mpsc::UnboundedSender<RunEvent>) -> Self {
    Self { tx }
  }

  /// Creates an observer and the receiver its events arrive on.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self::new(tx), rx)
  }
}

impl RunObserver for ChannelObserver {
  fn on_node_start(&self, node_id: &str) {
    let _ = self.tx.send(RunEvent::NodeStarted {
      node_id: node_id.to_string(),
    });
  }

  fn on_node_complete(&self, node_id: &str, result: &ExecutionResult) {
    let _ = self.tx.send(RunEvent::NodeCompleted {
      node_id: node_id.to_string(),
      result: result.clone(),
    });
  }

  fn on_log(&self, record: &ExecutionLogRecord) {
    let _ = self.tx.send(RunEvent::Log {
      record: record.clone(),
    });
  }
}
