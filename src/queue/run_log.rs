//! Log trail of a queue run: records are kept in order and streamed to the observer.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use crate::observer::RunObserver;
use crate::types::{
  ExecutionLogRecord, FlowNode, LogSeverity, SYSTEM_NODE_ID, SYSTEM_NODE_NAME,
};

/// Collects [ExecutionLogRecord]s with strictly increasing timestamps.
pub(crate) struct RunLogger<'a> {
  observer: &'a dyn RunObserver,
  records: Vec<ExecutionLogRecord>,
  last_timestamp: Option<DateTime<Utc>>,
}

impl<'a> RunLogger<'a> {
  pub fn new(observer: &'a dyn RunObserver) -> Self {
    Self {
      observer,
      records: Vec::new(),
      last_timestamp: None,
    }
  }

  /// Run-level record (start, completion, failure).
  pub fn system(&mut self, severity: LogSeverity, message: impl Into<String>, data: Option<Value>) {
    self.push(SYSTEM_NODE_ID, SYSTEM_NODE_NAME, severity, message.into(), data);
  }

  pub fn node(
    &mut self,
    node: &FlowNode,
    severity: LogSeverity,
    message: impl Into<String>,
    data: Option<Value>,
  ) {
    self.push(&node.id, node.display_name(), severity, message.into(), data);
  }

  pub fn into_records(self) -> Vec<ExecutionLogRecord> {
    self.records
  }

  fn next_timestamp(&mut self) -> DateTime<Utc> {
    let now = Utc::now();
    let ts = match self.last_timestamp {
      Some(last) if now <= last => last + TimeDelta::microseconds(1),
      _ => now,
    };
    self.last_timestamp = Some(ts);
    ts
  }

  fn push(
    &mut self,
    node_id: &str,
    node_name: &str,
    severity: LogSeverity,
    message: String,
    data: Option<Value>,
  ) {
    let record = ExecutionLogRecord {
      node_id: node_id.to_string(),
      node_name: node_name.to_string(),
      timestamp: self.next_timestamp(),
      severity,
      message,
      data,
    };
    self.observer.on_log(&record);
    self.records.push(record);
  }
}
