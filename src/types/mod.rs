//! Data model shared by the graph executor, the queue executor and the sandbox.
//!
//! Everything here is plain data: serializable, cloneable, and owned by whoever
//! drives a run. The executors read these values and hand new ones back.

use std::collections::HashMap;

mod execution_context;
mod execution_log;
mod execution_result;
mod flow_edge;
mod flow_graph;
mod flow_node;
mod log_severity;
mod node_annotations;

pub use execution_context::ExecutionContext;
pub use execution_log::{ExecutionLogRecord, RunReport, SYSTEM_NODE_ID, SYSTEM_NODE_NAME};
pub use execution_result::ExecutionResult;
pub use flow_edge::FlowEdge;
pub use flow_graph::FlowGraph;
pub use flow_node::FlowNode;
pub use log_severity::LogSeverity;
pub use node_annotations::NodeAnnotations;

/// Scratch variable bag handed to every script invocation.
pub type Variables = HashMap<String, serde_json::Value>;
