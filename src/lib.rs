//! # codeflow
//!
//! Execution core for graphs of scripted code nodes.
//!
//! ## Architecture
//!
//! - [sandbox]: runs one node's script in an isolated JavaScript engine
//!   ([ScriptRunner]) and returns an [ExecutionResult].
//! - [graph]: [GraphExecutor] walks nodes along edges from a start node, threading
//!   each output into the next script and branching on the output's truthiness.
//! - [queue]: [QueueExecutor] runs nodes in a fixed order derived from their
//!   creation time, dispatching every non-entry node to an external service,
//!   either end-to-end or one step at a time.
//!
//! Progress is reported through a [RunObserver]; settings come from [RunnerConfig].

pub mod config;
pub mod error;
pub mod flow_io;
pub mod graph;
pub mod observer;
pub mod queue;
pub mod sandbox;
pub mod types;

pub use config::RunnerConfig;
pub use error::FlowError;
pub use graph::{GraphExecutor, GraphRunResult};
pub use observer::{ChannelObserver, NoopObserver, RunEvent, RunObserver};
pub use queue::{QueueExecutionResult, QueueExecutor, RunHandle, StepOutcome, build_queue};
pub use sandbox::{ScriptError, ScriptRunner};
pub use types::{
  ExecutionContext, ExecutionLogRecord, ExecutionResult, FlowEdge, FlowGraph, FlowNode,
  LogSeverity, NodeAnnotations,
};
