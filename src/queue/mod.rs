//! Queue-mode execution: a fixed linear order derived from node creation time,
//! driven end-to-end or one step at a time.

mod build_queue;
#[cfg(test)]
mod build_queue_test;
mod call_template;
mod dispatch;
#[cfg(test)]
mod dispatch_test;
mod queue_executor;
mod run_log;

pub use build_queue::{build_queue, creation_token, ordered_nodes};
pub use call_template::{CallTemplate, HttpMethod, default_templates, template_index};
pub use dispatch::{DispatchError, HttpDispatcher, NodeDispatcher, NodeStrategy, entry_payload};
pub use queue_executor::{NodeRunRecord, QueueExecutionResult, QueueExecutor, RunHandle, StepOutcome};
