//! Graph-mode execution: walk nodes by following edges, branching on node output.

mod execution_loop;
mod find_start;
mod select_edge;
#[cfg(test)]
mod select_edge_test;

pub use execution_loop::{GraphExecutor, GraphRunResult};
pub use find_start::find_start_id;
pub use select_edge::{EdgeSelector, select_next};
