//! CLI: Run a code-node flow from a JSON document.
//!
//! Usage: `run_flow [OPTIONS] <flow.json>`
//! Example: run_flow --mode queue --settle-ms 0 flows/pipeline.json
//!
//! Set RUST_LOG=codeflow=trace for TRACE-level span enter/exit and events, or
//! RUST_LOG=codeflow::script=info to see only script console output.

use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use codeflow::flow_io::{RUN_REPORT_VERSION, load_flow, write_run_report};
use codeflow::types::RunReport;
use codeflow::{
  ExecutionLogRecord, GraphExecutor, NoopObserver, QueueExecutor, RunObserver, RunnerConfig,
  ScriptRunner,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
  /// Follow edges from the start node, running each script.
  Graph,
  /// Run every node in creation order, dispatching non-entry nodes over HTTP.
  Queue,
  /// Run the single queue node at --cursor.
  Step,
}

impl Mode {
  fn as_str(self) -> &'static str {
    match self {
      Mode::Graph => "graph",
      Mode::Queue => "queue",
      Mode::Step => "step",
    }
  }
}

/// Run a code-node flow from a JSON document.
#[derive(Parser, Debug)]
#[command(name = "run_flow")]
#[command(
  after_help = r#"Environment variables (flags take precedence when both are given):
  CODEFLOW_API_BASE_URL        Base URL for queue-mode node calls (default: http://localhost:8000).
  CODEFLOW_SETTLE_DELAY_MS     Pause between queue nodes in milliseconds (default: 1000).
  CODEFLOW_SCRIPT_TIMEOUT_MS   Wall-clock limit per script in milliseconds (default: 5000).
  CODEFLOW_ENTRY_NODE_ID       Id of the node that heads the queue (default: entry).

Examples:
  run_flow flows/branching.json
  run_flow --mode queue --settle-ms 0 flows/pipeline.json
  run_flow --mode step --cursor 2 --report out/step.json flows/pipeline.json"#
)]
struct Args {
  /// Execution mode.
  #[arg(long, value_enum, default_value_t = Mode::Graph)]
  mode: Mode,

  /// Start node for graph mode. Default: the first node without an incoming edge.
  #[arg(long, value_name = "ID")]
  start: Option<String>,

  /// Queue position to run in step mode.
  #[arg(long, value_name = "N", default_value_t = 0)]
  cursor: usize,

  /// Base URL for queue-mode node calls. Overrides CODEFLOW_API_BASE_URL.
  #[arg(long, value_name = "URL")]
  api_base_url: Option<String>,

  /// Pause between queue nodes. Overrides CODEFLOW_SETTLE_DELAY_MS.
  #[arg(long, value_name = "MS")]
  settle_ms: Option<u64>,

  /// Write a JSON run report to this path.
  #[arg(long, value_name = "PATH")]
  report: Option<PathBuf>,

  /// Path to the flow document
  #[arg(value_name = "flow.json")]
  flow_path: PathBuf,
}

/// Prints queue log records as they are produced.
struct PrintObserver;

impl RunObserver for PrintObserver {
  fn on_log(&self, record: &ExecutionLogRecord) {
    println!(
      "[{}] {:<7} {}: {}",
      record.timestamp.format("%H:%M:%S%.3f"),
      record.severity.to_string(),
      record.node_name,
      record.message
    );
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  info!(mode = args.mode.as_str(), "run_flow starting");

  let mut config = RunnerConfig::from_env();
  if let Some(url) = args.api_base_url.clone() {
    config.api_base_url = url;
  }
  if let Some(ms) = args.settle_ms {
    config.settle_delay_ms = ms;
  }
  info!(api_base_url = %config.api_base_url, settle_delay_ms = config.settle_delay_ms, entry = %config.entry_node_id, "options (flags or env)");

  let graph = match load_flow(&args.flow_path) {
    Ok(g) => g,
    Err(e) => {
      eprintln!("Error loading {}: {}", args.flow_path.display(), e);
      process::exit(1);
    }
  };

  let started_at = Utc::now();
  let mut report = match args.mode {
    Mode::Graph => {
      let executor = GraphExecutor::new(ScriptRunner::new(config.sandbox()));
      let r = executor
        .run(&graph, args.start.as_deref(), &NoopObserver)
        .await;
      println!("Graph run {}.", if r.success { "completed" } else { "failed" });
      println!("  Path: {}", r.execution_path.join(" -> "));
      if let Some(output) = &r.final_output {
        println!("  Final output: {output}");
      }
      if let Some(error) = &r.error {
        println!("  Error: {error}");
      }
      RunReport {
        version: RUN_REPORT_VERSION,
        mode: args.mode.as_str().to_string(),
        run_id: Uuid::new_v4().to_string(),
        started_at,
        finished_at: started_at,
        success: r.success,
        execution_path: r.execution_path,
        final_output: r.final_output,
        error: r.error,
        logs: vec![],
      }
    }
    Mode::Queue => {
      let executor = QueueExecutor::from_config(&config);
      let r = executor.run_all(&graph, &PrintObserver).await;
      let succeeded = r.node_results.iter().filter(|n| n.result.success).count();
      println!("Queue run {}.", if r.success { "completed" } else { "failed" });
      println!("  Run id: {}", r.run_id);
      println!("  Nodes succeeded: {succeeded}/{}", r.node_results.len());
      if let Some(error) = &r.error {
        println!("  Error: {error}");
      }
      RunReport {
        version: RUN_REPORT_VERSION,
        mode: args.mode.as_str().to_string(),
        run_id: r.run_id.to_string(),
        started_at,
        finished_at: started_at,
        success: r.success,
        execution_path: r.node_results.iter().map(|n| n.node_id.clone()).collect(),
        final_output: r.node_results.last().and_then(|n| n.result.output.clone()),
        error: r.error,
        logs: r.logs,
      }
    }
    Mode::Step => {
      let executor = QueueExecutor::from_config(&config);
      let s = executor.run_one_step(&graph.nodes, args.cursor).await;
      println!("Step {}.", args.cursor);
      println!("  Node: {}", s.node_id.as_deref().unwrap_or("-"));
      println!("  Success: {}", s.result.success);
      println!("  Output: {}", s.result.output_or_null());
      if let Some(error) = &s.result.error {
        println!("  Error: {error}");
      }
      println!("  Has next: {}", s.has_next);
      RunReport {
        version: RUN_REPORT_VERSION,
        mode: args.mode.as_str().to_string(),
        run_id: Uuid::new_v4().to_string(),
        started_at,
        finished_at: started_at,
        success: s.result.success,
        execution_path: s.node_id.into_iter().collect(),
        final_output: s.result.output,
        error: s.result.error,
        logs: vec![],
      }
    }
  };
  report.finished_at = Utc::now();

  if let Some(path) = &args.report {
    if let Err(e) = write_run_report(path, &report) {
      eprintln!("Error writing report {}: {}", path.display(), e);
      process::exit(1);
    }
    info!(path = %path.display(), "run report written");
  }

  if !report.success {
    process::exit(1);
  }
}
