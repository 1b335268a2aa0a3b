//! Compiles and invokes one script against one input value.

use boa_engine::{Context, JsString, Source};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::program::{REPORT_KEY, ScriptLogLine, ScriptReport, build_program};
use super::{SCRIPT_LOG_PREFIX, SandboxConfig, ScriptError};
use crate::types::{ExecutionContext, ExecutionResult};

/// Runs node scripts in a fresh, restricted engine per invocation.
#[derive(Debug, Clone, Default)]
pub struct ScriptRunner {
  config: SandboxConfig,
}

impl ScriptRunner {
  pub fn new(config: SandboxConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &SandboxConfig {
    &self.config
  }

  /// Executes `script` with `context.input` and `context.variables`.
  ///
  /// Compile errors, thrown errors, rejected promises, timeouts and engine
  /// panics all come back as a failed [ExecutionResult].
  #[instrument(level = "trace", skip(self, script, context))]
  pub async fn execute(&self, script: &str, context: ExecutionContext) -> ExecutionResult {
    match self.try_execute(script, context).await {
      Ok(output) => ExecutionResult::success(output),
      Err(e) => {
        debug!(error = %e, "script failed");
        ExecutionResult::failure(e.to_string())
      }
    }
  }

  async fn try_execute(&self, script: &str, context: ExecutionContext) -> Result<Value, ScriptError> {
    let script = script.to_string();
    let limit = self.config.loop_iteration_limit;
    let task = tokio::task::spawn_blocking(move || run_in_engine(&script, &context, limit));
    let report = match tokio::time::timeout(self.config.timeout, task).await {
      Err(_) => return Err(ScriptError::Timeout(self.config.timeout.as_millis())),
      Ok(Err(join)) => return Err(ScriptError::Engine(join.to_string())),
      Ok(Ok(report)) => report?,
    };
    forward_logs(&report.logs);
    report.into_outcome()
  }
}

/// Runs the program to completion on the current thread, draining the job queue.
fn run_in_engine(
  script: &str,
  context: &ExecutionContext,
  loop_iteration_limit: u64,
) -> Result<ScriptReport, ScriptError> {
  let program = build_program(script, &context.input, &context.variables)?;
  let mut engine = Context::default();
  engine
    .runtime_limits_mut()
    .set_loop_iteration_limit(loop_iteration_limit);

  let completion = engine
    .eval(Source::from_bytes(&program))
    .map_err(|e| ScriptError::Runtime(e.to_string()))?;
  let Some(holder) = completion.as_object() else {
    return Err(ScriptError::Engine("program did not yield its report holder".to_string()));
  };
  let _ = engine.run_jobs();

  let report = holder
    .get(JsString::from(REPORT_KEY), &mut engine)
    .map_err(|e| ScriptError::Engine(e.to_string()))?;
  if report.is_undefined() {
    return Err(ScriptError::Unsettled);
  }
  let text = report
    .to_string(&mut engine)
    .map_err(|e| ScriptError::Engine(e.to_string()))?
    .to_std_string_escaped();
  serde_json::from_str(&text).map_err(|e| ScriptError::Engine(e.to_string()))
}

fn forward_logs(lines: &[ScriptLogLine]) {
  for line in lines {
    match line.level.as_str() {
      "warn" => warn!(target: "codeflow::script", "{} {}", SCRIPT_LOG_PREFIX, line.message),
      "error" => error!(target: "codeflow::script", "{} {}", SCRIPT_LOG_PREFIX, line.message),
      _ => info!(target: "codeflow::script", "{} {}", SCRIPT_LOG_PREFIX, line.message),
    }
  }
}
