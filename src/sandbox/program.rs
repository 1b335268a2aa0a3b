//! Builds the engine program that compiles and invokes one script.
//!
//! The script text never becomes part of the program source: it is passed as
//! a JSON string literal and compiled with the engine's `AsyncFunction`
//! constructor, so a syntax error surfaces as a compile failure and the body
//! cannot reach outside its own function.
//!
//! The report lives on an object only the prelude closes over. The program
//! evaluates to that object, so nothing the script can reach (the global
//! object included) holds it.

use serde::Deserialize;
use serde_json::Value;

use super::ScriptError;
use super::bindings::{binding_names_json, capabilities_literal};
use crate::types::Variables;

/// Property of the program's completion value that holds the JSON report once the script settles.
pub(crate) const REPORT_KEY: &str = "report";

const PRELUDE: &str = r#""use strict";
(function (scriptSource, input, variables, bindingNames) {
  var global = globalThis;
  var stringify = JSON.stringify;
  var toText = String;
  var ownNames = Object.getOwnPropertyNames;
  var createObject = Object.create;
  var applyFn = Reflect.apply;
  var promiseThen = Promise.prototype.then;
  var host = createObject(null);
  host.report = undefined;
  var AsyncFunction = Object.getPrototypeOf(async function () {}).constructor;
  var setPrototype = Object.setPrototypeOf;
  var logs = setPrototype([], null);

  function render(args) {
    var text = "";
    for (var i = 0; i < args.length; i++) {
      var a = args[i];
      var part;
      if (typeof a === "string") {
        part = a;
      } else {
        try { part = stringify(a); } catch (e) { part = undefined; }
        if (typeof part !== "string") part = toText(a);
      }
      text = i === 0 ? part : text + " " + part;
    }
    return text;
  }
  function sink(level) {
    return function () {
      var line = createObject(null);
      line.level = level;
      line.message = render(arguments);
      logs[logs.length] = line;
    };
  }
  function describe(e) {
    if (e !== null && typeof e === "object" && typeof e.message === "string") {
      return e.name ? e.name + ": " + e.message : e.message;
    }
    return toText(e);
  }
  function settle(phase, ok, value, error) {
    var report = createObject(null);
    report.phase = phase;
    report.ok = ok;
    report.value = value === undefined ? null : value;
    report.error = error;
    report.logs = logs;
    try {
      host.report = stringify(report);
    } catch (e) {
      host.report = stringify({ phase: "output", ok: false, value: null, error: "output is not serializable: " + describe(e), logs: logs });
    }
  }

  var hostConsole = { log: sink("info"), warn: sink("warn"), error: sink("error") };
  var capabilities = __CAPABILITIES__;

  var names = ownNames(global);
  for (var i = 0; i < names.length; i++) {
    try { delete global[names[i]]; } catch (e) {}
  }

  var compiled;
  try {
    compiled = AsyncFunction.apply(undefined, ["input", "variables"].concat(bindingNames, ['"use strict";\n' + scriptSource]));
  } catch (e) {
    settle("compile", false, null, describe(e));
    return host;
  }

  var args = [input, variables];
  for (var j = 0; j < bindingNames.length; j++) {
    args.push(capabilities[bindingNames[j]]);
  }
  var pending;
  try {
    pending = compiled.apply(undefined, args);
  } catch (e) {
    settle("runtime", false, null, describe(e));
    return host;
  }
  applyFn(promiseThen, pending, [
    function (value) { settle("runtime", true, value, null); },
    function (e) { settle("runtime", false, null, describe(e)); }
  ]);
  return host;
})("#;

/// Full program source for `script` invoked with `input` and `variables`.
pub(crate) fn build_program(
  script: &str,
  input: &Value,
  variables: &Variables,
) -> Result<String, ScriptError> {
  let encode = |e: serde_json::Error| ScriptError::Engine(e.to_string());
  let script = serde_json::to_string(script).map_err(encode)?;
  let input = serde_json::to_string(input).map_err(encode)?;
  let variables = serde_json::to_string(variables).map_err(encode)?;
  let prelude = PRELUDE.replace("__CAPABILITIES__", &capabilities_literal());
  Ok(format!(
    "{prelude}{script}, {input}, {variables}, {names});\n",
    names = binding_names_json()
  ))
}

/// Phase in which the script settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportPhase {
  Compile,
  Runtime,
  Output,
}

/// One `console` call made by the script.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScriptLogLine {
  pub level: String,
  pub message: String,
}

/// The JSON string the program leaves on its report holder.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScriptReport {
  pub phase: ReportPhase,
  pub ok: bool,
  #[serde(default)]
  pub value: Option<Value>,
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub logs: Vec<ScriptLogLine>,
}

impl ScriptReport {
  pub fn into_outcome(self) -> Result<Value, ScriptError> {
    if self.ok {
      return Ok(self.value.unwrap_or(Value::Null));
    }
    let message = self.error.unwrap_or_else(|| "script failed".to_string());
    match self.phase {
      ReportPhase::Compile => Err(ScriptError::Compile(message)),
      ReportPhase::Runtime | ReportPhase::Output => Err(ScriptError::Runtime(message)),
    }
  }
}
