//! The fixed table of ambient bindings a script can reach.
//!
//! Anything not listed here is removed from the engine's global object before
//! the script is compiled.

use std::fmt;

/// What a binding gives the script access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
  StructuredData,
  Math,
  DateTime,
  Coercion,
  NumericParsing,
  NumericPredicate,
  Logging,
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Capability::StructuredData => write!(f, "structured_data"),
      Capability::Math => write!(f, "math"),
      Capability::DateTime => write!(f, "date_time"),
      Capability::Coercion => write!(f, "coercion"),
      Capability::NumericParsing => write!(f, "numeric_parsing"),
      Capability::NumericPredicate => write!(f, "numeric_predicate"),
      Capability::Logging => write!(f, "logging"),
    }
  }
}

/// One ambient binding: the name the script sees and the engine expression bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
  pub name: &'static str,
  pub capability: Capability,
  pub(crate) source: &'static str,
}

const fn binding(name: &'static str, capability: Capability, source: &'static str) -> Binding {
  Binding {
    name,
    capability,
    source,
  }
}

/// Ambient bindings in parameter order. `console` is built by the program prelude.
pub const BINDINGS: &[Binding] = &[
  binding("JSON", Capability::StructuredData, "JSON"),
  binding("Math", Capability::Math, "Math"),
  binding("Date", Capability::DateTime, "Date"),
  binding("String", Capability::Coercion, "String"),
  binding("Number", Capability::Coercion, "Number"),
  binding("Boolean", Capability::Coercion, "Boolean"),
  binding("parseInt", Capability::NumericParsing, "parseInt"),
  binding("parseFloat", Capability::NumericParsing, "parseFloat"),
  binding("isNaN", Capability::NumericPredicate, "isNaN"),
  binding("isFinite", Capability::NumericPredicate, "isFinite"),
  binding("console", Capability::Logging, "hostConsole"),
];

/// Positional parameters every compiled script receives before the bindings.
pub const SCRIPT_PARAMS: [&str; 2] = ["input", "variables"];

pub fn is_allowed(name: &str) -> bool {
  SCRIPT_PARAMS.contains(&name) || BINDINGS.iter().any(|b| b.name == name)
}

/// Object literal mapping each binding name to its source expression.
pub(crate) fn capabilities_literal() -> String {
  let entries: Vec<String> = BINDINGS
    .iter()
    .map(|b| format!("{}: {}", b.name, b.source))
    .collect();
  format!("{{ {} }}", entries.join(", "))
}

/// Binding names as a JSON array, in table order.
pub(crate) fn binding_names_json() -> String {
  let names: Vec<&str> = BINDINGS.iter().map(|b| b.name).collect();
  serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
