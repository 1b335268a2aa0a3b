//! Severity of an execution log record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of an execution log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
  Info,
  Success,
  Warning,
  Error,
}

impl fmt::Display for LogSeverity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogSeverity::Info => write!(f, "info"),
      LogSeverity::Success => write!(f, "success"),
      LogSeverity::Warning => write!(f, "warning"),
      LogSeverity::Error => write!(f, "error"),
    }
  }
}
