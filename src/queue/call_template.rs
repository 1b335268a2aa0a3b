//! Preset network requests assigned to non-entry nodes by queue position.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
}

/// One preset request: method, path under the base URL, and for `POST` the script sent along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTemplate {
  pub name: String,
  pub method: HttpMethod,
  pub path: String,
  /// Opaque to this crate; only the remote service interprets it.
  #[serde(default)]
  pub script: Option<String>,
}

impl CallTemplate {
  pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      method: HttpMethod::Get,
      path: path.into(),
      script: None,
    }
  }

  pub fn post(name: impl Into<String>, path: impl Into<String>, script: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      method: HttpMethod::Post,
      path: path.into(),
      script: Some(script.into()),
    }
  }

  /// JSON body for `POST` templates, `None` for `GET`.
  pub fn body(&self) -> Option<Value> {
    match self.method {
      HttpMethod::Get => None,
      HttpMethod::Post => Some(json!({ "script": self.script.clone().unwrap_or_default() })),
    }
  }
}

/// The built-in templates. Index 0 is the health check.
pub fn default_templates() -> Vec<CallTemplate> {
  vec![
    CallTemplate::get("health", "/health"),
    CallTemplate::post("execute", "/api/execute", "return input;"),
    CallTemplate::get("status", "/api/status"),
    CallTemplate::post("process", "/api/process", "return { processed: true };"),
  ]
}

/// Template for the node at queue `position`. The entry node (position 0) has none.
pub fn template_index(position: usize, template_count: usize) -> Option<usize> {
  if position == 0 || template_count == 0 {
    return None;
  }
  Some((position - 1) % template_count)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_index_wraps_after_entry() {
    assert_eq!(template_index(0, 4), None);
    assert_eq!(template_index(1, 4), Some(0));
    assert_eq!(template_index(2, 4), Some(1));
    assert_eq!(template_index(4, 4), Some(3));
    assert_eq!(template_index(5, 4), Some(0));
    assert_eq!(template_index(3, 0), None);
  }

  #[test]
  fn post_body_carries_script() {
    let t = CallTemplate::post("run", "/run", "return 1;");
    assert_eq!(t.body(), Some(json!({"script": "return 1;"})));
    assert_eq!(CallTemplate::get("h", "/h").body(), None);
  }

  #[test]
  fn method_serializes_uppercase() {
    let v = serde_json::to_value(CallTemplate::get("h", "/health")).unwrap();
    assert_eq!(v["method"], "GET");
  }

  #[test]
  fn default_templates_start_with_health_check() {
    let t = default_templates();
    assert_eq!(t[0].method, HttpMethod::Get);
    assert_eq!(t[0].path, "/health");
    assert!(t.iter().filter(|t| t.method == HttpMethod::Post).all(|t| t.script.is_some()));
  }
}
