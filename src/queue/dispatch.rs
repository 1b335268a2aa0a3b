//! Per-node execution strategies for queue mode and the HTTP dispatcher.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};

use super::call_template::{CallTemplate, HttpMethod, template_index};
use crate::types::FlowNode;

/// Failure of an external call made on behalf of a node.
#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("HTTP error! status: {0}")]
  Status(u16),

  #[error("request failed: {0}")]
  Transport(String),

  #[error("failed to decode response body: {0}")]
  Decode(String),

  #[error("no call template for queue position {0}")]
  NoTemplate(usize),

  #[error("dispatcher panicked: {0}")]
  Panicked(String),
}

/// External action run for every non-entry node.
///
/// Each call runs on its own tokio task, so a panic is reported as that
/// node's failure ([DispatchError::Panicked]) and the run continues.
#[async_trait]
pub trait NodeDispatcher: Send + Sync {
  /// Executes `node`, which sits at `position` (1-based after the entry node) in the queue.
  async fn dispatch(&self, node: &FlowNode, position: usize) -> Result<Value, DispatchError>;
}

/// How a node at a given queue position is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStrategy {
  /// The entry node: no external call, a fixed "initialized" payload.
  Entry,
  /// Any other node: handed to the [NodeDispatcher].
  External { position: usize },
}

impl NodeStrategy {
  pub fn for_position(position: usize) -> Self {
    if position == 0 {
      NodeStrategy::Entry
    } else {
      NodeStrategy::External { position }
    }
  }
}

/// Payload the entry node produces.
pub fn entry_payload(now: DateTime<Utc>) -> Value {
  json!({
    "status": "initialized",
    "timestamp": now.to_rfc3339(),
  })
}

/// Sends each node's call template to a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
  client: reqwest::Client,
  base_url: String,
  templates: Vec<CallTemplate>,
}

impl HttpDispatcher {
  pub fn new(base_url: impl Into<String>, templates: Vec<CallTemplate>) -> Self {
    Self::with_client(reqwest::Client::new(), base_url, templates)
  }

  pub fn with_client(
    client: reqwest::Client,
    base_url: impl Into<String>,
    templates: Vec<CallTemplate>,
  ) -> Self {
    Self {
      client,
      base_url: base_url.into(),
      templates,
    }
  }

  pub fn templates(&self) -> &[CallTemplate] {
    &self.templates
  }

  /// Template used for the node at `position`.
  pub fn template_for(&self, position: usize) -> Option<&CallTemplate> {
    template_index(position, self.templates.len()).map(|i| &self.templates[i])
  }

  fn url(&self, template: &CallTemplate) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), template.path)
  }
}

#[async_trait]
impl NodeDispatcher for HttpDispatcher {
  #[instrument(level = "trace", skip(self, node), fields(node_id = %node.id))]
  async fn dispatch(&self, node: &FlowNode, position: usize) -> Result<Value, DispatchError> {
    let template = self
      .template_for(position)
      .ok_or(DispatchError::NoTemplate(position))?;
    let url = self.url(template);
    debug!(template = %template.name, method = ?template.method, url = %url, "dispatching node");

    let request = match (template.method, template.body()) {
      (HttpMethod::Post, Some(body)) => self.client.post(&url).json(&body),
      (HttpMethod::Post, None) => self.client.post(&url),
      (HttpMethod::Get, _) => self.client.get(&url),
    };
    let response = request
      .send()
      .await
      .map_err(|e| DispatchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(DispatchError::Status(status.as_u16()));
    }
    response
      .json::<Value>()
      .await
      .map_err(|e| DispatchError::Decode(e.to_string()))
  }
}
