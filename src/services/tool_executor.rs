use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ToolError;
use crate::mcp::catalog::validate_tool_args;
use crate::services::logger::Logger;
use crate::utils::suggest::suggest;

/// One manager serves several related tools and matches on the name.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError>;
}

/// The single conversion from a failed call to caller-visible text.
pub fn render_failure(error: &ToolError) -> String {
    format!("Error: {}", error.message)
}

pub fn render_unknown_tool(tool: &str) -> String {
    format!("Unknown tool: {}", tool)
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn has_handler(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Runs one tool call to completion. Never fails: every error is turned
    /// into text here.
    pub async fn execute(&self, tool: &str, args: Value) -> String {
        let started_at = chrono::Utc::now().timestamp_millis();
        let trace_id = uuid::Uuid::new_v4().to_string();

        let Some(handler) = self.handlers.get(tool) else {
            let candidates = self.tool_names();
            self.logger.warn(
                "unknown tool",
                Some(&serde_json::json!({
                    "tool": tool,
                    "trace_id": trace_id,
                    "did_you_mean": suggest(tool, &candidates, 3),
                })),
            );
            return render_unknown_tool(tool);
        };

        let args = normalize_args(args);
        self.logger.debug(
            "tool call",
            Some(&serde_json::json!({"tool": tool, "trace_id": trace_id})),
        );

        let outcome = match validate_tool_args(tool, &args) {
            Ok(()) => handler.handle(tool, args).await,
            Err(err) => Err(err),
        };
        let duration_ms = chrono::Utc::now().timestamp_millis() - started_at;

        match outcome {
            Ok(text) => {
                self.logger.info(
                    "tool call completed",
                    Some(&serde_json::json!({
                        "tool": tool,
                        "trace_id": trace_id,
                        "duration_ms": duration_ms,
                    })),
                );
                text
            }
            Err(err) => {
                self.logger.error(
                    &format!("Error in tool call {}: {}", tool, err.message),
                    Some(&serde_json::json!({
                        "trace_id": trace_id,
                        "kind": err.kind,
                        "code": err.code,
                        "retryable": err.retryable,
                        "hint": err.hint,
                        "duration_ms": duration_ms,
                    })),
                );
                render_failure(&err)
            }
        }
    }
}

/// Missing or null arguments mean "no arguments".
fn normalize_args(args: Value) -> Value {
    match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}
