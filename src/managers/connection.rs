use crate::errors::ToolError;
use crate::services::client_factory::ClientFactory;
use crate::services::logger::Logger;
use crate::utils::render::format_connection_test;
use crate::utils::tool_errors::unhandled_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const CONNECTION_TOOLS: &[&str] = &["test_aap_connection"];

#[derive(Clone)]
pub struct ConnectionManager {
    logger: Logger,
    clients: Arc<dyn ClientFactory>,
}

impl ConnectionManager {
    pub fn new(logger: Logger, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            logger: logger.child("connection"),
            clients,
        }
    }

    async fn test(&self) -> Result<String, ToolError> {
        let client = self.clients.open()?;
        let connected = client.test_connection().await;
        self.logger.info(
            "connection test",
            Some(&serde_json::json!({"url": client.config().url, "connected": connected})),
        );
        Ok(format_connection_test(connected, client.config()))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for ConnectionManager {
    async fn handle(&self, tool: &str, _args: Value) -> Result<String, ToolError> {
        match tool {
            "test_aap_connection" => self.test().await,
            _ => Err(unhandled_tool_error("connection", tool, CONNECTION_TOOLS)),
        }
    }
}
