use crate::errors::ToolError;
use crate::services::client_factory::ClientFactory;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::render::format_inventories;
use crate::utils::tool_errors::unhandled_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const INVENTORY_TOOLS: &[&str] = &["get_host_inventories"];

#[derive(Clone)]
pub struct InventoryManager {
    logger: Logger,
    validation: Validation,
    clients: Arc<dyn ClientFactory>,
}

impl InventoryManager {
    pub fn new(logger: Logger, validation: Validation, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            logger: logger.child("inventory"),
            validation,
            clients,
        }
    }

    async fn list(&self, args: &Value) -> Result<String, ToolError> {
        let organization_id = self.validation.optional_filter(args, "organization_id")?;
        let client = self.clients.open()?;
        let inventories = client.get_inventories(organization_id.as_deref()).await?;
        let hosts: usize = inventories.iter().map(|inv| inv.hosts.len()).sum();
        self.logger.debug(
            "inventories loaded",
            Some(&serde_json::json!({"inventories": inventories.len(), "hosts": hosts})),
        );
        Ok(format_inventories(&inventories))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for InventoryManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        match tool {
            "get_host_inventories" => self.list(&args).await,
            _ => Err(unhandled_tool_error("inventory", tool, INVENTORY_TOOLS)),
        }
    }
}
