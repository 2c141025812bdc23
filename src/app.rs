use crate::errors::ToolError;
use crate::managers::connection::{ConnectionManager, CONNECTION_TOOLS};
use crate::managers::inventory::{InventoryManager, INVENTORY_TOOLS};
use crate::managers::jobs::{JobManager, JOB_TOOLS};
use crate::managers::organizations::{OrganizationManager, ORGANIZATION_TOOLS};
use crate::managers::templates::{TemplateManager, TEMPLATE_TOOLS};
use crate::mcp::catalog::tool_catalog;
use crate::services::client_factory::{ClientFactory, HttpClientFactory};
use crate::services::config::AapConfig;
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every tool in tool_catalog.json must have a handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    /// Wires the real HTTP client. Incomplete credentials are only warned
    /// about here; each tool call reports them.
    pub fn initialize(config: AapConfig, logger: Logger) -> Result<Self, ToolError> {
        if let Err(err) = config.validate() {
            logger.warn(
                "AAP configuration incomplete; tool calls will fail until it is fixed",
                Some(&serde_json::json!({"error": err.to_string()})),
            );
        } else {
            logger.info("AAP configuration loaded", Some(&config.describe()));
        }
        let clients = Arc::new(HttpClientFactory::new(Arc::new(config), logger.clone()));
        Self::with_clients(clients, logger)
    }

    pub fn with_clients(
        clients: Arc<dyn ClientFactory>,
        logger: Logger,
    ) -> Result<Self, ToolError> {
        let validation = Validation::new();

        let templates: Arc<dyn ToolHandler> = Arc::new(TemplateManager::new(
            logger.clone(),
            validation.clone(),
            clients.clone(),
        ));
        let jobs: Arc<dyn ToolHandler> = Arc::new(JobManager::new(
            logger.clone(),
            validation.clone(),
            clients.clone(),
        ));
        let inventory: Arc<dyn ToolHandler> = Arc::new(InventoryManager::new(
            logger.clone(),
            validation.clone(),
            clients.clone(),
        ));
        let organizations: Arc<dyn ToolHandler> =
            Arc::new(OrganizationManager::new(validation, clients.clone()));
        let connection: Arc<dyn ToolHandler> =
            Arc::new(ConnectionManager::new(logger.clone(), clients));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        let groups: [(&[&str], Arc<dyn ToolHandler>); 5] = [
            (TEMPLATE_TOOLS, templates),
            (JOB_TOOLS, jobs),
            (INVENTORY_TOOLS, inventory),
            (ORGANIZATION_TOOLS, organizations),
            (CONNECTION_TOOLS, connection),
        ];
        for (names, handler) in groups {
            for name in names {
                handlers.insert((*name).to_string(), handler.clone());
            }
        }

        Self::validate_tool_wiring(&handlers)?;
        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));

        Ok(Self {
            logger,
            tool_executor,
        })
    }
}
