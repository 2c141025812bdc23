use crate::errors::ToolError;
use crate::models::LaunchRequest;
use crate::services::client_factory::ClientFactory;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::render::{format_launch, format_templates};
use crate::utils::tool_errors::unhandled_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const TEMPLATE_TOOLS: &[&str] = &["get_job_templates", "launch_job_template"];

#[derive(Clone)]
pub struct TemplateManager {
    logger: Logger,
    validation: Validation,
    clients: Arc<dyn ClientFactory>,
}

impl TemplateManager {
    pub fn new(logger: Logger, validation: Validation, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            logger: logger.child("templates"),
            validation,
            clients,
        }
    }

    async fn list(&self, args: &Value) -> Result<String, ToolError> {
        let project_id = self.validation.optional_filter(args, "project_id")?;
        let client = self.clients.open()?;
        let templates = client.get_job_templates(project_id.as_deref()).await?;
        Ok(format_templates(&templates))
    }

    async fn launch(&self, args: &Value) -> Result<String, ToolError> {
        let template_id = self.validation.ensure_id(args, "template_id")?;
        let request = LaunchRequest::new()
            .extra_vars(self.validation.optional_object(args, "extra_vars")?)
            .inventory(self.validation.optional_id(args, "inventory")?)
            .credentials(self.validation.optional_id_list(args, "credentials")?)
            .limit(self.validation.optional_string(args, "limit")?);

        let client = self.clients.open()?;
        let launch = client.launch_job_template(template_id, &request).await?;
        self.logger.info(
            "job launched",
            Some(&serde_json::json!({"template_id": template_id, "job": launch.job})),
        );
        Ok(format_launch(&launch))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for TemplateManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        match tool {
            "get_job_templates" => self.list(&args).await,
            "launch_job_template" => self.launch(&args).await,
            _ => Err(unhandled_tool_error("templates", tool, TEMPLATE_TOOLS)),
        }
    }
}
