use crate::errors::ToolError;
use crate::services::client_factory::ClientFactory;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::render::{format_job_output, format_job_status};
use crate::utils::tool_errors::unhandled_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const JOB_TOOLS: &[&str] = &["get_job_status", "get_job_output"];

#[derive(Clone)]
pub struct JobManager {
    logger: Logger,
    validation: Validation,
    clients: Arc<dyn ClientFactory>,
}

impl JobManager {
    pub fn new(logger: Logger, validation: Validation, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            logger: logger.child("jobs"),
            validation,
            clients,
        }
    }

    async fn status(&self, args: &Value) -> Result<String, ToolError> {
        let job_id = self.validation.ensure_id(args, "job_id")?;
        let client = self.clients.open()?;
        let status = client.get_job_status(job_id).await?;
        self.logger.debug(
            "job status",
            Some(&serde_json::json!({"job_id": job_id, "status": status.status()})),
        );
        Ok(format_job_status(&status))
    }

    async fn output(&self, args: &Value) -> Result<String, ToolError> {
        let job_id = self.validation.ensure_id(args, "job_id")?;
        let client = self.clients.open()?;
        let output = client.get_job_stdout(job_id).await?;
        Ok(format_job_output(job_id, &output))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for JobManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        match tool {
            "get_job_status" => self.status(&args).await,
            "get_job_output" => self.output(&args).await,
            _ => Err(unhandled_tool_error("jobs", tool, JOB_TOOLS)),
        }
    }
}
