use crate::errors::ToolError;
use crate::services::client_factory::ClientFactory;
use crate::services::validation::Validation;
use crate::utils::render::{format_organizations, format_projects};
use crate::utils::tool_errors::unhandled_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const ORGANIZATION_TOOLS: &[&str] = &["get_organizations", "get_projects"];

#[derive(Clone)]
pub struct OrganizationManager {
    validation: Validation,
    clients: Arc<dyn ClientFactory>,
}

impl OrganizationManager {
    pub fn new(validation: Validation, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            validation,
            clients,
        }
    }

    async fn organizations(&self) -> Result<String, ToolError> {
        let client = self.clients.open()?;
        Ok(format_organizations(&client.get_organizations().await?))
    }

    async fn projects(&self, args: &Value) -> Result<String, ToolError> {
        let organization_id = self.validation.optional_filter(args, "organization_id")?;
        let client = self.clients.open()?;
        let projects = client.get_projects(organization_id.as_deref()).await?;
        Ok(format_projects(&projects))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for OrganizationManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        match tool {
            "get_organizations" => self.organizations().await,
            "get_projects" => self.projects(&args).await,
            _ => Err(unhandled_tool_error("organizations", tool, ORGANIZATION_TOOLS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client_factory::testing::StaticFactory;
    use crate::services::tool_executor::ToolHandler;
    use crate::services::transport::testing::RoutedTransport;
    use serde_json::json;

    fn manager(transport: RoutedTransport) -> (OrganizationManager, Arc<StaticFactory>) {
        let factory = Arc::new(StaticFactory::new(transport));
        (
            OrganizationManager::new(Validation::new(), factory.clone()),
            factory,
        )
    }

    #[tokio::test]
    async fn organizations_render_or_report_empty() {
        let (manager, _) = manager(RoutedTransport::new().route(
            "/api/controller/v2/organizations/",
            200,
            r#"{"count": 0, "results": []}"#,
        ));
        assert_eq!(
            manager
                .handle("get_organizations", json!({}))
                .await
                .expect("text"),
            "No organizations found."
        );
    }

    #[tokio::test]
    async fn projects_pass_organization_filter() {
        let body = json!({"results": [
            {"id": 3, "name": "Infra", "organization": 2, "scm_type": "git",
             "scm_url": "https://git.example.com/infra.git", "scm_branch": "main",
             "status": "successful"}
        ]});
        let (manager, factory) = manager(RoutedTransport::new().route(
            "/api/controller/v2/projects/",
            200,
            body.to_string(),
        ));
        let text = manager
            .handle("get_projects", json!({"organization_id": "2"}))
            .await
            .expect("text");
        assert!(text.starts_with("Found 1 project:"));
        assert!(text.contains("   🌐 SCM URL: https://git.example.com/infra.git\n"));
        assert_eq!(
            factory.transport.recorded()[0].query_value("organization"),
            Some("2")
        );
    }
}
