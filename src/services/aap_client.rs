use crate::constants::{api, limits, retry};
use crate::errors::AapError;
use crate::models::{
    Host, Inventory, JobLaunch, JobStatus, JobTemplate, LaunchRequest, Organization, Page, Project,
};
use crate::services::config::AapConfig;
use crate::services::logger::Logger;
use crate::services::transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, Sleeper, TokioSleeper,
};
use crate::utils::text::preview;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Delay before retrying after the zero-based `attempt` failed: `2^attempt`
/// seconds, no jitter, no cap.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(retry::BACKOFF_BASE_SECS.saturating_pow(attempt))
}

pub fn api_path(endpoint: &str) -> String {
    format!("{}/{}", api::BASE_PATH, endpoint.trim_start_matches('/'))
}

enum Decode {
    Json,
    Text,
}

/// Client for one AAP controller. Cheap to build; the dispatcher opens a
/// fresh one per tool call.
#[derive(Clone)]
pub struct AapClient {
    config: Arc<AapConfig>,
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    logger: Logger,
}

impl AapClient {
    pub fn new(config: Arc<AapConfig>, logger: Logger) -> Result<Self, AapError> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(
            config,
            transport,
            Arc::new(TokioSleeper),
            logger,
        ))
    }

    /// Skips validation; callers supply their own transport.
    pub fn with_transport(
        config: Arc<AapConfig>,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
        logger: Logger,
    ) -> Self {
        Self {
            config,
            transport,
            sleeper,
            logger: logger.child("client"),
        }
    }

    pub fn config(&self) -> &AapConfig {
        &self.config
    }

    async fn execute(&self, request: HttpRequest, decode: Decode) -> Result<Value, AapError> {
        let attempts = self.config.attempts();
        let mut attempt = 0u32;

        loop {
            let outcome = match self.transport.send(request.clone()).await {
                Ok(response) => self.decode(response, &decode),
                Err(message) => Err((None, message)),
            };

            let (status, message) = match outcome {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            if attempt + 1 >= attempts {
                self.logger.error(
                    "AAP request failed",
                    Some(&serde_json::json!({
                        "method": request.method.as_str(),
                        "path": request.path,
                        "attempts": attempts,
                        "status": status,
                        "body": preview(&message, limits::LOG_BODY_PREVIEW_BYTES),
                    })),
                );
                return Err(AapError::Request {
                    attempts,
                    status,
                    message,
                });
            }

            let delay = backoff_delay(attempt);
            self.logger.warn(
                "AAP request retry",
                Some(&serde_json::json!({
                    "method": request.method.as_str(),
                    "path": request.path,
                    "attempt": attempt + 1,
                    "status": status,
                    "delay_secs": delay.as_secs(),
                })),
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    fn decode(
        &self,
        response: HttpResponse,
        decode: &Decode,
    ) -> Result<Value, (Option<u16>, String)> {
        if !response.is_success() {
            return Err((Some(response.status), response.body));
        }
        match decode {
            Decode::Text => Ok(Value::String(response.body)),
            Decode::Json => serde_json::from_str(&response.body)
                .map_err(|err| (None, format!("invalid JSON in response: {}", err))),
        }
    }

    pub async fn request_json(&self, request: HttpRequest) -> Result<Value, AapError> {
        self.logger.debug(
            "request",
            Some(&serde_json::json!({"method": request.method.as_str(), "path": request.path})),
        );
        self.execute(request, Decode::Json).await
    }

    pub async fn request_text(&self, request: HttpRequest) -> Result<String, AapError> {
        self.logger.debug(
            "request (text)",
            Some(&serde_json::json!({"method": request.method.as_str(), "path": request.path})),
        );
        match self.execute(request, Decode::Text).await? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    async fn get<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, AapError> {
        let value = self.request_json(request).await?;
        serde_json::from_value(value).map_err(|err| AapError::Decode(err.to_string()))
    }

    fn list_request(endpoint: &str) -> HttpRequest {
        HttpRequest::new(Method::GET, api_path(endpoint)).query("page_size", api::PAGE_SIZE)
    }

    pub async fn get_job_templates(
        &self,
        project_id: Option<&str>,
    ) -> Result<Vec<JobTemplate>, AapError> {
        let mut request = Self::list_request("job_templates/");
        if let Some(project) = project_id.map(str::trim).filter(|p| !p.is_empty()) {
            request = request.query("project", project);
        }
        let page: Page<JobTemplate> = self.get(request).await?;
        Ok(page.results)
    }

    pub async fn get_job_template(&self, template_id: i64) -> Result<JobTemplate, AapError> {
        let path = api_path(&format!("job_templates/{}/", template_id));
        self.get(HttpRequest::new(Method::GET, path)).await
    }

    pub async fn launch_job_template(
        &self,
        template_id: i64,
        launch: &LaunchRequest,
    ) -> Result<JobLaunch, AapError> {
        let path = api_path(&format!("job_templates/{}/launch/", template_id));
        let request = HttpRequest::new(Method::POST, path).json(launch.to_body());
        self.get(request).await
    }

    pub async fn get_job_status(&self, job_id: i64) -> Result<JobStatus, AapError> {
        let path = api_path(&format!("jobs/{}/", job_id));
        self.get(HttpRequest::new(Method::GET, path)).await
    }

    /// Plain-text log; `format=txt` asks upstream for the text rendering.
    pub async fn get_job_stdout(&self, job_id: i64) -> Result<String, AapError> {
        let path = api_path(&format!("jobs/{}/stdout/", job_id));
        self.request_text(HttpRequest::new(Method::GET, path).query("format", "txt"))
            .await
    }

    /// True only when `me/` answers successfully. The failure reason is
    /// logged and dropped.
    pub async fn test_connection(&self) -> bool {
        match self
            .request_json(HttpRequest::new(Method::GET, api_path("me/")))
            .await
        {
            Ok(_) => true,
            Err(err) => {
                self.logger.warn(
                    "connection test failed",
                    Some(&serde_json::json!({"error": err.to_string()})),
                );
                false
            }
        }
    }

    /// One inventories request plus one hosts request per inventory, issued
    /// sequentially.
    pub async fn get_inventories(
        &self,
        organization_id: Option<&str>,
    ) -> Result<Vec<Inventory>, AapError> {
        let mut request = Self::list_request("inventories/");
        if let Some(org) = organization_id.map(str::trim).filter(|o| !o.is_empty()) {
            request = request.query("organization", org);
        }
        let page: Page<Inventory> = self.get(request).await?;

        let mut inventories = Vec::with_capacity(page.results.len());
        for mut inventory in page.results {
            let hosts: Page<Host> = self
                .get(Self::list_request(&format!(
                    "inventories/{}/hosts/",
                    inventory.id
                )))
                .await?;
            inventory.hosts = hosts.results;
            inventories.push(inventory);
        }
        Ok(inventories)
    }

    pub async fn get_organizations(&self) -> Result<Vec<Organization>, AapError> {
        let page: Page<Organization> = self.get(Self::list_request("organizations/")).await?;
        Ok(page.results)
    }

    pub async fn get_projects(
        &self,
        organization_id: Option<&str>,
    ) -> Result<Vec<Project>, AapError> {
        let mut request = Self::list_request("projects/");
        if let Some(org) = organization_id.map(str::trim).filter(|o| !o.is_empty()) {
            request = request.query("organization", org);
        }
        let page: Page<Project> = self.get(request).await?;
        Ok(page.results)
    }
}
