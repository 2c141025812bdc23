use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `job_templates/<id>/launch/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobLaunch {
    pub job: i64,
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ignored_fields: Map<String, Value>,
    #[serde(default)]
    pub related: Map<String, Value>,
    #[serde(default)]
    pub summary_fields: Map<String, Value>,
}

/// Launch body. Unset fields are skipped entirely: upstream treats a present
/// but empty field differently from an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaunchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_vars: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl LaunchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty maps count as "not supplied".
    pub fn extra_vars(mut self, vars: Option<Map<String, Value>>) -> Self {
        self.extra_vars = vars.filter(|m| !m.is_empty());
        self
    }

    pub fn inventory(mut self, inventory: Option<i64>) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn credentials(mut self, credentials: Option<Vec<i64>>) -> Self {
        self.credentials = credentials.filter(|c| !c.is_empty());
        self
    }

    pub fn limit(mut self, limit: Option<String>) -> Self {
        self.limit = limit
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// Full upstream job record. Kept open because the controller adds fields
/// between releases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct JobStatus(pub Map<String, Value>);

impl JobStatus {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    pub fn summary(&self) -> JobStatusSummary {
        let pick = |key: &str| self.get(key).cloned().unwrap_or(Value::Null);
        JobStatusSummary {
            id: pick("id"),
            name: pick("name"),
            status: pick("status"),
            failed: pick("failed"),
            started: pick("started"),
            finished: pick("finished"),
            elapsed: pick("elapsed"),
            job_template: pick("job_template"),
            playbook: pick("playbook"),
        }
    }
}

/// The subset of a job record shown to callers; missing keys stay `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatusSummary {
    pub id: Value,
    pub name: Value,
    pub status: Value,
    pub failed: Value,
    pub started: Value,
    pub finished: Value,
    pub elapsed: Value,
    pub job_template: Value,
    pub playbook: Value,
}
