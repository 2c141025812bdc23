//! Typed projections of AAP controller resources.
//!
//! Records are built from a single API response and discarded after
//! formatting; nothing here is mutated after deserialization.

mod inventory;
mod job;
mod organization;
mod template;

pub use inventory::{Host, Inventory};
pub use job::{JobLaunch, JobStatus, JobStatusSummary, LaunchRequest};
pub use organization::{Organization, Project};
pub use template::JobTemplate;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Collection envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// AAP returns `""` for unset text fields; treat those as absent.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

/// Integer ids sometimes arrive as numeric strings; anything else is absent.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
