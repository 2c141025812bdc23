use super::lenient_id;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub project: i64,
    pub playbook: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub inventory: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub credential: Option<i64>,
    #[serde(default, deserialize_with = "extra_vars_map")]
    pub extra_vars: Option<Map<String, Value>>,
    #[serde(default)]
    pub survey_enabled: bool,
}

/// Upstream sends `extra_vars` as text: `""` means no variables. A JSON
/// object (inline or encoded as a string) becomes the map; any other text,
/// such as YAML, is left absent.
fn extra_vars_map<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Object(map)) => Some(map),
        Some(Value::String(text)) => parse_vars_text(&text),
        _ => None,
    })
}

fn parse_vars_text(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
