use crate::errors::ToolError;
use serde_json::{Map, Value};

/// Argument extraction for tool calls. Schema validation runs first, so these
/// mostly guard against values the schema admits but upstream would reject.
#[derive(Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_id(&self, args: &Value, label: &str) -> Result<i64, ToolError> {
        let value = args.get(label).filter(|v| !v.is_null()).ok_or_else(|| {
            ToolError::invalid_params(format!("{} is required", label))
        })?;
        self.parse_id(value, label)
    }

    pub fn optional_id(&self, args: &Value, label: &str) -> Result<Option<i64>, ToolError> {
        match args.get(label) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.parse_id(value, label).map(Some),
        }
    }

    fn parse_id(&self, value: &Value, label: &str) -> Result<i64, ToolError> {
        let numeric = value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be an integer", label)))?;
        if numeric < 1 {
            return Err(ToolError::invalid_params(format!(
                "{} must be a positive integer",
                label
            )));
        }
        Ok(numeric)
    }

    /// Filters such as `project_id` are passed through as text; numbers are
    /// accepted and stringified.
    pub fn optional_filter(&self, args: &Value, label: &str) -> Result<Option<String>, ToolError> {
        match args.get(label) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.trim().to_string()).filter(|t| !t.is_empty())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(ToolError::invalid_params(format!(
                "{} must be a string",
                label
            ))),
        }
    }

    pub fn optional_string(&self, args: &Value, label: &str) -> Result<Option<String>, ToolError> {
        match args.get(label) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(ToolError::invalid_params(format!(
                "{} must be a string",
                label
            ))),
        }
    }

    pub fn optional_object(
        &self,
        args: &Value,
        label: &str,
    ) -> Result<Option<Map<String, Value>>, ToolError> {
        match args.get(label) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map.clone())),
            Some(_) => Err(ToolError::invalid_params(format!(
                "{} must be an object",
                label
            ))),
        }
    }

    pub fn optional_id_list(
        &self,
        args: &Value,
        label: &str,
    ) -> Result<Option<Vec<i64>>, ToolError> {
        match args.get(label) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| self.parse_id(item, &format!("{}[{}]", label, idx)))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(ToolError::invalid_params(format!(
                "{} must be an array of integers",
                label
            ))),
        }
    }
}
