use crate::errors::ToolError;
use crate::utils::suggest::suggest;

/// Raised when a manager is asked for a tool it was not registered for.
/// Only reachable through miswiring, but reported like any other error.
pub fn unhandled_tool_error(manager: &str, tool: &str, known_tools: &[&str]) -> ToolError {
    let known: Vec<String> = known_tools.iter().map(|s| s.to_string()).collect();
    let suggestions = suggest(tool, &known, 3);
    let mut hint = format!("{} handles: {}.", manager, known.join(", "));
    if !suggestions.is_empty() {
        hint = format!("Did you mean: {}? {}", suggestions.join(", "), hint);
    }
    ToolError::internal(format!("{} cannot handle tool: {}", manager, tool))
        .with_hint(hint)
        .with_details(serde_json::json!({
            "known_tools": known,
            "did_you_mean": suggestions,
        }))
}
