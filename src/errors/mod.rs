mod aap_error;
mod mcp_error;
mod tool_error;

pub use aap_error::AapError;
pub use mcp_error::{ErrorCode, McpError};
pub use tool_error::{ToolError, ToolErrorKind};
