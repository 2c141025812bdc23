use thiserror::Error;

/// Failures raised by the AAP client.
#[derive(Debug, Clone, Error)]
pub enum AapError {
    #[error("{0}")]
    Config(String),

    /// The final attempt of a request failed. `status` is absent for
    /// transport-level failures (connect, timeout, TLS).
    #[error(
        "AAP API request failed after {} {}: {}",
        .attempts,
        attempt_noun(*.attempts),
        describe_failure(*.status, .message)
    )]
    Request {
        attempts: u32,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to decode AAP response: {0}")]
    Decode(String),
}

impl AapError {
    pub fn missing_credentials() -> Self {
        AapError::Config("AAP_URL and AAP_TOKEN must be configured".to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AapError::Request { status, .. } => *status,
            _ => None,
        }
    }
}

fn attempt_noun(attempts: u32) -> &'static str {
    if attempts == 1 {
        "attempt"
    } else {
        "attempts"
    }
}

fn describe_failure(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("{} - {}", code, message),
        None => message.to_string(),
    }
}
