use crate::constants::{env as env_keys, network, retry};
use crate::errors::AapError;
use crate::utils::feature_flags::is_truthy;
use crate::utils::redact::mask_secret;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Connection settings for one AAP controller, loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AapConfig {
    pub url: String,
    pub token: String,
    pub project_id: Option<String>,
    pub verify_ssl: bool,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl AapConfig {
    /// Builds a config with defaults for everything but the credentials.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self, AapError> {
        let config = Self::unchecked(url.into(), token.into());
        config.validate()?;
        Ok(config)
    }

    fn unchecked(url: String, token: String) -> Self {
        Self {
            url,
            token,
            project_id: None,
            verify_ssl: true,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            max_retries: retry::DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into()).filter(|id: &String| !id.trim().is_empty());
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Reads the `AAP_*` variables. Missing credentials are kept as empty
    /// strings so the failure surfaces when a client is constructed.
    pub fn from_env() -> Result<Self, AapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::unchecked(
            read(env_keys::URL).unwrap_or_default(),
            read(env_keys::TOKEN).unwrap_or_default(),
        );
        config.project_id = read(env_keys::PROJECT_ID);
        if let Some(raw) = read(env_keys::VERIFY_SSL) {
            config.verify_ssl = is_truthy(raw);
        }
        if let Some(raw) = read(env_keys::TIMEOUT) {
            config.timeout_secs = parse_number(env_keys::TIMEOUT, &raw)?;
        }
        if let Some(raw) = read(env_keys::MAX_RETRIES) {
            config.max_retries = parse_number(env_keys::MAX_RETRIES, &raw)?;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AapError> {
        if self.url.trim().is_empty() || self.token.trim().is_empty() {
            return Err(AapError::missing_credentials());
        }
        Url::parse(self.url.trim()).map_err(|err| {
            AapError::Config(format!("AAP_URL is not a valid URL ({}): {}", err, self.url))
        })?;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry budget, never below one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Log-safe view: the token is masked.
    pub fn describe(&self) -> Value {
        serde_json::json!({
            "url": self.url,
            "token": mask_secret(&self.token),
            "project_id": self.project_id,
            "verify_ssl": self.verify_ssl,
            "timeout_secs": self.timeout_secs,
            "max_retries": self.max_retries,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AapError> {
    raw.parse::<T>().map_err(|_| {
        AapError::Config(format!(
            "{} must be a non-negative integer, got '{}'",
            key, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn new_keeps_supplied_values_and_defaults() {
        let config = AapConfig::new("https://aap.example.com", "test-token")
            .expect("config")
            .with_project_id("123");
        assert_eq!(config.url, "https://aap.example.com");
        assert_eq!(config.token, "test-token");
        assert_eq!(config.project_id.as_deref(), Some("123"));
        assert!(config.verify_ssl);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn timeout_builder_sets_request_deadline() {
        let config = AapConfig::new("https://aap.example.com", "test-token")
            .expect("config")
            .with_timeout_secs(5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn new_rejects_missing_credentials() {
        for (url, token) in [("", "token"), ("https://aap.example.com", ""), ("", "")] {
            let err = AapConfig::new(url, token).expect_err("must fail");
            assert!(matches!(err, AapError::Config(_)));
            assert_eq!(err.to_string(), "AAP_URL and AAP_TOKEN must be configured");
        }
    }

    #[test]
    fn new_rejects_unparseable_url() {
        let err = AapConfig::new("not a url", "token").expect_err("must fail");
        assert!(err.to_string().contains("AAP_URL is not a valid URL"));
    }

    #[test]
    fn from_lookup_reads_all_settings() {
        let config = AapConfig::from_lookup(lookup(&[
            ("AAP_URL", "https://aap.example.com"),
            ("AAP_TOKEN", "test-token"),
            ("AAP_PROJECT_ID", "123"),
            ("AAP_VERIFY_SSL", "False"),
            ("AAP_TIMEOUT", "60"),
            ("AAP_MAX_RETRIES", "5"),
        ]))
        .expect("config");
        assert_eq!(config.url, "https://aap.example.com");
        assert_eq!(config.token, "test-token");
        assert_eq!(config.project_id.as_deref(), Some("123"));
        assert!(!config.verify_ssl);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 5);
        assert!(config.is_complete());
    }

    #[test]
    fn from_lookup_defers_missing_credentials_to_validate() {
        let config = AapConfig::from_lookup(lookup(&[])).expect("loads");
        assert!(!config.is_complete());
        assert!(config.project_id.is_none());
        assert!(config.verify_ssl);
    }

    #[test]
    fn from_lookup_rejects_bad_numbers() {
        let err = AapConfig::from_lookup(lookup(&[("AAP_TIMEOUT", "soon")])).expect_err("fails");
        assert!(err.to_string().contains("AAP_TIMEOUT"));
    }

    #[test]
    fn attempts_never_drop_below_one() {
        let config = AapConfig::new("https://aap.example.com", "t")
            .expect("config")
            .with_max_retries(0);
        assert_eq!(config.attempts(), 1);
    }

    #[test]
    fn describe_masks_the_token() {
        let config = AapConfig::new("https://aap.example.com", "abcdefghijklmnop").expect("config");
        let described = config.describe();
        assert_eq!(described["token"], "********...mnop");
    }
}
