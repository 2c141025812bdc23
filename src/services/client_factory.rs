use crate::errors::AapError;
use crate::services::aap_client::AapClient;
use crate::services::config::AapConfig;
use crate::services::logger::Logger;
use std::sync::Arc;

/// Opens a client for a single tool call. Construction is where missing
/// credentials surface, so every call re-checks the config.
pub trait ClientFactory: Send + Sync {
    fn open(&self) -> Result<AapClient, AapError>;

    fn config(&self) -> &AapConfig;
}

#[derive(Clone)]
pub struct HttpClientFactory {
    config: Arc<AapConfig>,
    logger: Logger,
}

impl HttpClientFactory {
    pub fn new(config: Arc<AapConfig>, logger: Logger) -> Self {
        Self { config, logger }
    }
}

impl ClientFactory for HttpClientFactory {
    fn open(&self) -> Result<AapClient, AapError> {
        AapClient::new(self.config.clone(), self.logger.clone())
    }

    fn config(&self) -> &AapConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::services::logger::LogLevel;
    use crate::services::transport::testing::{NoSleep, RoutedTransport};

    /// Hands out clients wired to one shared in-process transport.
    pub struct StaticFactory {
        pub config: Arc<AapConfig>,
        pub transport: Arc<RoutedTransport>,
    }

    impl StaticFactory {
        pub fn new(transport: RoutedTransport) -> Self {
            let config = AapConfig::new("https://aap.example.com", "token")
                .expect("config")
                .with_max_retries(1);
            Self {
                config: Arc::new(config),
                transport: Arc::new(transport),
            }
        }

        pub fn with_config(mut self, config: AapConfig) -> Self {
            self.config = Arc::new(config);
            self
        }
    }

    impl ClientFactory for StaticFactory {
        fn open(&self) -> Result<AapClient, AapError> {
            self.config.validate()?;
            Ok(AapClient::with_transport(
                self.config.clone(),
                self.transport.clone(),
                Arc::new(NoSleep),
                Logger::with_level("test", LogLevel::Error),
            ))
        }

        fn config(&self) -> &AapConfig {
            &self.config
        }
    }
}
