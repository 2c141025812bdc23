pub mod aap_client;
pub mod client_factory;
pub mod config;
pub mod logger;
pub mod tool_executor;
pub mod transport;
pub mod validation;
