//! Command-line entry points.
//!
//! - `serve` (default): MCP server over stdio
//! - `check`: validate configuration and test the controller connection
//! - `tools`: print the tool catalog as JSON

use crate::app::App;
use crate::errors::ToolError;
use crate::mcp::catalog::tool_catalog;
use crate::mcp::server::run_stdio;
use crate::services::client_factory::{ClientFactory, HttpClientFactory};
use crate::services::config::AapConfig;
use crate::services::logger::{LogLevel, Logger};
use crate::utils::render::format_connection_test;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "aap-mcp")]
#[command(about = "MCP tool server for Ansible Automation Platform")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log verbosity (error, warn, info, debug); overrides AAP_MCP_LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve tools over stdio (default if no subcommand given)
    Serve,

    /// Validate configuration and test the controller connection
    Check,

    /// Print the tool catalog as JSON
    Tools,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Seeds the process environment. A missing default `.env` is fine; an
    /// explicit `--env-file` must load.
    pub fn load_env(&self) -> Result<(), String> {
        match &self.env_file {
            Some(path) => dotenvy::from_path(path)
                .map(|_| ())
                .map_err(|err| format!("failed to load {}: {}", path.display(), err)),
            None => {
                let _ = dotenvy::dotenv();
                Ok(())
            }
        }
    }

    pub fn logger(&self) -> Logger {
        let logger = Logger::new("aap-mcp");
        if let Some(level) = self.log_level {
            logger.set_level(level);
        }
        logger
    }
}

pub async fn run_serve(config: AapConfig, logger: Logger) -> Result<(), ToolError> {
    let app = App::initialize(config, logger)?;
    run_stdio(Arc::new(app)).await
}

/// Prints the connection verdict; `Ok(false)` means the controller was unreachable.
pub async fn run_check(config: AapConfig, logger: Logger) -> Result<bool, ToolError> {
    let factory = HttpClientFactory::new(Arc::new(config), logger);
    let client = factory.open()?;
    let connected = client.test_connection().await;
    println!("{}", format_connection_test(connected, factory.config()));
    Ok(connected)
}

pub fn run_tools() -> Result<(), ToolError> {
    let rendered = serde_json::to_string_pretty(tool_catalog())
        .map_err(|err| ToolError::internal(err.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
