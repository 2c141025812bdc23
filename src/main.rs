use aap_mcp::cli::{run_check, run_serve, run_tools, Cli, Command};
use aap_mcp::services::config::AapConfig;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.load_env() {
        eprintln!("aap-mcp: {}", err);
        std::process::exit(1);
    }
    let logger = cli.logger();

    let config = match AapConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("aap-mcp: {}", err);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command() {
        Command::Serve => run_serve(config, logger).await.map(|_| true),
        Command::Check => run_check(config, logger).await,
        Command::Tools => run_tools().map(|_| true),
    };
    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("aap-mcp: {}", err);
            std::process::exit(1);
        }
    }
}
