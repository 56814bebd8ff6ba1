//! TMB Calculator
//!
//! An MCP server for BMR and TDEE estimation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use tmb::build_info;
use tmb::config::ServerConfig;
use tmb::mcp::TmbService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tmb=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = ServerConfig::from_env();
    tracing::info!(
        default_unit_system = config.default_unit_system.as_str(),
        "configuration loaded"
    );

    let service = TmbService::new(config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
