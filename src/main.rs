//! MCP server binary entry point.

use anyhow::Result;
use docker_deploy_mcp::{
    config::{DockerConfigBuilder, ServerConfig},
    protocol::McpServerBuilder,
    server::{McpHandler, ServerStateBuilder},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let docker_config = match DockerConfigBuilder::new().from_env().and_then(|b| b.build()) {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid docker configuration, using defaults: {}", e);
            DockerConfigBuilder::new().build()?
        }
    };

    let config = ServerConfig::builder()
        .name("docker-mcp")
        .docker(docker_config)
        .build();

    let state = Arc::new(ServerStateBuilder::new().config(config).build());

    info!(
        "Server state initialized with {} tools, {} resources, {} prompts",
        state.registry.tools.len(),
        state.registry.resources.len(),
        state.registry.prompts.len()
    );

    let handler = McpHandler::new(state);
    let server = McpServerBuilder::new()
        .handler(handler)
        .name("docker-mcp")
        .version(env!("CARGO_PKG_VERSION"))
        .build()?;

    info!("MCP server ready, waiting for connections...");

    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docker_deploy_mcp=info,warn"));

    // JSON format to stderr: stdout carries the MCP protocol.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .json()
        .init();
}
