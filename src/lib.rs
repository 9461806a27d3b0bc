//! MCP server for Docker container and compose stack deployment.
//!
//! Exposes compose templates as resources, a deployment prompt, and tools
//! for creating containers, deploying compose stacks, and reading logs.
//!
//! # Example
//!
//! ```no_run
//! use docker_deploy_mcp::{
//!     config::ServerConfig,
//!     protocol::McpServerBuilder,
//!     server::{McpHandler, ServerStateBuilder},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = Arc::new(
//!         ServerStateBuilder::new()
//!             .config(ServerConfig::default())
//!             .build(),
//!     );
//!
//!     let handler = McpHandler::new(state);
//!     let server = McpServerBuilder::new().handler(handler).build()?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod docker;
pub mod error;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::{DockerConfig, DockerConfigBuilder, ServerConfig};
pub use docker::{DockerCli, RunContainerSpec};
pub use error::{McpError, Result};
pub use protocol::{McpServer, McpServerBuilder};
pub use registry::{
    CapabilityRegistry, PromptHandler, PromptRegistry, ResourceHandler, ResourceRegistry,
    ToolHandler, ToolRegistry,
};
pub use server::{McpHandler, ServerState, ServerStateBuilder};
