//! MCP tool definitions.

pub mod compose;
pub mod container;
pub mod logs;

pub use compose::DeployComposeTool;
pub use container::{CreateContainerTool, ListContainersTool};
pub use logs::GetLogsTool;

use crate::docker::DockerCli;
use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Create and register all tools.
pub fn create_registry(docker: Arc<DockerCli>) -> ToolRegistry {
    let registry = ToolRegistry::new();

    registry.register(CreateContainerTool::new(Arc::clone(&docker)));
    registry.register(DeployComposeTool::new(Arc::clone(&docker)));
    registry.register(GetLogsTool::new(Arc::clone(&docker)));
    registry.register(ListContainersTool::new(docker));

    registry
}
