//! Tools: create-container, list-containers

use crate::docker::{DockerCli, RunContainerSpec};
use crate::error::{Result, ToolError};
use crate::protocol::{CallToolResult, Tool};
use crate::registry::ToolHandler;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

pub struct CreateContainerTool {
    docker: Arc<DockerCli>,
}

impl CreateContainerTool {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ToolHandler for CreateContainerTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "create-container".into(),
            description: Some("Create a new standalone Docker container".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "image": {"type": "string"},
                    "name": {"type": "string"},
                    "ports": {
                        "type": "object",
                        "additionalProperties": {"type": "string"}
                    },
                    "environment": {
                        "type": "object",
                        "additionalProperties": {"type": "string"}
                    }
                },
                "required": ["image"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "create-container"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let spec: RunContainerSpec = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let container_id = self.docker.run_container(&spec).await?;

        Ok(CallToolResult::text(format!(
            "Created container '{}' (id: {})",
            spec.name.as_deref().unwrap_or(&spec.image),
            container_id
        )))
    }
}

pub struct ListContainersTool {
    docker: Arc<DockerCli>,
}

impl ListContainersTool {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ToolHandler for ListContainersTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list-containers".into(),
            description: Some("List all Docker containers".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    #[instrument(skip(self, _arguments), fields(tool = "list-containers"))]
    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let listing = self.docker.list_containers().await?;

        if listing.is_empty() {
            Ok(CallToolResult::text("No containers found."))
        } else {
            Ok(CallToolResult::text(listing))
        }
    }
}
