//! Tool: deploy-compose

use crate::docker::DockerCli;
use crate::error::{Result, ToolError};
use crate::protocol::{CallToolResult, Tool};
use crate::registry::ToolHandler;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct DeployComposeArgs {
    pub compose_yaml: String,
    pub project_name: String,
}

pub struct DeployComposeTool {
    docker: Arc<DockerCli>,
}

impl DeployComposeTool {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ToolHandler for DeployComposeTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "deploy-compose".into(),
            description: Some("Deploy a Docker Compose stack".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "compose_yaml": {"type": "string"},
                    "project_name": {"type": "string"}
                },
                "required": ["compose_yaml", "project_name"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "deploy-compose"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: DeployComposeArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if args.project_name.is_empty() {
            return Err(ToolError::MissingArgument("project_name".into()).into());
        }

        let output = self
            .docker
            .deploy_compose(&args.project_name, &args.compose_yaml)
            .await?;

        Ok(CallToolResult::text(format!(
            "Deployed compose stack '{}'\n{}",
            args.project_name, output
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockerConfig;

    #[test]
    fn test_definition_declares_required_fields() {
        let tool = DeployComposeTool::new(Arc::new(DockerCli::new(DockerConfig::default())));
        let definition = tool.definition();
        let required = definition.input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_project_name_rejected() {
        let tool = DeployComposeTool::new(Arc::new(DockerCli::new(DockerConfig::default())));
        let result = tool
            .execute(serde_json::json!({
                "compose_yaml": "services: {}",
                "project_name": ""
            }))
            .await;
        assert!(result.is_err());
    }
}
