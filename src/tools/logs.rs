//! Tool: get-logs

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
pub struct GetLogsArgs {
    pub container_name: String,
    #[serde(default)]
    pub tail: Option<u32>,
}

pub struct GetLogsTool {
    docker: Arc<DockerCli>,
}

impl GetLogsTool {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ToolHandler for GetLogsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "get-logs".into(),
            description: Some("Retrieve the latest logs for a specified Docker container".into()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "container_name": {"type": "string"},
                    "tail": {
                        "type": "integer",
                        "description": "Number of log lines to return"
                    }
                },
                "required": ["container_name"]
            }),
        }
    }

    #[instrument(skip(self, arguments), fields(tool = "get-logs"))]
    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetLogsArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let tail = args
            .tail
            .unwrap_or(self.docker.config().default_log_tail);
        let logs = self.docker.container_logs(&args.container_name, tail).await?;

        if logs.is_empty() {
            Ok(CallToolResult::text(format!(
                "No log output for container '{}'",
                args.container_name
            )))
        } else {
            Ok(CallToolResult::text(logs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockerConfig;

    #[test]
    fn test_definition() {
        let tool = GetLogsTool::new(Arc::new(DockerCli::new(DockerConfig::default())));
        let definition = tool.definition();
        assert_eq!(definition.name, "get-logs");
        assert!(definition.requires_arguments());
    }

    #[tokio::test]
    async fn test_missing_container_name_rejected() {
        let tool = GetLogsTool::new(Arc::new(DockerCli::new(DockerConfig::default())));
        let result = tool.execute(serde_json::json!({"tail": 10})).await;
        assert!(result.is_err());
    }
}
