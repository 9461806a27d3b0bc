//! Prompt definitions.

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::{GetPromptResult, Prompt, PromptArgument, PromptMessage, Role};
use crate::registry::{PromptHandler, PromptRegistry};
use async_trait::async_trait;
use std::collections::HashMap;

const DEPLOY_STACK_SYSTEM: &str = "You are a Docker deployment specialist. Generate appropriate \
    Docker Compose YAML or container configurations based on user requirements. For simple \
    single-container deployments, use the create-container tool. For multi-container deployments, \
    generate a docker-compose.yml and use the deploy-compose tool. To access logs, first use the \
    list-containers tool to discover running containers, then use the get-logs tool to retrieve \
    logs for a specific container.";

/// Prompt guiding stack generation and deployment.
pub struct DeployStackPrompt;

#[async_trait]
impl PromptHandler for DeployStackPrompt {
    fn definition(&self) -> Prompt {
        Prompt {
            name: "deploy-stack".into(),
            description: Some("Generate and deploy a Docker stack based on requirements".into()),
            arguments: Some(vec![
                PromptArgument {
                    name: "requirements".into(),
                    description: Some("Description of the desired Docker stack".into()),
                    required: Some(true),
                },
                PromptArgument {
                    name: "project_name".into(),
                    description: Some("Name for the Docker Compose project".into()),
                    required: Some(true),
                },
            ]),
        }
    }

    async fn render(
        &self,
        arguments: Option<HashMap<String, String>>,
    ) -> ProtocolResult<GetPromptResult> {
        let arguments = arguments.unwrap_or_default();
        let (Some(requirements), Some(project_name)) = (
            arguments.get("requirements"),
            arguments.get("project_name"),
        ) else {
            return Err(ProtocolError::InvalidParams(
                "Missing required arguments".into(),
            ));
        };

        let user_message = format!(
            "Please help me deploy the following stack:\n\
            Requirements: {requirements}\n\
            Project name: {project_name}\n\n\
            Analyze if this needs a single container or multiple containers. Then:\n\
            1. For single container: Use the create-container tool with format:\n\
            {{\n\
                \"image\": \"image-name\",\n\
                \"name\": \"container-name\",\n\
                \"ports\": {{\"80\": \"80\"}},\n\
                \"environment\": {{\"ENV_VAR\": \"value\"}}\n\
            }}\n\n\
            2. For multiple containers: Use the deploy-compose tool with format:\n\
            {{\n\
                \"project_name\": \"example-stack\",\n\
                \"compose_yaml\": \"version: '3.8'\\nservices:\\n  service1:\\n    \
            image: image1:latest\\n    ports:\\n      - '8080:80'\"\n\
            }}"
        );

        Ok(GetPromptResult {
            description: Some("Generate and deploy a Docker stack".into()),
            messages: vec![
                PromptMessage::new(Role::System, DEPLOY_STACK_SYSTEM),
                PromptMessage::new(Role::User, user_message),
            ],
        })
    }
}

/// Create and register all built-in prompts.
pub fn create_registry() -> PromptRegistry {
    let registry = PromptRegistry::new();
    registry.register(DeployStackPrompt);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_with_arguments() {
        let prompt = DeployStackPrompt;
        let mut arguments = HashMap::new();
        arguments.insert("requirements".to_string(), "nginx with redis".to_string());
        arguments.insert("project_name".to_string(), "my-stack".to_string());

        let result = prompt.render(Some(arguments)).await.unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].role, Role::System);
        assert_eq!(result.messages[1].role, Role::User);
        let user_text = result.messages[1].content.as_text().unwrap();
        assert!(user_text.contains("nginx with redis"));
        assert!(user_text.contains("my-stack"));
    }

    #[tokio::test]
    async fn test_render_missing_arguments() {
        let prompt = DeployStackPrompt;
        let err = prompt.render(None).await.unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_render_partial_arguments() {
        let prompt = DeployStackPrompt;
        let mut arguments = HashMap::new();
        arguments.insert("requirements".to_string(), "just nginx".to_string());

        let result = prompt.render(Some(arguments)).await;
        assert!(result.is_err());
    }
}
