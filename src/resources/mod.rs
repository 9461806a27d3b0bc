//! Resource definitions: compose templates and deployment documentation.

pub mod templates;

use crate::error::ProtocolResult;
use crate::protocol::{ReadResourceResult, Resource, ResourceContent};
use crate::registry::{ResourceHandler, ResourceRegistry};
use async_trait::async_trait;

/// A resource with fixed content, registered at startup.
pub struct StaticResource {
    definition: Resource,
    content: String,
}

impl StaticResource {
    pub fn new(definition: Resource, content: impl Into<String>) -> Self {
        Self {
            definition,
            content: content.into(),
        }
    }
}

#[async_trait]
impl ResourceHandler for StaticResource {
    fn definition(&self) -> Resource {
        self.definition.clone()
    }

    async fn read(&self) -> ProtocolResult<ReadResourceResult> {
        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: self.definition.uri.clone(),
                mime_type: self.definition.mime_type.clone(),
                text: Some(self.content.clone()),
                blob: None,
            }],
        })
    }
}

/// Create and register all built-in resources.
pub fn create_registry() -> ResourceRegistry {
    let registry = ResourceRegistry::new();

    registry.register(StaticResource::new(
        Resource {
            uri: "docker://templates/compose/web-stack.yml".into(),
            name: "web-stack-template".into(),
            description: Some(
                "Basic web application stack template with nginx and backend service".into(),
            ),
            mime_type: Some("text/x-yaml".into()),
        },
        templates::WEB_STACK_TEMPLATE,
    ));
    registry.register(StaticResource::new(
        Resource {
            uri: "docker://templates/compose/database.yml".into(),
            name: "database-template".into(),
            description: Some("Database service template with volume persistence".into()),
            mime_type: Some("text/x-yaml".into()),
        },
        templates::DATABASE_TEMPLATE,
    ));
    registry.register(StaticResource::new(
        Resource {
            uri: "docker://templates/container/nginx.json".into(),
            name: "nginx-config".into(),
            description: Some("Nginx container configuration template".into()),
            mime_type: Some("application/json".into()),
        },
        templates::NGINX_CONFIG,
    ));
    registry.register(StaticResource::new(
        Resource {
            uri: "docker://docs/deployment-guide.md".into(),
            name: "deployment-guide".into(),
            description: Some("Best practices for Docker deployments".into()),
            mime_type: Some("text/markdown".into()),
        },
        templates::DEPLOYMENT_GUIDE,
    ));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = create_registry();
        let names: Vec<String> = registry.list().into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "web-stack-template",
                "database-template",
                "nginx-config",
                "deployment-guide"
            ]
        );
    }

    #[tokio::test]
    async fn test_read_round_trip() {
        let registry = ResourceRegistry::new();
        let content = "services:\n  app:\n    image: app:1.0\n";
        registry.register(StaticResource::new(
            Resource {
                uri: "docker://templates/test.yml".into(),
                name: "test".into(),
                description: None,
                mime_type: Some("text/x-yaml".into()),
            },
            content,
        ));

        let resource = registry.get("docker://templates/test.yml").unwrap();
        let result = resource.read().await.unwrap();
        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].text.as_deref(), Some(content));
    }
}
