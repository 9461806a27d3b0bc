//! MCP request handler implementation.

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::{
    CallToolParams, CallToolResult, GetPromptParams, GetPromptResult, Handler, InitializeParams,
    InitializeResult, ListPromptsResult, ListResourcesResult, ListToolsResult, MCP_VERSION,
    PromptsCapability, ReadResourceParams, ReadResourceResult, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::server::state::ServerState;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// MCP request handler that processes protocol messages.
pub struct McpHandler {
    state: Arc<ServerState>,
}

impl McpHandler {
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }
}

#[async_trait]
impl Handler for McpHandler {
    async fn initialize(&self, params: InitializeParams) -> ProtocolResult<InitializeResult> {
        info!(
            "Initialize request from {} v{}",
            params.client_info.name, params.client_info.version
        );
        debug!("Client capabilities: {:?}", params.capabilities);

        self.state.set_initialized(params.client_info);

        // Advertise only the capability kinds that have registrations.
        let registry = &self.state.registry;
        let capabilities = ServerCapabilities {
            tools: (!registry.tools.is_empty()).then(|| ToolsCapability {
                list_changed: Some(false),
            }),
            resources: (!registry.resources.is_empty()).then(|| ResourcesCapability {
                subscribe: Some(false),
                list_changed: Some(false),
            }),
            prompts: (!registry.prompts.is_empty()).then(|| PromptsCapability {
                list_changed: Some(false),
            }),
        };

        let tool_names: Vec<String> = registry.tools.list().into_iter().map(|t| t.name).collect();
        let instructions = format!(
            "Docker MCP Server for container and compose stack management. \
            Available tools: {}. Resources expose compose templates and a \
            deployment guide under the docker:// scheme.",
            tool_names.join(", ")
        );

        Ok(InitializeResult {
            protocol_version: MCP_VERSION.into(),
            capabilities,
            server_info: ServerInfo {
                name: self.state.config.name.to_string(),
                version: self.state.config.version.to_string(),
            },
            instructions: Some(instructions),
        })
    }

    async fn initialized(&self) -> ProtocolResult<()> {
        info!("Server initialized successfully");
        Ok(())
    }

    async fn shutdown(&self) -> ProtocolResult<()> {
        info!("Shutdown request received");
        Ok(())
    }

    async fn list_resources(&self) -> ProtocolResult<ListResourcesResult> {
        let resources = self.state.registry.resources.list();
        debug!("Listing {} resources", resources.len());

        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        params: ReadResourceParams,
    ) -> ProtocolResult<ReadResourceResult> {
        debug!("Resource read: {}", params.uri);

        let resource = self.state.registry.resources.get(&params.uri).ok_or_else(|| {
            ProtocolError::InvalidParams(format!("Resource not found: {}", params.uri).into())
        })?;

        resource.read().await
    }

    async fn list_prompts(&self) -> ProtocolResult<ListPromptsResult> {
        let prompts = self.state.registry.prompts.list();
        debug!("Listing {} prompts", prompts.len());

        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
        })
    }

    async fn get_prompt(&self, params: GetPromptParams) -> ProtocolResult<GetPromptResult> {
        debug!("Prompt get: {}", params.name);

        let prompt = self.state.registry.prompts.get(&params.name).ok_or_else(|| {
            ProtocolError::InvalidParams(format!("Unknown prompt: {}", params.name).into())
        })?;

        prompt.render(params.arguments).await
    }

    async fn list_tools(&self) -> ProtocolResult<ListToolsResult> {
        let tools = self.state.registry.tools.list();
        debug!("Listing {} tools", tools.len());

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(&self, params: CallToolParams) -> ProtocolResult<CallToolResult> {
        debug!("Tool call: {}", params.name);
        self.state.record_request();

        // Every tool failure, including unknown names and missing arguments,
        // is downgraded to a text content item echoing the arguments. The
        // session never ends because a tool call failed; the caller reads
        // the error and retries.
        let arguments = params.arguments.clone();
        match self.state.registry.tools.execute(params).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("Tool execution error: {}", e);
                Ok(CallToolResult::error(format!(
                    "Error: {} | Arguments: {}",
                    e, arguments
                )))
            }
        }
    }
}
