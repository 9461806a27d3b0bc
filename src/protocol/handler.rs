//! Request handler contract and method dispatcher.

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::types::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Handler trait for processing MCP requests.
///
/// Implementations provide the business logic behind each capability kind;
/// the dispatcher owns routing, decoding, and error encoding.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle initialize request.
    async fn initialize(&self, params: InitializeParams) -> ProtocolResult<InitializeResult>;

    /// Handle initialized notification.
    async fn initialized(&self) -> ProtocolResult<()>;

    /// Handle shutdown request.
    async fn shutdown(&self) -> ProtocolResult<()>;

    /// List available resources.
    async fn list_resources(&self) -> ProtocolResult<ListResourcesResult>;

    /// Read a resource by URI.
    async fn read_resource(&self, params: ReadResourceParams) -> ProtocolResult<ReadResourceResult>;

    /// List available prompts.
    async fn list_prompts(&self) -> ProtocolResult<ListPromptsResult>;

    /// Render a prompt with the supplied arguments.
    async fn get_prompt(&self, params: GetPromptParams) -> ProtocolResult<GetPromptResult>;

    /// List available tools.
    async fn list_tools(&self) -> ProtocolResult<ListToolsResult>;

    /// Call a tool.
    async fn call_tool(&self, params: CallToolParams) -> ProtocolResult<CallToolResult>;

    /// Handle ping request.
    async fn ping(&self) -> ProtocolResult<Value> {
        Ok(serde_json::json!({}))
    }
}

/// Method dispatcher that routes requests to appropriate handlers.
pub struct Dispatcher<H: Handler> {
    handler: Arc<H>,
}

impl<H: Handler> Dispatcher<H> {
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Dispatch a request to the appropriate handler method.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Dispatching request: {}", request.method);

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params).await,
            "initialized" => self.handle_initialized().await,
            "shutdown" => self.handle_shutdown().await,
            "ping" => self.handler.ping().await,
            "resources/list" => to_value(self.handler.list_resources().await),
            "resources/read" => match decode_params::<ReadResourceParams>(request.params) {
                Ok(params) => to_value(self.handler.read_resource(params).await),
                Err(e) => Err(e),
            },
            "prompts/list" => to_value(self.handler.list_prompts().await),
            "prompts/get" => match decode_params::<GetPromptParams>(request.params) {
                Ok(params) => to_value(self.handler.get_prompt(params).await),
                Err(e) => Err(e),
            },
            "tools/list" => to_value(self.handler.list_tools().await),
            "tools/call" => match decode_params::<CallToolParams>(request.params) {
                Ok(params) => to_value(self.handler.call_tool(params).await),
                Err(e) => Err(e),
            },
            method => {
                warn!("Unknown method: {}", method);
                Err(ProtocolError::MethodNotFound(method.to_string()))
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => {
                error!("Request failed: {}", e);
                JsonRpcResponse::error(request.id, JsonRpcError::new(e.code(), e.to_string()))
            }
        }
    }

    async fn handle_initialize(&self, params: Option<Value>) -> ProtocolResult<Value> {
        let params: InitializeParams = decode_params(params)?;
        to_value(self.handler.initialize(params).await)
    }

    async fn handle_initialized(&self) -> ProtocolResult<Value> {
        self.handler.initialized().await?;
        Ok(Value::Null)
    }

    async fn handle_shutdown(&self) -> ProtocolResult<Value> {
        self.handler.shutdown().await?;
        Ok(Value::Null)
    }
}

/// Decode request params, rejecting absent or malformed payloads.
fn decode_params<T: DeserializeOwned>(params: Option<Value>) -> ProtocolResult<T> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| ProtocolError::InvalidParams(e.to_string().into()))?
        .ok_or_else(|| ProtocolError::InvalidParams("Missing params".into()))
}

/// Encode a handler result as a JSON value.
fn to_value<T: serde::Serialize>(result: ProtocolResult<T>) -> ProtocolResult<Value> {
    let value = result?;
    serde_json::to_value(value).map_err(|e| ProtocolError::InternalError(e.to_string().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockHandler {
        initialized: AtomicBool,
    }

    impl MockHandler {
        fn new() -> Self {
            Self {
                initialized: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl Handler for MockHandler {
        async fn initialize(&self, _params: InitializeParams) -> ProtocolResult<InitializeResult> {
            self.initialized.store(true, Ordering::SeqCst);
            Ok(InitializeResult {
                protocol_version: MCP_VERSION.into(),
                capabilities: ServerCapabilities::default(),
                server_info: ServerInfo {
                    name: "test".into(),
                    version: "1.0".into(),
                },
                instructions: None,
            })
        }

        async fn initialized(&self) -> ProtocolResult<()> {
            Ok(())
        }

        async fn shutdown(&self) -> ProtocolResult<()> {
            Ok(())
        }

        async fn list_resources(&self) -> ProtocolResult<ListResourcesResult> {
            Ok(ListResourcesResult {
                resources: vec![],
                next_cursor: None,
            })
        }

        async fn read_resource(
            &self,
            params: ReadResourceParams,
        ) -> ProtocolResult<ReadResourceResult> {
            Err(ProtocolError::InvalidParams(
                format!("Resource not found: {}", params.uri).into(),
            ))
        }

        async fn list_prompts(&self) -> ProtocolResult<ListPromptsResult> {
            Ok(ListPromptsResult {
                prompts: vec![],
                next_cursor: None,
            })
        }

        async fn get_prompt(&self, params: GetPromptParams) -> ProtocolResult<GetPromptResult> {
            Err(ProtocolError::InvalidParams(
                format!("Unknown prompt: {}", params.name).into(),
            ))
        }

        async fn list_tools(&self) -> ProtocolResult<ListToolsResult> {
            Ok(ListToolsResult {
                tools: vec![],
                next_cursor: None,
            })
        }

        async fn call_tool(&self, _params: CallToolParams) -> ProtocolResult<CallToolResult> {
            Ok(CallToolResult::text("test"))
        }
    }

    #[tokio::test]
    async fn test_dispatcher_initialize() {
        let handler = Arc::new(MockHandler::new());
        let dispatcher = Dispatcher::new(handler.clone());

        let request = JsonRpcRequest::new("initialize")
            .with_id(1)
            .with_params(serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {
                    "name": "test-client",
                    "version": "1.0"
                }
            }));

        let response = dispatcher.dispatch(request).await;
        assert!(response.result.is_some());
        assert!(response.error.is_none());
        assert!(handler.initialized.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dispatcher_unknown_method() {
        let handler = Arc::new(MockHandler::new());
        let dispatcher = Dispatcher::new(handler);

        let request = JsonRpcRequest::new("unknown/method").with_id(1);
        let response = dispatcher.dispatch(request).await;

        assert!(response.result.is_none());
        assert!(response.error.is_some());
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_dispatcher_read_resource_missing_params() {
        let handler = Arc::new(MockHandler::new());
        let dispatcher = Dispatcher::new(handler);

        let request = JsonRpcRequest::new("resources/read").with_id(1);
        let response = dispatcher.dispatch(request).await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_dispatcher_unknown_prompt_is_protocol_error() {
        let handler = Arc::new(MockHandler::new());
        let dispatcher = Dispatcher::new(handler);

        let request = JsonRpcRequest::new("prompts/get")
            .with_id(1)
            .with_params(serde_json::json!({"name": "nope"}));
        let response = dispatcher.dispatch(request).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("Unknown prompt: nope"));
    }
}
