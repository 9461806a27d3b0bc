//! MCP server with session lifecycle management.

use crate::error::{McpError, ProtocolError, Result};
use crate::protocol::handler::{Dispatcher, Handler};
use crate::protocol::transport::{StdioTransport, Transport};
use crate::protocol::types::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Server state enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Server created but not initialized.
    Created,
    /// Initialize request received, awaiting initialized notification.
    Initializing,
    /// Server is fully operational.
    Running,
    /// Shutdown requested.
    ShuttingDown,
    /// Server has stopped.
    Stopped,
}

/// MCP Server.
///
/// Processes one request at a time, in arrival order; a new message is not
/// read from the transport until the previous response has been written.
pub struct McpServer<H: Handler> {
    info: ServerInfo,
    handler: Arc<H>,
    state: Arc<RwLock<ServerState>>,
    running: AtomicBool,
}

impl<H: Handler> McpServer<H> {
    /// Create a new MCP server.
    pub fn new(handler: H, info: ServerInfo) -> Self {
        Self {
            info,
            handler: Arc::new(handler),
            state: Arc::new(RwLock::new(ServerState::Created)),
            running: AtomicBool::new(false),
        }
    }

    /// Get current server state.
    pub async fn state(&self) -> ServerState {
        *self.state.read().await
    }

    /// Check if server is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run the server with stdio transport.
    #[instrument(skip(self), fields(server = %self.info.name))]
    pub async fn run(self) -> Result<()> {
        let transport = Arc::new(StdioTransport::new());
        self.run_with_transport(transport).await
    }

    /// Run the server with a custom transport.
    pub async fn run_with_transport<T: Transport + 'static>(self, transport: Arc<T>) -> Result<()> {
        info!(
            "Starting MCP server: {} v{}",
            self.info.name, self.info.version
        );
        self.running.store(true, Ordering::SeqCst);

        let dispatcher = Dispatcher::new(Arc::clone(&self.handler));
        let server = Arc::new(self);

        loop {
            if !server.running.load(Ordering::SeqCst) {
                info!("Server stopping...");
                break;
            }

            // Race the next message against termination signals. An in-flight
            // request always completes: dispatch happens outside the select.
            let read = tokio::select! {
                _ = shutdown_signal() => {
                    info!("Termination signal received, shutting down");
                    *server.state.write().await = ServerState::ShuttingDown;
                    break;
                }
                read = transport.read_message() => read,
            };

            let message = match read {
                Ok(Some(msg)) => msg,
                Ok(None) => {
                    debug!("EOF received, shutting down");
                    break;
                }
                Err(McpError::Protocol(ProtocolError::ParseError)) => {
                    let response = JsonRpcResponse::error(None, JsonRpcError::parse_error());
                    if let Err(e) = transport.write_response(&response).await {
                        error!("Failed to send error response: {}", e);
                    }
                    continue;
                }
                Err(e) => {
                    error!("Transport error: {}", e);
                    break;
                }
            };

            match message {
                Message::Request(request) => {
                    let is_notification = request.is_notification();
                    let method = request.method.clone();

                    // Requests before the initialize exchange are rejected
                    // without touching a handler.
                    if let Some(error) = server.check_sequencing(&method).await {
                        warn!("Out-of-order request: {}", method);
                        if !is_notification {
                            let response = JsonRpcResponse::error(request.id, error);
                            if let Err(e) = transport.write_response(&response).await {
                                error!("Failed to send response: {}", e);
                            }
                        }
                        continue;
                    }

                    server.update_state_for_method(&method).await;

                    let response = dispatcher.dispatch(request).await;

                    if !is_notification {
                        if let Err(e) = transport.write_response(&response).await {
                            error!("Failed to send response: {}", e);
                        }
                    }

                    if method == "shutdown" {
                        info!("Shutdown request received");
                        server.running.store(false, Ordering::SeqCst);
                    }
                }
                Message::Response(response) => {
                    // We don't expect responses in server mode, but log them
                    warn!("Unexpected response received: {:?}", response.id);
                }
            }
        }

        *server.state.write().await = ServerState::Stopped;
        info!("Server stopped");
        Ok(())
    }

    /// Reject requests that arrive out of sequence.
    async fn check_sequencing(&self, method: &str) -> Option<JsonRpcError> {
        let state = *self.state.read().await;
        match (state, method) {
            (ServerState::Created, "initialize" | "ping") => None,
            (ServerState::Created, _) => Some(JsonRpcError::not_initialized()),
            (_, "initialize") => {
                let e = ProtocolError::AlreadyInitialized;
                Some(JsonRpcError::new(e.code(), e.to_string()))
            }
            _ => None,
        }
    }

    /// Update server state based on the method being processed.
    async fn update_state_for_method(&self, method: &str) {
        let mut state = self.state.write().await;
        match method {
            "initialize" => {
                if *state == ServerState::Created {
                    *state = ServerState::Initializing;
                }
            }
            "initialized" => {
                if *state == ServerState::Initializing {
                    *state = ServerState::Running;
                    info!("Server initialized and running");
                }
            }
            "shutdown" => {
                *state = ServerState::ShuttingDown;
            }
            _ => {
                // First non-init request after the exchange starts serving.
                if *state == ServerState::Initializing {
                    *state = ServerState::Running;
                }
            }
        }
    }

    /// Stop the server.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Builder for MCP Server.
pub struct McpServerBuilder<H: Handler> {
    handler: Option<H>,
    name: String,
    version: String,
}

impl<H: Handler> McpServerBuilder<H> {
    pub fn new() -> Self {
        Self {
            handler: None,
            name: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }

    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn build(self) -> Result<McpServer<H>> {
        let handler = self.handler.ok_or_else(|| McpError::Internal {
            message: "Handler is required".into(),
        })?;

        Ok(McpServer::new(
            handler,
            ServerInfo {
                name: self.name,
                version: self.version,
            },
        ))
    }
}

impl<H: Handler> Default for McpServerBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolResult;
    use async_trait::async_trait;
    use tokio::sync::{Mutex, mpsc};

    struct TestHandler;

    #[async_trait]
    impl Handler for TestHandler {
        async fn initialize(&self, _params: InitializeParams) -> ProtocolResult<InitializeResult> {
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

    struct ChannelTransport {
        incoming: Mutex<mpsc::UnboundedReceiver<Message>>,
        outgoing: mpsc::UnboundedSender<JsonRpcResponse>,
    }

    #[async_trait]
    impl Transport for ChannelTransport {
        async fn read_message(&self) -> crate::error::Result<Option<Message>> {
            Ok(self.incoming.lock().await.recv().await)
        }

        async fn write_message(&self, _message: &Message) -> crate::error::Result<()> {
            Ok(())
        }

        async fn write_response(&self, response: &JsonRpcResponse) -> crate::error::Result<()> {
            self.outgoing
                .send(response.clone())
                .map_err(|_| McpError::Internal {
                    message: "response channel closed".into(),
                })
        }
    }

    fn initialize_request(id: i64) -> JsonRpcRequest {
        JsonRpcRequest::new("initialize")
            .with_id(id)
            .with_params(serde_json::json!({
                "protocolVersion": MCP_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0"}
            }))
    }

    #[test]
    fn test_server_builder() {
        let server = McpServerBuilder::new()
            .handler(TestHandler)
            .name("test-server")
            .version("0.1.0")
            .build()
            .unwrap();

        assert_eq!(server.info.name, "test-server");
        assert_eq!(server.info.version, "0.1.0");
    }

    #[tokio::test]
    async fn test_server_state() {
        let server = McpServerBuilder::new()
            .handler(TestHandler)
            .build()
            .unwrap();

        assert_eq!(server.state().await, ServerState::Created);
    }

    #[tokio::test]
    async fn test_requests_rejected_before_initialize() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport {
            incoming: Mutex::new(rx),
            outgoing: out_tx,
        });

        let server = McpServerBuilder::new()
            .handler(TestHandler)
            .build()
            .unwrap();
        let task = tokio::spawn(server.run_with_transport(transport));

        // Request before negotiation is rejected without reaching a handler.
        tx.send(Message::Request(
            JsonRpcRequest::new("tools/list").with_id(1),
        ))
        .unwrap();
        let response = out_rx.recv().await.unwrap();
        assert_eq!(response.error.unwrap().code, -32002);

        // Negotiation succeeds and the same request is now served.
        tx.send(Message::Request(initialize_request(2))).unwrap();
        let response = out_rx.recv().await.unwrap();
        assert!(response.error.is_none());

        tx.send(Message::Request(
            JsonRpcRequest::new("tools/list").with_id(3),
        ))
        .unwrap();
        let response = out_rx.recv().await.unwrap();
        assert!(response.error.is_none());

        drop(tx);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_request_stops_server() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport {
            incoming: Mutex::new(rx),
            outgoing: out_tx,
        });

        let server = McpServerBuilder::new()
            .handler(TestHandler)
            .build()
            .unwrap();
        let task = tokio::spawn(server.run_with_transport(transport));

        tx.send(Message::Request(initialize_request(1))).unwrap();
        out_rx.recv().await.unwrap();

        tx.send(Message::Request(
            JsonRpcRequest::new("shutdown").with_id(2),
        ))
        .unwrap();
        let response = out_rx.recv().await.unwrap();
        assert!(response.error.is_none());

        task.await.unwrap().unwrap();
    }
}
