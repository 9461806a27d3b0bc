//! Capability registries for resources, prompts, and tools.
//!
//! One registry per capability kind, grouped under [`CapabilityRegistry`] and
//! owned by the session state. Lookup is by exact name; `entries` preserves
//! registration order so discovery responses are stable.

use crate::error::{ProtocolResult, Result, ToolError};
use crate::protocol::{
    CallToolParams, CallToolResult, GetPromptResult, Prompt, ReadResourceResult, Resource, Tool,
};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Handler bound to a tool descriptor.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> Tool;
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;
}

/// Handler bound to a resource descriptor, keyed by URI.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn definition(&self) -> Resource;
    async fn read(&self) -> ProtocolResult<ReadResourceResult>;
}

/// Handler bound to a prompt descriptor.
#[async_trait]
pub trait PromptHandler: Send + Sync {
    fn definition(&self) -> Prompt;
    async fn render(
        &self,
        arguments: Option<HashMap<String, String>>,
    ) -> ProtocolResult<GetPromptResult>;
}

/// Name-keyed handler registry preserving registration order.
pub struct Registry<H: ?Sized> {
    order: RwLock<Vec<String>>,
    entries: DashMap<String, Arc<H>>,
}

impl<H: ?Sized> Registry<H> {
    pub fn new() -> Self {
        Self {
            order: RwLock::new(Vec::new()),
            entries: DashMap::new(),
        }
    }

    /// Add a handler under a name. Re-registering a name replaces the handler
    /// but keeps its original position in the listing order.
    pub fn insert(&self, name: impl Into<String>, handler: Arc<H>) {
        let name = name.into();
        debug!("Registering: {}", name);
        if self.entries.insert(name.clone(), handler).is_none() {
            self.order.write().push(name);
        }
    }

    /// Resolve a handler by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<H>> {
        self.entries.get(name).map(|r| Arc::clone(&*r))
    }

    /// All handlers in registration order.
    pub fn entries(&self) -> Vec<Arc<H>> {
        self.order
            .read()
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: ?Sized> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

pub type ToolRegistry = Registry<dyn ToolHandler>;
pub type ResourceRegistry = Registry<dyn ResourceHandler>;
pub type PromptRegistry = Registry<dyn PromptHandler>;

impl ToolRegistry {
    pub fn register<T: ToolHandler + 'static>(&self, tool: T) {
        let name = tool.definition().name;
        self.insert(name, Arc::new(tool));
    }

    /// Descriptor list in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.entries().iter().map(|t| t.definition()).collect()
    }

    /// Resolve and invoke a tool.
    ///
    /// Fails with `ToolError::NotFound` for unknown names and
    /// `ToolError::MissingArguments` when a tool declaring required
    /// parameters is called without an arguments payload. The caller decides
    /// how those failures are presented to the peer.
    pub async fn execute(&self, params: CallToolParams) -> Result<CallToolResult> {
        let tool = self
            .get(&params.name)
            .ok_or_else(|| ToolError::NotFound(params.name.clone()))?;

        let definition = tool.definition();
        if definition.requires_arguments() && arguments_absent(&params.arguments) {
            return Err(ToolError::MissingArguments.into());
        }

        tool.execute(params.arguments).await
    }
}

impl ResourceRegistry {
    pub fn register<R: ResourceHandler + 'static>(&self, resource: R) {
        let uri = resource.definition().uri;
        self.insert(uri, Arc::new(resource));
    }

    pub fn list(&self) -> Vec<Resource> {
        self.entries().iter().map(|r| r.definition()).collect()
    }
}

impl PromptRegistry {
    pub fn register<P: PromptHandler + 'static>(&self, prompt: P) {
        let name = prompt.definition().name;
        self.insert(name, Arc::new(prompt));
    }

    pub fn list(&self) -> Vec<Prompt> {
        self.entries().iter().map(|p| p.definition()).collect()
    }
}

fn arguments_absent(arguments: &Value) -> bool {
    match arguments {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// The three per-kind registries of a session.
#[derive(Default)]
pub struct CapabilityRegistry {
    pub resources: ResourceRegistry,
    pub prompts: PromptRegistry,
    pub tools: ToolRegistry,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}
