//! Server state management.

use crate::config::ServerConfig;
use crate::docker::DockerCli;
use crate::protocol::ClientInfo;
use crate::registry::CapabilityRegistry;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared session state: the capability registries plus negotiation status.
///
/// Constructed once at startup and handed to the handler; the registries are
/// not mutated after that.
pub struct ServerState {
    pub config: ServerConfig,
    pub registry: CapabilityRegistry,
    pub docker: Arc<DockerCli>,
    initialized: AtomicBool,
    client_info: RwLock<Option<ClientInfo>>,
    request_count: AtomicU64,
}

impl ServerState {
    pub fn new(config: ServerConfig, registry: CapabilityRegistry, docker: Arc<DockerCli>) -> Self {
        Self {
            config,
            registry,
            docker,
            initialized: AtomicBool::new(false),
            client_info: RwLock::new(None),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn set_initialized(&self, client_info: ClientInfo) {
        *self.client_info.write() = Some(client_info);
        self.initialized.store(true, Ordering::SeqCst);
    }

    pub fn client_info(&self) -> Option<ClientInfo> {
        self.client_info.read().clone()
    }

    pub fn record_request(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }
}

pub struct ServerStateBuilder {
    config: Option<ServerConfig>,
    docker: Option<Arc<DockerCli>>,
    registry: Option<CapabilityRegistry>,
}

impl ServerStateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            docker: None,
            registry: None,
        }
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn docker(mut self, docker: Arc<DockerCli>) -> Self {
        self.docker = Some(docker);
        self
    }

    /// Override the default registries, mainly for tests.
    pub fn registry(mut self, registry: CapabilityRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> ServerState {
        let config = self.config.unwrap_or_default();
        let docker = self
            .docker
            .unwrap_or_else(|| Arc::new(DockerCli::new(config.docker.clone())));

        let registry = self.registry.unwrap_or_else(|| CapabilityRegistry {
            resources: crate::resources::create_registry(),
            prompts: crate::prompts::create_registry(),
            tools: crate::tools::create_registry(Arc::clone(&docker)),
        });

        ServerState::new(config, registry, docker)
    }
}

impl Default for ServerStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
