//! Configuration types and builders.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Docker CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Path or name of the docker binary.
    pub binary: String,
    /// Directory where generated compose files are written before deployment.
    pub compose_workspace: PathBuf,
    /// Timeout applied to every docker command.
    pub command_timeout: Duration,
    /// Default number of log lines returned by the get-logs tool.
    pub default_log_tail: u32,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: "docker".into(),
            compose_workspace: env::temp_dir().join("docker-deploy-mcp"),
            command_timeout: Duration::from_secs(300),
            default_log_tail: 100,
        }
    }
}

/// Builder for DockerConfig with fluent API.
#[derive(Default)]
pub struct DockerConfigBuilder {
    config: DockerConfig,
}

impl DockerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.config.binary = binary.into();
        self
    }

    pub fn compose_workspace(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.compose_workspace = dir.into();
        self
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    pub fn default_log_tail(mut self, tail: u32) -> Self {
        self.config.default_log_tail = tail;
        self
    }

    /// Build from environment variables.
    pub fn from_env(mut self) -> Result<Self> {
        if let Ok(binary) = env::var("DOCKER_BINARY") {
            self.config.binary = binary;
        }

        if let Ok(dir) = env::var("DOCKER_COMPOSE_WORKSPACE") {
            self.config.compose_workspace = PathBuf::from(dir);
        }

        if let Ok(timeout) = env::var("DOCKER_COMMAND_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: "DOCKER_COMMAND_TIMEOUT_SECS".into(),
                message: "Invalid timeout value".into(),
            })?;
            self.config.command_timeout = Duration::from_secs(secs);
        }

        if let Ok(tail) = env::var("DOCKER_LOG_TAIL") {
            self.config.default_log_tail = tail.parse().unwrap_or(100);
        }

        Ok(self)
    }

    pub fn build(self) -> Result<DockerConfig> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<()> {
        if self.config.binary.is_empty() {
            return Err(ConfigError::MissingField("binary".into()).into());
        }
        if self.config.command_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "command_timeout".into(),
                message: "Timeout must be greater than 0".into(),
            }
            .into());
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub docker: DockerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "docker-mcp".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            docker: DockerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn docker(mut self, docker: DockerConfig) -> Self {
        self.config.docker = docker;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_config_builder() {
        let config = DockerConfigBuilder::new()
            .binary("podman")
            .command_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.binary, "podman");
        assert_eq!(config.command_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = DockerConfigBuilder::new()
            .command_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.name, "docker-mcp");
        assert_eq!(config.docker.binary, "docker");
    }
}
