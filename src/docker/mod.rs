//! Docker CLI wrapper.
//!
//! Shells out to the `docker` binary with a per-command timeout. Everything
//! here is opaque handler-internal work from the protocol core's point of
//! view; failures surface as [`DockerError`] and end up wrapped into tool
//! result text by the caller.

use crate::config::DockerConfig;
use crate::error::{DockerError, DockerResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::process::Output;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument};

/// Container creation parameters for `docker run`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunContainerSpec {
    pub image: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Host port -> container port.
    #[serde(default)]
    pub ports: BTreeMap<String, String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// Thin client over the docker CLI.
pub struct DockerCli {
    config: DockerConfig,
}

impl DockerCli {
    pub fn new(config: DockerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DockerConfig {
        &self.config
    }

    /// Start a detached container. Returns the container id printed by docker.
    #[instrument(skip(self, spec), fields(image = %spec.image))]
    pub async fn run_container(&self, spec: &RunContainerSpec) -> DockerResult<String> {
        let mut args = vec!["run".to_string(), "-d".to_string()];

        if let Some(name) = &spec.name {
            args.push("--name".into());
            args.push(name.clone());
        }
        for (host, container) in &spec.ports {
            args.push("-p".into());
            args.push(format!("{}:{}", host, container));
        }
        for (key, value) in &spec.environment {
            args.push("-e".into());
            args.push(format!("{}={}", key, value));
        }
        args.push(spec.image.clone());

        self.run(&args).await
    }

    /// Deploy a compose stack: the YAML is written to the configured
    /// workspace and brought up detached under the given project name.
    #[instrument(skip(self, compose_yaml), fields(project = %project_name))]
    pub async fn deploy_compose(
        &self,
        project_name: &str,
        compose_yaml: &str,
    ) -> DockerResult<String> {
        tokio::fs::create_dir_all(&self.config.compose_workspace).await?;
        let compose_file = self
            .config
            .compose_workspace
            .join(format!("{}.yml", project_name));
        tokio::fs::write(&compose_file, compose_yaml).await?;
        debug!("Wrote compose file: {}", compose_file.display());

        let args = vec![
            "compose".to_string(),
            "-p".to_string(),
            project_name.to_string(),
            "-f".to_string(),
            compose_file.display().to_string(),
            "up".to_string(),
            "-d".to_string(),
        ];

        self.run(&args).await
    }

    /// Fetch the last `tail` log lines of a container.
    #[instrument(skip(self))]
    pub async fn container_logs(&self, container_name: &str, tail: u32) -> DockerResult<String> {
        let args = vec![
            "logs".to_string(),
            "--tail".to_string(),
            tail.to_string(),
            container_name.to_string(),
        ];

        self.run(&args).await
    }

    /// List all containers, one per line.
    #[instrument(skip(self))]
    pub async fn list_containers(&self) -> DockerResult<String> {
        let args = vec![
            "ps".to_string(),
            "-a".to_string(),
            "--format".to_string(),
            "{{.ID}}\t{{.Names}}\t{{.Image}}\t{{.Status}}".to_string(),
        ];

        self.run(&args).await
    }

    /// Run a docker command, enforcing the configured timeout and a zero
    /// exit status. Returns trimmed stdout.
    async fn run(&self, args: &[String]) -> DockerResult<String> {
        debug!("Running: {} {}", self.config.binary, args.join(" "));

        let output: Output = timeout(
            self.config.command_timeout,
            Command::new(&self.config.binary).args(args).output(),
        )
        .await
        .map_err(|_| DockerError::Timeout(self.config.command_timeout.as_secs()))?
        .map_err(|e| DockerError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(DockerError::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        // docker logs writes to both streams; include stderr so the caller
        // sees the full output.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stdout.trim().is_empty() && !stderr.trim().is_empty() {
            Ok(stderr.trim().to_string())
        } else {
            Ok(stdout.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_container_spec_deserialization() {
        let spec: RunContainerSpec = serde_json::from_value(serde_json::json!({
            "image": "nginx:latest",
            "name": "web-server",
            "ports": {"80": "80"},
            "environment": {"NGINX_HOST": "localhost"}
        }))
        .unwrap();

        assert_eq!(spec.image, "nginx:latest");
        assert_eq!(spec.name.as_deref(), Some("web-server"));
        assert_eq!(spec.ports.get("80").map(String::as_str), Some("80"));
    }

    #[test]
    fn test_spec_only_requires_image() {
        let spec: RunContainerSpec =
            serde_json::from_value(serde_json::json!({"image": "redis:7"})).unwrap();
        assert!(spec.name.is_none());
        assert!(spec.ports.is_empty());
        assert!(spec.environment.is_empty());
    }
}
