use uuid::Uuid;

use super::network::connection_argument;
use super::{DockerRuntime, DockerSettings};
use crate::models::connection::ContainerTarget;
use crate::runtime::error::RuntimeError;

pub(crate) fn tiny_id() -> String {
    Uuid::new_v4().simple().to_string().chars().take(8).collect()
}

/// Arguments of a detached, self-removing `docker run` publishing the host port on loopback only.
pub(crate) fn build_run_args(
    settings: &DockerSettings,
    container_name: &str,
    host_port: u16,
    flag: &str,
    value: String,
) -> Vec<String> {
    vec![
        "run".to_string(),
        "-d".to_string(),
        "--rm".to_string(),
        "-p".to_string(),
        format!("127.0.0.1:{}:{}", host_port, settings.internal_port),
        "--name".to_string(),
        container_name.to_string(),
        settings.image.clone(),
        flag.to_string(),
        value,
    ]
}

impl DockerRuntime {
    /// Starts an Omniboard container for `database_name` and returns its name and host port.
    ///
    /// Liveness is checked first, then a port is allocated, then `docker run` is spawned.
    /// The container is not awaited: Omniboard usually needs a few seconds before it answers.
    pub(crate) async fn launch(
        &self,
        database_name: &str,
        target: &ContainerTarget,
        host_port: Option<u16>,
    ) -> Result<(String, u16), RuntimeError> {
        if !self.is_running().await {
            return Err(RuntimeError::EngineUnavailable(
                "Docker does not appear to be running. Please start Docker Desktop (or the Docker daemon) and try again."
                    .to_string(),
            ));
        }

        let host_port = match host_port {
            Some(port) => port,
            None => {
                let preferred = self.allocator.preferred_port(database_name);
                self.allocator.find_available(preferred, self).await?
            }
        };

        let (flag, value) = connection_argument(self.platform, target);
        let container_name = format!("{}{}", self.settings.name_prefix, tiny_id());
        let args = build_run_args(&self.settings, &container_name, host_port, flag, value);

        info!("Launching {} for database {} on port {}", container_name, database_name, host_port);

        self.runner.spawn(&self.executable(), &args).await.map_err(|e| {
            error!("Docker failed to start {}: {}", container_name, e);
            e
        })?;

        Ok((container_name, host_port))
    }

    pub(crate) async fn remove_container(&self, container_id: &str) -> Result<(), RuntimeError> {
        let args = vec!["rm".to_string(), "-f".to_string(), container_id.to_string()];
        let output = self
            .runner
            .output(&self.executable(), &args, self.settings.command_timeout)
            .await?;

        if output.success {
            info!("Container {} removed successfully", container_id);
            Ok(())
        } else {
            Err(RuntimeError::EngineOperation(format!(
                "rm -f {}: {}",
                container_id,
                output.stderr.trim()
            )))
        }
    }
}
