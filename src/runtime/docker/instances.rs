use async_trait::async_trait;

use super::DockerRuntime;
use crate::ports::PublishedPorts;
use crate::runtime::error::RuntimeError;

fn parse_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl DockerRuntime {
    /// IDs of every container, running or stopped, whose name starts with the managed prefix.
    pub(crate) async fn try_list_managed(&self) -> Result<Vec<String>, RuntimeError> {
        let args = vec![
            "ps".to_string(),
            "-a".to_string(),
            "--filter".to_string(),
            format!("name=^{}", self.settings.name_prefix),
            "--format".to_string(),
            "{{.ID}}".to_string(),
        ];

        let output = self
            .runner
            .output(&self.executable(), &args, self.settings.command_timeout)
            .await?;

        if !output.success {
            return Err(RuntimeError::EngineOperation(format!("ps: {}", output.stderr.trim())));
        }

        Ok(parse_ids(&output.stdout))
    }

    /// Best-effort listing: any failure, including a missing engine, is an empty list.
    pub(crate) async fn list_managed(&self) -> Vec<String> {
        match self.try_list_managed().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Docker list managed containers error: {}", e);
                Vec::new()
            }
        }
    }

    /// Force-removes every managed container and returns how many were targeted.
    /// Individual removal failures are logged and skipped; the operation can simply be repeated.
    pub(crate) async fn clear_all(&self) -> usize {
        let container_ids = self.list_managed().await;

        for container_id in &container_ids {
            if let Err(e) = self.remove_container(container_id).await {
                warn!("Error removing container {}: {}", container_id, e);
            }
        }

        container_ids.len()
    }
}

#[async_trait]
impl PublishedPorts for DockerRuntime {
    async fn is_port_published(&self, port: u16) -> bool {
        let args = vec![
            "ps".to_string(),
            "--filter".to_string(),
            format!("publish={}", port),
            "--format".to_string(),
            "{{.ID}}".to_string(),
        ];

        match self
            .runner
            .output(&self.executable(), &args, self.settings.publish_check_timeout)
            .await
        {
            Ok(output) => output.success && !output.trimmed_stdout().is_empty(),
            Err(e) => {
                // an engine that cannot answer is not holding the port
                debug!("Docker publish check for port {} failed: {}", port, e);
                false
            }
        }
    }
}
