use serde::Serialize;

use super::{DockerRuntime, Platform};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EngineStatus {
    pub(crate) executable: String,
    pub(crate) platform: Platform,
    pub(crate) running: bool,
    pub(crate) version: Option<String>,
}

impl DockerRuntime {
    async fn query(&self, args: &[&str]) -> Option<String> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        let output = self
            .runner
            .output(&self.executable(), &args, self.settings.liveness_timeout)
            .await;

        match output {
            Ok(output) if output.success && !output.trimmed_stdout().is_empty() => {
                Some(output.trimmed_stdout().to_string())
            }
            Ok(output) => {
                debug!("docker {} answered without a version: {}", args[0], output.stderr.trim());
                None
            }
            Err(e) => {
                debug!("docker {} failed: {}", args[0], e);
                None
            }
        }
    }

    /// Server version from `docker version`, falling back to `docker info`.
    pub(crate) async fn engine_version(&self) -> Option<String> {
        if let Some(version) = self.query(&["version", "--format", "{{.Server.Version}}"]).await {
            return Some(version);
        }

        self.query(&["info", "--format", "{{.ServerVersion}}"]).await
    }

    /// True when either liveness query returns output. Never errors.
    pub(crate) async fn is_running(&self) -> bool {
        self.engine_version().await.is_some()
    }

    pub(crate) async fn status(&self) -> EngineStatus {
        let version = self.engine_version().await;

        EngineStatus {
            executable: self.executable().display().to_string(),
            platform: self.platform,
            running: version.is_some(),
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::engine::{docker_runtime, ScriptedEngine};
    use crate::runtime::docker::Platform;

    #[tokio::test]
    async fn test_running_when_version_succeeds() {
        let engine = ScriptedEngine::running();
        let runtime = docker_runtime(engine.clone(), Platform::Linux);

        assert!(runtime.is_running().await);
        assert!(!engine.invoked("info"));
    }

    #[tokio::test]
    async fn test_running_when_only_info_succeeds() {
        let engine = ScriptedEngine::info_only();
        let runtime = docker_runtime(engine.clone(), Platform::Linux);

        assert!(runtime.is_running().await);
        assert!(engine.invoked("version"));
        assert!(engine.invoked("info"));
    }

    #[tokio::test]
    async fn test_not_running_when_both_fail() {
        let runtime = docker_runtime(ScriptedEngine::stopped(), Platform::Linux);
        assert!(!runtime.is_running().await);
    }

    #[tokio::test]
    async fn test_not_running_when_executable_missing() {
        let runtime = docker_runtime(ScriptedEngine::missing(), Platform::Windows);
        assert!(!runtime.is_running().await);
    }

    #[tokio::test]
    async fn test_status_reports_version() {
        let runtime = docker_runtime(ScriptedEngine::running(), Platform::MacOs);
        let status = runtime.status().await;

        assert!(status.running);
        assert_eq!(status.version.as_deref(), Some("25.0.3"));
        assert_eq!(status.platform, Platform::MacOs);
    }
}
