mod container;
mod executable;
mod health_check;
mod instances;
mod network;

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::config::Config;
use crate::ports::PortAllocator;
use crate::runtime::runtime::EngineCommand;

pub(crate) use health_check::EngineStatus;

/// Host operating system as far as container networking is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub(crate) fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Docker Desktop platforms, where the engine runs inside a VM.
    pub(crate) fn is_desktop(self) -> bool {
        matches!(self, Platform::Windows | Platform::MacOs)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DockerSettings {
    pub(crate) image: String,
    pub(crate) internal_port: u16,
    pub(crate) name_prefix: String,
    pub(crate) liveness_timeout: Duration,
    pub(crate) command_timeout: Duration,
    pub(crate) publish_check_timeout: Duration,
}

impl Default for DockerSettings {
    fn default() -> Self {
        DockerSettings {
            image: "vivekratnavel/omniboard".to_string(),
            internal_port: 9000,
            name_prefix: "omniboard_".to_string(),
            liveness_timeout: Duration::from_secs(8),
            command_timeout: Duration::from_secs(10),
            publish_check_timeout: Duration::from_secs(5),
        }
    }
}

impl DockerSettings {
    pub(crate) fn from_config(config: &Config) -> Self {
        DockerSettings {
            image: config.omniboard.image.clone(),
            internal_port: config.omniboard.internal_port,
            name_prefix: config.omniboard.name_prefix.clone(),
            liveness_timeout: Duration::from_secs(config.engine.liveness_timeout_secs),
            command_timeout: Duration::from_secs(config.engine.command_timeout_secs),
            publish_check_timeout: Duration::from_secs(config.engine.publish_check_timeout_secs),
        }
    }
}

/// Stateless gateway to the local Docker engine. Every call re-resolves the executable
/// and re-queries the engine.
pub(crate) struct DockerRuntime {
    runner: Arc<dyn EngineCommand>,
    platform: Platform,
    settings: DockerSettings,
    allocator: PortAllocator,
}

impl DockerRuntime {
    pub(crate) fn new(
        runner: Arc<dyn EngineCommand>,
        platform: Platform,
        settings: DockerSettings,
        allocator: PortAllocator,
    ) -> Self {
        DockerRuntime { runner, platform, settings, allocator }
    }

    pub(crate) fn executable(&self) -> PathBuf {
        executable::resolve_executable(self.platform)
    }
}
