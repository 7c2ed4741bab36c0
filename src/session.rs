use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::config::Config;
use crate::models::connection::LaunchRequest;
use crate::models::instances::{Instance, InstanceRegistry};
use crate::mongo::catalog::MongoCatalog;
use crate::mongo::resolver::MongoResolver;
use crate::ports::PortAllocator;
use crate::runtime::docker::{DockerRuntime, DockerSettings, Platform};
use crate::runtime::runtime::ProcessRunner;
use crate::runtime::RuntimeError;

#[derive(Debug)]
pub(crate) enum LaunchError {
    InvalidRequest(String),
    Runtime(RuntimeError),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::InvalidRequest(msg) => write!(f, "Invalid launch request: {}", msg),
            LaunchError::Runtime(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LaunchError {}

impl From<RuntimeError> for LaunchError {
    fn from(err: RuntimeError) -> Self {
        LaunchError::Runtime(err)
    }
}

/// Everything one user works with: the active MongoDB connection, the engine adapter and
/// the instances launched so far.
pub(crate) struct Session {
    resolver: MongoResolver,
    runtime: DockerRuntime,
    registry: InstanceRegistry,
}

impl Session {
    pub(crate) fn new(resolver: MongoResolver, runtime: DockerRuntime) -> Self {
        Session {
            resolver,
            runtime,
            registry: InstanceRegistry::default(),
        }
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        let resolver = MongoResolver::new(
            Arc::new(MongoCatalog::default()),
            &config.mongo.host,
            Duration::from_secs(config.mongo.timeout_secs),
        );

        let runtime = DockerRuntime::new(
            Arc::new(ProcessRunner),
            Platform::current(),
            DockerSettings::from_config(config),
            PortAllocator::new(config.omniboard.port_base, config.omniboard.port_span),
        );

        Session::new(resolver, runtime)
    }

    pub(crate) fn resolver(&self) -> &MongoResolver {
        &self.resolver
    }

    pub(crate) fn resolver_mut(&mut self) -> &mut MongoResolver {
        &mut self.resolver
    }

    pub(crate) fn runtime(&self) -> &DockerRuntime {
        &self.runtime
    }

    pub(crate) fn instances(&self) -> &[Instance] {
        self.registry.list()
    }

    fn launch_request(&self, database: &str, host_port: Option<u16>) -> Result<LaunchRequest, LaunchError> {
        let database_name = database.trim();
        if database_name.is_empty() {
            return Err(LaunchError::InvalidRequest("Please select a database".to_string()));
        }

        Ok(LaunchRequest {
            database_name: database_name.to_string(),
            target: self.resolver.container_reachable_address(database_name),
            preferred_port: host_port,
        })
    }

    /// Launches an Omniboard container against the active connection and records it.
    /// Nothing is recorded when any step fails.
    pub(crate) async fn launch(&mut self, database: &str, host_port: Option<u16>) -> Result<Instance, LaunchError> {
        let request = self.launch_request(database, host_port)?;

        let (container, port) = self
            .runtime
            .launch(&request.database_name, &request.target, request.preferred_port)
            .await?;

        let instance = Instance::new(&request.database_name, port, &container);
        self.registry.add(instance.clone());

        Ok(instance)
    }

    /// Removes every managed container the engine reports and forgets all recorded instances.
    pub(crate) async fn clear(&mut self) -> usize {
        let removed = self.runtime.clear_all().await;

        if !self.registry.is_empty() {
            debug!("Forgetting {} recorded instance(s)", self.registry.len());
            self.registry.clear();
        }

        info!("Removed {} Omniboard container(s)", removed);

        removed
    }
}
