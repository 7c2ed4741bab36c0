use chrono::{DateTime, Utc};
use serde::Serialize;

/// A launched Omniboard container as remembered by this process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Instance {
    pub(crate) database: String,
    pub(crate) port: u16,
    pub(crate) container: String,
    pub(crate) url: String,
    pub(crate) launched_at: DateTime<Utc>,
}

impl Instance {
    pub(crate) fn new(database: &str, port: u16, container: &str) -> Self {
        Instance {
            database: database.to_string(),
            port,
            container: container.to_string(),
            url: format!("http://localhost:{}", port),
            launched_at: Utc::now(),
        }
    }
}

/// In-memory, insertion-ordered record of launched instances. Nothing is persisted and
/// entries are never reconciled with the engine; only `clear` removes them.
#[derive(Debug, Default)]
pub(crate) struct InstanceRegistry {
    instances: Vec<Instance>,
}

impl InstanceRegistry {
    pub(crate) fn add(&mut self, instance: Instance) {
        debug!("Registering {} for database {}", instance.container, instance.database);
        self.instances.push(instance);
    }

    pub(crate) fn list(&self) -> &[Instance] {
        &self.instances
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
