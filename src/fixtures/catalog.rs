use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::mongo::catalog::DatabaseCatalog;
use crate::mongo::error::ResolverError;

/// Answers every listing with the same scripted result and remembers the URIs it saw.
#[derive(Clone)]
pub(crate) struct ScriptedCatalog {
    result: Result<Vec<String>, ResolverError>,
    seen: Arc<Mutex<Vec<String>>>,
    disconnects: Arc<Mutex<usize>>,
}

impl ScriptedCatalog {
    fn with_result(result: Result<Vec<String>, ResolverError>) -> Self {
        ScriptedCatalog {
            result,
            seen: Arc::new(Mutex::new(Vec::new())),
            disconnects: Arc::new(Mutex::new(0)),
        }
    }

    pub(crate) fn listing(names: &[&str]) -> Self {
        ScriptedCatalog::with_result(Ok(names.iter().map(|name| name.to_string()).collect()))
    }

    pub(crate) fn failing(err: ResolverError) -> Self {
        ScriptedCatalog::with_result(Err(err))
    }

    pub(crate) fn unauthorized() -> Self {
        ScriptedCatalog::failing(ResolverError::Authorization(
            "not authorized on admin to execute command { listDatabases: 1 }".to_string(),
        ))
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn disconnects(&self) -> usize {
        *self.disconnects.lock().unwrap()
    }
}

#[async_trait]
impl DatabaseCatalog for ScriptedCatalog {
    async fn list_database_names(&self, uri: &str, _timeout: Duration) -> Result<Vec<String>, ResolverError> {
        self.seen.lock().unwrap().push(uri.to_string());
        self.result.clone()
    }

    async fn disconnect(&self) {
        *self.disconnects.lock().unwrap() += 1;
    }
}
