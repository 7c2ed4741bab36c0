use async_trait::async_trait;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::mongo::error::{is_authorization_message, ResolverError};

/// Server error code for a command the principal may not run.
const UNAUTHORIZED: i32 = 13;

/// Database driver boundary: connect with a bounded server selection and list names.
#[async_trait]
pub(crate) trait DatabaseCatalog: Send + Sync {
    async fn list_database_names(&self, uri: &str, timeout: Duration) -> Result<Vec<String>, ResolverError>;
    async fn disconnect(&self);
}

impl From<MongoError> for ResolverError {
    fn from(err: MongoError) -> Self {
        let message = err.to_string();

        match err.kind.as_ref() {
            ErrorKind::Command(command) if command.code == UNAUTHORIZED || command.code_name == "Unauthorized" => {
                ResolverError::Authorization(message)
            }
            ErrorKind::InvalidArgument { .. } => ResolverError::Input(message),
            _ if is_authorization_message(&message) => ResolverError::Authorization(message),
            _ => ResolverError::Connection(message),
        }
    }
}

/// Catalog backed by the official driver. Keeps the last client so that a new
/// connection replaces, and drops, the previous one.
#[derive(Default)]
pub(crate) struct MongoCatalog {
    client: Mutex<Option<Client>>,
}

#[async_trait]
impl DatabaseCatalog for MongoCatalog {
    async fn list_database_names(&self, uri: &str, timeout: Duration) -> Result<Vec<String>, ResolverError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        options.app_name = Some("omniboard-launcher".to_string());

        let client = Client::with_options(options)?;
        *self.client.lock().await = Some(client.clone());

        let names = client.list_database_names(None, None).await?;
        debug!("MongoDB listed {} database(s)", names.len());

        Ok(names)
    }

    async fn disconnect(&self) {
        if self.client.lock().await.take().is_some() {
            debug!("MongoDB client released");
        }
    }
}
