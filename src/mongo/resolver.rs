use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;

use crate::models::connection::{
    ConnectionDescriptor, ConnectionMode, ContainerTarget, CredentialProfile, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::mongo::catalog::DatabaseCatalog;
use crate::mongo::error::ResolverError;
use crate::mongo::uri;

/// Turns user input into the active connection, lists its databases and tells the
/// launcher how a container should reach it.
pub(crate) struct MongoResolver {
    catalog: Arc<dyn DatabaseCatalog>,
    default_host: String,
    timeout: Duration,
    active: Option<ConnectionDescriptor>,
    profile: Option<CredentialProfile>,
}

impl MongoResolver {
    pub(crate) fn new(catalog: Arc<dyn DatabaseCatalog>, default_host: &str, timeout: Duration) -> Self {
        MongoResolver {
            catalog,
            default_host: default_host.to_string(),
            timeout,
            active: None,
            profile: None,
        }
    }

    pub(crate) async fn connect_by_port(&mut self, port: u16) -> Result<Vec<String>, ResolverError> {
        self.profile = None;
        self.active = Some(ConnectionDescriptor {
            mode: ConnectionMode::Port,
            host: self.default_host.clone(),
            port,
            database: None,
            raw_uri: None,
        });

        self.list().await
    }

    pub(crate) async fn connect_by_uri(&mut self, input: &str) -> Result<Vec<String>, ResolverError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResolverError::Input("URL cannot be empty".to_string()));
        }

        self.profile = None;
        self.activate(ConnectionMode::FullUri, uri::ensure_scheme(input));

        self.list().await
    }

    /// Connects with credentials injected into `base_uri`. The assembled URI stays inside
    /// the resolver; only the password-free [`CredentialProfile`] is handed out.
    pub(crate) async fn connect_by_credential_parts(
        &mut self,
        base_uri: &str,
        username: &str,
        password: &SecretString,
        auth_source: &str,
    ) -> Result<Vec<String>, ResolverError> {
        if base_uri.trim().is_empty() {
            return Err(ResolverError::Input("URL cannot be empty".to_string()));
        }
        if username.is_empty() {
            return Err(ResolverError::Input("Username cannot be empty".to_string()));
        }

        let assembled = uri::with_credentials(base_uri, username, password.expose_secret(), auth_source)?;

        self.activate(ConnectionMode::CredentialUri, assembled);
        self.profile = Some(CredentialProfile {
            base_uri: uri::ensure_scheme(base_uri.trim()),
            username: username.to_string(),
            auth_source: auth_source.to_string(),
        });

        self.list().await
    }

    fn activate(&mut self, mode: ConnectionMode, connection_uri: String) {
        let (host, port, database) = uri::parse_target(&connection_uri);

        self.active = Some(ConnectionDescriptor {
            mode,
            host,
            port,
            database,
            raw_uri: Some(SecretString::from(connection_uri)),
        });
    }

    fn connection_uri(descriptor: &ConnectionDescriptor) -> String {
        match descriptor.uri() {
            Some(raw) => raw.to_string(),
            None => format!("{}{}:{}/", uri::DEFAULT_SCHEME, descriptor.host, descriptor.port),
        }
    }

    async fn list(&self) -> Result<Vec<String>, ResolverError> {
        let descriptor = self
            .active
            .as_ref()
            .ok_or_else(|| ResolverError::Input("No connection configured".to_string()))?;

        let result = self
            .catalog
            .list_database_names(&Self::connection_uri(descriptor), self.timeout)
            .await;

        match (result, &descriptor.database) {
            (Err(ResolverError::Authorization(message)), Some(database)) => {
                warn!("Listing databases denied ({}), falling back to {}", message, database);
                Ok(vec![database.clone()])
            }
            (result, _) => result,
        }
    }

    /// Host, port and database of the active connection, `localhost:27017` when none is set.
    pub(crate) fn parse_current(&self) -> (String, u16, Option<String>) {
        match &self.active {
            Some(descriptor) => (descriptor.host.clone(), descriptor.port, descriptor.database.clone()),
            None => (DEFAULT_HOST.to_string(), DEFAULT_PORT, None),
        }
    }

    pub(crate) fn container_reachable_address(&self, database_name: &str) -> ContainerTarget {
        if let Some(raw) = self.active.as_ref().and_then(ConnectionDescriptor::uri) {
            return ContainerTarget::Uri(SecretString::from(uri::with_database(raw, database_name)));
        }

        let (host, port, _) = self.parse_current();
        ContainerTarget::HostPort {
            host,
            port,
            database: database_name.to_string(),
        }
    }

    pub(crate) fn descriptor(&self) -> Option<&ConnectionDescriptor> {
        self.active.as_ref()
    }

    pub(crate) fn credential_profile(&self) -> Option<&CredentialProfile> {
        self.profile.as_ref()
    }

    pub(crate) async fn disconnect(&self) {
        self.catalog.disconnect().await;
    }
}
