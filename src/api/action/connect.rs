use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use validator::Validate;

use crate::api::dto::connection::{ConnectInput, ConnectMode, ConnectOutput};
use crate::api::server::{errors, resolver_error, ApiError, Db};
use crate::config::config::Config;

const DEFAULT_AUTH_SOURCE: &str = "admin";

pub(crate) async fn connect(
    State(session): State<Db>,
    State(configuration): State<Config>,
    Json(input): Json<ConnectInput>,
) -> Result<Json<ConnectOutput>, ApiError> {
    input
        .validate()
        .map_err(|e| errors(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut guard = session.lock().await;
    let resolver = guard.resolver_mut();

    let result = match input.mode {
        ConnectMode::Port => {
            resolver
                .connect_by_port(input.port.unwrap_or(configuration.mongo.port))
                .await
        }
        ConnectMode::Uri => {
            let uri = input
                .uri
                .filter(|uri| !uri.trim().is_empty())
                .unwrap_or(configuration.mongo.default_url);
            resolver.connect_by_uri(&uri).await
        }
        ConnectMode::Credentials => {
            let password = SecretString::from(input.password.unwrap_or_default());
            resolver
                .connect_by_credential_parts(
                    input.base_uri.as_deref().unwrap_or_default(),
                    input.username.as_deref().unwrap_or_default(),
                    &password,
                    input.auth_source.as_deref().unwrap_or(DEFAULT_AUTH_SOURCE),
                )
                .await
        }
    };

    let databases = result.map_err(|e| {
        warn!("MongoDB connection failed: {}", e);
        resolver_error(&e)
    })?;

    let (host, port, database) = resolver.parse_current();

    Ok(Json(ConnectOutput {
        databases,
        mode: resolver.descriptor().map(|descriptor| descriptor.mode),
        host,
        port,
        database,
        profile: resolver.credential_profile().cloned(),
    }))
}
