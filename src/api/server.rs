use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::FromRef,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::Mutex;
use tower::{BoxError, ServiceBuilder};
use tower_http::trace::TraceLayer;

use crate::api::action::connect::connect;
use crate::api::action::engine::engine;
use crate::api::action::healthz::healthz;
use crate::api::action::instances::{clear as instance_clear, create as instance_create, list as instance_list};
use crate::config::config::Config;
use crate::mongo::ResolverError;
use crate::runtime::RuntimeError;
use crate::session::{LaunchError, Session};

pub(crate) type Db = Arc<Mutex<Session>>;

pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) session: Db,
    pub(crate) configuration: Config,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.configuration.clone()
    }
}

pub(crate) fn errors(status: StatusCode, message: String) -> ApiError {
    (status, Json(json!({ "errors": [message] })))
}

pub(crate) fn resolver_error(err: &ResolverError) -> ApiError {
    let status = match err {
        ResolverError::Input(_) => StatusCode::BAD_REQUEST,
        ResolverError::Authorization(_) => StatusCode::UNAUTHORIZED,
        ResolverError::Connection(_) => StatusCode::BAD_GATEWAY,
    };

    errors(status, err.hint())
}

pub(crate) fn launch_error(err: &LaunchError) -> ApiError {
    match err {
        LaunchError::InvalidRequest(msg) => errors(StatusCode::BAD_REQUEST, msg.clone()),
        LaunchError::Runtime(err) if err.is_engine_unavailable() => {
            errors(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        LaunchError::Runtime(err @ RuntimeError::PortsExhausted(_)) => {
            errors(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        LaunchError::Runtime(err) => errors(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub(crate) fn router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.configuration.api.request_timeout_secs);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/connect", post(connect))
        .route("/instances", get(instance_list))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|error: BoxError| async move {
                    if error.is::<tower::timeout::error::Elapsed>() {
                        Ok(StatusCode::REQUEST_TIMEOUT)
                    } else {
                        Err((
                            StatusCode::INTERNAL_SERVER_ERROR,
                            format!("Unhandled internal error: {}", error),
                        ))
                    }
                }))
                .timeout(request_timeout)
                .into_inner(),
        )
        // routes that drive the engine are bounded by the engine timeouts instead
        .route("/engine", get(engine))
        .route("/instances", post(instance_create).delete(instance_clear))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start(session: Session, configuration: Config) {
    info!("Starting server on {}", configuration.get_api_url());

    let addr: SocketAddr = match format!("{}:{}", configuration.api.host, configuration.api.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid API address {}: {}", configuration.get_api_url(), e);
            return;
        }
    };

    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        configuration,
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Unable to bind {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, router(state)).await {
        error!("Server error: {}", e);
    }
}
