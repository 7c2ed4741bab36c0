use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::api::dto::instance::{ClearOutput, LaunchInput};
use crate::api::server::{errors, launch_error, ApiError, Db};
use crate::models::instances::Instance;

pub(crate) async fn list(State(session): State<Db>) -> Json<Vec<Instance>> {
    let guard = session.lock().await;

    Json(guard.instances().to_vec())
}

pub(crate) async fn create(
    State(session): State<Db>,
    Json(input): Json<LaunchInput>,
) -> Result<(StatusCode, Json<Instance>), ApiError> {
    input
        .validate()
        .map_err(|e| errors(StatusCode::BAD_REQUEST, e.to_string()))?;

    // held for the whole launch so concurrent launches cannot interleave registry updates
    let mut guard = session.lock().await;

    let instance = guard
        .launch(&input.database, input.host_port)
        .await
        .map_err(|e| {
            error!("Launch for database {} failed: {}", input.database, e);
            launch_error(&e)
        })?;

    Ok((StatusCode::CREATED, Json(instance)))
}

pub(crate) async fn clear(State(session): State<Db>) -> Json<ClearOutput> {
    let mut guard = session.lock().await;

    Json(ClearOutput {
        removed: guard.clear().await,
    })
}
