use axum::extract::State;
use axum::Json;

use crate::api::server::Db;
use crate::runtime::docker::EngineStatus;

pub(crate) async fn engine(State(session): State<Db>) -> Json<EngineStatus> {
    let guard = session.lock().await;

    Json(guard.runtime().status().await)
}
