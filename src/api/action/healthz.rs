use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[derive(serde::Serialize)]
struct Healthz {
    state: String,
}

pub(crate) async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(Healthz {
        state: "UP".to_string(),
    }))
}
