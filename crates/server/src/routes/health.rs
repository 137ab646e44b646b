use crate::{dtos::health::HealthResponse, state::AppState};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use log::error;

/// Reports whether the service can reach its database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 500, description = "Database is unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.courses.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                db: "up".to_string(),
                time: Some(Utc::now()),
                error: None,
            }),
        ),
        Err(e) => {
            error!("Health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    db: "down".to_string(),
                    time: None,
                    error: Some("database unreachable".to_string()),
                }),
            )
        }
    }
}
