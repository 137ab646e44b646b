use crate::dtos::course::MessageResponse;
use axum::Json;

/// Greeting that confirms the service is running
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Courses application.".to_string(),
    })
}
