use crate::dtos::auth::{AuthErrorResponse, LoginRequest, LoginResponse, UserInfo};
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;

/// Issues an opaque session token for any non-empty username.
///
/// No credential is checked; the token is not verified by any other route.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Username missing", body = AuthErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<AuthErrorResponse>)> {
    let username = payload
        .ok()
        .and_then(|Json(request)| request.username)
        .filter(|username| !username.trim().is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(AuthErrorResponse {
                    error: "username required".to_string(),
                }),
            )
        })?;

    let token = STANDARD.encode(format!("{username}:{}", Utc::now().timestamp_millis()));

    Ok(Json(LoginResponse {
        token,
        user: UserInfo { username },
    }))
}
