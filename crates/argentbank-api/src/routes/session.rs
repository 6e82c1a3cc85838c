//! Session endpoints - sign-in, sign-out, profile

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub user_name: String,
}

/// POST /api/login
pub async fn api_login(
    state: State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<String, ApiError> {
    let profile = state.store.login(&request.email, &request.password).await?;

    let body = serde_json::json!({
        "user": profile,
        "authenticated": true,
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}

/// POST /api/logout
pub async fn api_logout(state: State<AppState>) -> String {
    state.store.logout();
    r#"{"authenticated":false}"#.to_string()
}

/// GET /api/profile
pub async fn api_profile(state: State<AppState>) -> Result<String, ApiError> {
    let profile = state.store.refresh_profile().await?;
    Ok(serde_json::to_string(&profile).unwrap_or_default())
}

/// PUT /api/profile
pub async fn api_profile_update(
    state: State<AppState>,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<String, ApiError> {
    let profile = state.store.update_username(&request.user_name).await?;
    Ok(serde_json::to_string(&profile).unwrap_or_default())
}
