use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SessionDto, validation};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub redirect_to: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// POST /auth/register
/// Create an account, start a session and redirect home.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(payload): Form<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_register(&payload.username, &payload.password, &payload.confirm_password)
        .map_err(ApiError::FieldValidation)?;

    let user = state
        .auth_service()
        .register(&payload.username, &payload.password)
        .await?;

    let token = state.tokens().issue(user.id, &user.username, &user.auth)?;
    let jar = jar.add(state.tokens().session_cookie(token));

    Ok((jar, Redirect::to("/")))
}

/// POST /auth/login
/// Authenticate, set the session cookie and redirect.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_login(&payload.username, &payload.password)
        .map_err(ApiError::FieldValidation)?;

    let user = state
        .auth_service()
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = state.tokens().issue(user.id, &user.username, &user.auth)?;
    let jar = jar.add(state.tokens().session_cookie(token));

    let target = sanitize_redirect(payload.redirect_to.as_deref());

    tracing::info!(username = %user.username, "User logged in");

    Ok((jar, Redirect::to(&target)))
}

/// POST /auth/logout
/// Drop the session cookie and send the caller back to the login page.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(state.tokens().clear_cookie());
    (jar, Redirect::to("/login"))
}

/// GET /auth/me
/// Current session payload, 401 when no valid session is present.
pub async fn me(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let claims = state
        .tokens()
        .current_user(&jar)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    Ok(Json(ApiResponse::success(SessionDto {
        user_id: claims.user_id,
        username: claims.username,
        auth: claims.auth,
    })))
}

/// Only same-site path targets are honored; anything else falls back to "/".
fn sanitize_redirect(target: Option<&str>) -> String {
    match target {
        Some(t) if t.starts_with('/') && !t.starts_with("//") => t.to_string(),
        _ => "/".to_string(),
    }
}
