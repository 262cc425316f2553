use axum::{Form, Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse, UserDto, token::Claims};

const ADMIN_ROLE: &str = "admin";

#[derive(Deserialize)]
pub struct UserActionRequest {
    pub user_id: i32,
    pub intent: String,
}

/// GET /users (admin)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    require_admin(&state, &jar)?;

    let users = state.store().list_users().await?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// POST /users (admin, form)
/// The `intent` field selects block or unblock for the named user.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(payload): Form<UserActionRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let admin = require_admin(&state, &jar)?;

    let blocked = match payload.intent.as_str() {
        "block" => true,
        "unblock" => false,
        other => {
            return Err(ApiError::validation(format!("Unknown intent: {other}")));
        }
    };

    if payload.user_id == admin.user_id {
        return Err(ApiError::validation("You cannot block your own account"));
    }

    let found = state
        .store()
        .set_user_blocked(payload.user_id, blocked)
        .await?;

    if !found {
        return Err(ApiError::user_not_found(payload.user_id));
    }

    tracing::info!(user_id = payload.user_id, blocked, "Updated user block state");

    Ok(Json(ApiResponse::success(MessageResponse {
        message: if blocked {
            "User blocked".to_string()
        } else {
            "User unblocked".to_string()
        },
    })))
}

fn require_admin(state: &Arc<AppState>, jar: &CookieJar) -> Result<Claims, ApiError> {
    let claims = state.tokens().require_user(jar)?;

    if claims.auth != ADMIN_ROLE {
        return Err(ApiError::Unauthorized(
            "Administrator access required".to_string(),
        ));
    }

    Ok(claims)
}
