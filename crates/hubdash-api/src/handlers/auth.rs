//! Login, logout, and session checks

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use hubdash_security::{Role, SessionUser};
use hubdash_shared::constants::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS};

use crate::error::ApiError;
use crate::extract::{session_token, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
    pub login_count: u64,
    pub last_login: Option<DateTime<Utc>>,
}

fn session_cookie(state: &AppState, value: &str, max_age: i64) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}"
    );
    if state.config.secure_session {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| ApiError::InternalError(e.to_string()))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    // bcrypt runs on the blocking pool.
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || {
        users.authenticate(&payload.username, &payload.password)
    })
    .await
    .map_err(|e| ApiError::InternalError(e.to_string()))?
    .map_err(|e| ApiError::InternalError(e.to_string()))?
    .ok_or(ApiError::InvalidCredentials)?;

    let token = state
        .sessions
        .create(user.clone())
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let cookie = session_cookie(&state, &token, SESSION_TTL_SECONDS)?;

    info!("User {} logged in", user.username);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionStatus {
            authenticated: true,
            user: Some(user),
        }),
    )
        .into_response())
}

/// `POST /api/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = session_token(&headers) {
        if state.sessions.destroy(&token) {
            info!("Session closed");
        }
    }
    let cookie = session_cookie(&state, "", 0)?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(SessionStatus {
            authenticated: false,
            user: None,
        }),
    )
        .into_response())
}

/// `GET /api/check-session`
pub async fn check_session(user: Option<CurrentUser>) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: user.is_some(),
        user: user.map(|CurrentUser(u)| u),
    })
}

/// `GET /api/user-info`
pub async fn user_info(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    let stats = state.users.login_stats(&user.username);
    Json(UserInfo {
        username: user.username,
        role: user.role,
        login_count: stats.login_count,
        last_login: stats.last_login,
    })
}
