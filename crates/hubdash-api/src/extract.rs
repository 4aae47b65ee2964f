//! Session extractors
//!
//! `CurrentUser` rejects anonymous requests with 401; `Option<CurrentUser>`
//! never rejects. `AdminUser` additionally requires the admin role (403).

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;
use tracing::debug;

use hubdash_security::SessionUser;
use hubdash_shared::constants::SESSION_COOKIE_NAME;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

/// Value of the session cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.to_string())
}

fn resolve_session(parts: &Parts, state: &AppState) -> Option<SessionUser> {
    let token = session_token(&parts.headers)?;
    match state.sessions.resolve(&token) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!("Session cookie rejected: {}", e);
            None
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Not logged in or session expired".to_string()))
    }
}

impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_session(parts, state).map(CurrentUser))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) =
            <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(ApiError::Forbidden(format!(
                "{} is not an administrator",
                user.username
            )));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; hubdash.sid=abc.def; other=1"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_missing_cookie() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
    }
}
