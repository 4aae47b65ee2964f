//! Documentation reads and admin document management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use hubdash_core::domain::{Document, DocumentDraft, DocumentSummary};

use crate::error::ApiError;
use crate::extract::{AdminUser, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub published: Option<bool>,
}

/// `GET /api/documentation` - login required; non-admins see published pages only.
pub async fn list_documentation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    Ok(Json(state.documentation.list_visible(user.is_admin()).await?))
}

/// `GET /api/documentation/{id}` - anonymous callers are treated as non-admins.
pub async fn get_documentation(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let is_admin = user.is_some_and(|CurrentUser(u)| u.is_admin());
    Ok(Json(state.documentation.get_visible(&id, is_admin).await?))
}

pub async fn list_documents(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    Ok(Json(state.documentation.list_visible(true).await?))
}

pub async fn create_document(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(draft): Json<DocumentDraft>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state.documentation.create(draft).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn update_document(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(draft): Json<DocumentDraft>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documentation.update(&id, draft).await?))
}

pub async fn delete_document(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.documentation.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/documents/{id}/publish` - an absent flag toggles the state.
pub async fn publish_document(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documentation.set_published(&id, request.published).await?))
}
