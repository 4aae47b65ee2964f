//! Site configuration and menu item administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use hubdash_core::domain::{MenuItem, MenuItemPatch, NewMenuItem, SiteConfig, SiteSettingsPatch};

use crate::error::ApiError;
use crate::extract::AdminUser;
use crate::state::AppState;

/// `GET /api/config` - site settings plus the enabled menu entries.
pub async fn get_config(State(state): State<AppState>) -> Result<Json<SiteConfig>, ApiError> {
    let menu = state.menu.menu_config().await?;
    Ok(Json(SiteConfig {
        settings: state.settings.current().await,
        menu_items: menu.menu_items,
    }))
}

/// `POST /api/config` - merge and persist site settings.
pub async fn save_config(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(patch): Json<SiteSettingsPatch>,
) -> Result<Json<Value>, ApiError> {
    let settings = state.settings.update(patch).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Configuration saved",
        "settings": settings,
    })))
}

pub async fn list_menu_items(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_all().await?))
}

pub async fn create_menu_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let item = state.menu.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_menu_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<Json<MenuItem>, ApiError> {
    Ok(Json(state.menu.update(&id, patch).await?))
}

pub async fn delete_menu_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.menu.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
