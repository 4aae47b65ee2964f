//! Navigation menu loader
//!
//! Fetches `/api/config` once and turns `menuItems` into links. A failed load
//! leaves the loader in [`LoadState::Failed`], from which `load` tries again.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::ClientError;
use crate::render::Renderer;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu_config(&self) -> Result<Value, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub href: String,
    pub text: String,
    pub new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuView {
    Placeholder,
    Error(String),
    Menu { items: Vec<MenuLink> },
}

pub struct NavMenuLoader<S> {
    source: S,
    state: LoadState,
    view: Option<MenuView>,
    active: bool,
}

impl<S: MenuSource> NavMenuLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::NotLoaded,
            view: None,
            active: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// `None` until the first load attempt finishes.
    pub fn view(&self) -> Option<&MenuView> {
        self.view.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub async fn load(&mut self) -> &LoadState {
        if matches!(self.state, LoadState::Loading | LoadState::Loaded) {
            debug!("Menu already loaded, skipping");
            return &self.state;
        }

        self.state = LoadState::Loading;
        match self.source.fetch_menu_config().await {
            Ok(config) => {
                let items = parse_menu_items(&config);
                if items.is_empty() {
                    warn!("Configuration has no menu items");
                    self.view = Some(MenuView::Placeholder);
                } else {
                    info!("Rendered {} navigation menu items", items.len());
                    self.view = Some(MenuView::Menu { items });
                }
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                let message = format!("Menu failed to load: {e}");
                error!("{}", message);
                self.view = Some(MenuView::Error(message.clone()));
                self.state = LoadState::Failed(message);
            }
        }
        &self.state
    }

    /// Flip the `active` class of the mobile menu. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        if matches!(self.view, Some(MenuView::Menu { .. })) {
            self.active = !self.active;
        }
        self.active
    }

    pub fn render_html(&self, renderer: &Renderer) -> Result<String, ClientError> {
        match &self.view {
            Some(view) => renderer.nav_menu(view, self.active),
            None => Ok(String::new()),
        }
    }
}

/// Links from `menuItems`; anything that is not an array yields no links.
pub fn parse_menu_items(config: &Value) -> Vec<MenuLink> {
    let Some(entries) = config.get("menuItems").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| MenuLink {
            href: non_empty_str(entry.get("link")).unwrap_or("#").to_string(),
            text: non_empty_str(entry.get("text")).unwrap_or("Untitled").to_string(),
            new_tab: entry.get("newTab").map(truthy).unwrap_or(false),
        })
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
