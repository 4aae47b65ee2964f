// ============================================================================
// Hubdash Core - Menu Item Entity
// File: crates/hubdash-core/src/domain/menu_item.rs
// Description: Navigation menu entry shown in the dashboard header
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Menu text must be between 1 and 100 characters"))]
    pub text: String,

    #[validate(length(min = 1, max = 255, message = "Menu link must be between 1 and 255 characters"))]
    pub link: String,

    #[validate(length(max = 100, message = "Menu icon too long"))]
    pub icon: Option<String>,

    pub new_tab: bool,
    pub enabled: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn new(text: &str, link: &str) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
            link: link.trim().to_string(),
            icon: None,
            new_tab: false,
            enabled: true,
            order: 0,
            created_at: Utc::now(),
        };

        item.validate()?;
        Ok(item)
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.trim().to_string());
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_new_tab(mut self, new_tab: bool) -> Self {
        self.new_tab = new_tab;
        self
    }

    /// Apply a partial update and re-validate.
    pub fn apply(&mut self, patch: MenuItemPatch) -> Result<(), validator::ValidationErrors> {
        if let Some(text) = patch.text {
            self.text = text.trim().to_string();
        }
        if let Some(link) = patch.link {
            self.link = link.trim().to_string();
        }
        if let Some(icon) = patch.icon {
            let icon = icon.trim().to_string();
            self.icon = (!icon.is_empty()).then_some(icon);
        }
        if let Some(new_tab) = patch.new_tab {
            self.new_tab = new_tab;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.validate()
    }

    pub fn to_entry(&self) -> MenuEntry {
        MenuEntry {
            text: self.text.clone(),
            link: self.link.clone(),
            icon: self.icon.clone(),
            new_tab: self.new_tab,
        }
    }
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub text: String,
    pub link: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub new_tab: bool,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i32,
}

fn enabled_by_default() -> bool {
    true
}

impl NewMenuItem {
    pub fn into_menu_item(self) -> Result<MenuItem, validator::ValidationErrors> {
        let mut item = MenuItem::new(&self.text, &self.link)?
            .with_order(self.order)
            .with_new_tab(self.new_tab);
        if let Some(icon) = self.icon.filter(|i| !i.trim().is_empty()) {
            item = item.with_icon(&icon);
        }
        item.enabled = self.enabled;
        item.validate()?;
        Ok(item)
    }
}

/// Partial update for a menu item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub text: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub new_tab: Option<bool>,
    pub enabled: Option<bool>,
    pub order: Option<i32>,
}

/// Menu entry as exposed to the browser through `/api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub new_tab: bool,
}

/// Response body of `GET /api/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    pub menu_items: Vec<MenuEntry>,
}
