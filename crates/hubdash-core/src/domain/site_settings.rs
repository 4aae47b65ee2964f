// ============================================================================
// Hubdash Core - Site Settings
// File: crates/hubdash-core/src/domain/site_settings.rs
// Description: Admin-editable dashboard settings served with the menu
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::menu_item::MenuEntry;

pub const DEFAULT_PROXY_DOMAIN: &str = "registry-1.docker.io";
pub const DEFAULT_THEME: &str = "light";

/// Site settings entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[validate(length(min = 1, max = 255, message = "Proxy domain must be between 1 and 255 characters"))]
    #[serde(default = "default_proxy_domain")]
    pub proxy_domain: String,

    #[validate(length(max = 2048, message = "Logo URL too long"))]
    #[serde(default)]
    pub logo: String,

    #[validate(length(min = 1, max = 32, message = "Theme must be between 1 and 32 characters"))]
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_proxy_domain() -> String {
    DEFAULT_PROXY_DOMAIN.to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            proxy_domain: default_proxy_domain(),
            logo: String::new(),
            theme: default_theme(),
        }
    }
}

impl SiteSettings {
    /// Merge a partial update over the current values and re-validate.
    pub fn merged(&self, patch: SiteSettingsPatch) -> Result<Self, validator::ValidationErrors> {
        let merged = Self {
            proxy_domain: patch
                .proxy_domain
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| self.proxy_domain.clone()),
            logo: patch
                .logo
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| self.logo.clone()),
            theme: patch
                .theme
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| self.theme.clone()),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// Body of `POST /api/config`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsPatch {
    pub proxy_domain: Option<String>,
    pub logo: Option<String>,
    pub theme: Option<String>,
}

/// Response body of `GET /api/config`: settings plus the enabled menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(flatten)]
    pub settings: SiteSettings,
    pub menu_items: Vec<MenuEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: SiteSettings = serde_json::from_str(r#"{"logo":"/logo.png"}"#).unwrap();
        assert_eq!(settings.proxy_domain, DEFAULT_PROXY_DOMAIN);
        assert_eq!(settings.theme, DEFAULT_THEME);
        assert_eq!(settings.logo, "/logo.png");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let current = SiteSettings::default();
        let patch = SiteSettingsPatch {
            theme: Some(" dark ".to_string()),
            ..Default::default()
        };

        let merged = current.merged(patch).unwrap();
        assert_eq!(merged.theme, "dark");
        assert_eq!(merged.proxy_domain, DEFAULT_PROXY_DOMAIN);
    }

    #[test]
    fn test_merge_rejects_empty_proxy_domain() {
        let patch = SiteSettingsPatch {
            proxy_domain: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(SiteSettings::default().merged(patch).is_err());
    }

    #[test]
    fn test_site_config_is_flat() {
        let config = SiteConfig {
            settings: SiteSettings::default(),
            menu_items: Vec::new(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["proxyDomain"], DEFAULT_PROXY_DOMAIN);
        assert_eq!(json["theme"], DEFAULT_THEME);
        assert!(json["menuItems"].as_array().unwrap().is_empty());
    }
}
