//! HTML fragments for the page components
//!
//! Values are escaped by handlebars, so menu text and tool output are inert.

use handlebars::Handlebars;
use serde_json::json;
use std::time::Duration;

use crate::error::ClientError;
use crate::nav_menu::MenuView;
use crate::network_panel::PanelResult;

const NAV_MENU_TEMPLATE: &str = concat!(
    r#"<nav id="navMenu" class="nav-menu{{#if active}} active{{/if}}">"#,
    r#"{{#if error}}<span class="menu-error">{{error}}</span>{{else}}"#,
    r#"{{#if items}}<div id="menuToggle" class="menu-toggle"><i class="fas fa-bars"></i></div>"#,
    r#"<ul class="nav-list">{{#each items}}<li><a href="{{href}}"{{#if new_tab}} target="_blank" rel="noopener noreferrer"{{/if}}>{{text}}</a></li>{{/each}}</ul>"#,
    r#"{{else}}<span class="no-menu">No menu configured</span>{{/if}}{{/if}}</nav>"#,
);

const PANEL_RESULT_TEMPLATE: &str = concat!(
    r#"<div id="testResults">"#,
    r#"{{#if output}}<pre>{{output}}</pre>{{else}}"#,
    r#"{{#if failure}}<pre class="text-danger">{{failure}}</pre>{{else}}"#,
    r#"<p class="text-muted">{{notice}}</p>{{/if}}{{/if}}</div>"#,
);

pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, ClientError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string("nav_menu", NAV_MENU_TEMPLATE)
            .map_err(|e| ClientError::Template(e.to_string()))?;
        registry
            .register_template_string("panel_result", PANEL_RESULT_TEMPLATE)
            .map_err(|e| ClientError::Template(e.to_string()))?;
        Ok(Self { registry })
    }

    pub fn nav_menu(&self, view: &MenuView, active: bool) -> Result<String, ClientError> {
        let data = match view {
            MenuView::Placeholder => json!({ "active": active }),
            MenuView::Error(message) => json!({ "active": active, "error": message }),
            MenuView::Menu { items } => json!({ "active": active, "items": items }),
        };
        self.render("nav_menu", &data)
    }

    pub fn panel_result(&self, result: &PanelResult, timeout: Duration) -> Result<String, ClientError> {
        let data = match result {
            PanelResult::Idle => json!({ "notice": "Select a target and start the test." }),
            PanelResult::Running => json!({ "notice": "Running test..." }),
            PanelResult::Output(text) if text.trim().is_empty() => {
                json!({ "notice": "The test finished without any output." })
            }
            PanelResult::Output(text) => json!({ "output": text }),
            PanelResult::TimedOut => json!({
                "failure": format!(
                    "Test request timed out ({} s). Check the network connection or the target host.",
                    timeout.as_secs()
                )
            }),
            PanelResult::Failed(message) => json!({ "failure": message }),
        };
        self.render("panel_result", &data)
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, ClientError> {
        self.registry
            .render(name, data)
            .map_err(|e| ClientError::Template(e.to_string()))
    }
}
