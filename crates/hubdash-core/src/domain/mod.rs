//! # Hubdash Core - Domain Module
//!
//! Domain entities for the dashboard.

pub mod client_error;
pub mod document;
pub mod menu_item;
pub mod site_settings;
pub mod system_report;

// Re-export all entities and enums
pub use client_error::{ClientErrorReport, ReportKind};
pub use document::{is_valid_document_id, Document, DocumentDraft, DocumentSummary};
pub use menu_item::{MenuConfig, MenuEntry, MenuItem, MenuItemPatch, NewMenuItem};
pub use network_test::{is_valid_domain, NetworkTestRequest, TestKind, KNOWN_DOMAINS};
pub use site_settings::{SiteConfig, SiteSettings, SiteSettingsPatch};
pub use system_report::{
    HostSnapshot, LivenessReport, MemoryUsage, ProcessInfo, SystemInfo, SystemReport,
};
