//! Documentation pages

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.*)$").expect("valid heading regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

impl Document {
    /// First markdown `# heading`, then the stored title, then the id.
    pub fn resolve_title(content: &str, stored_title: Option<&str>, id: &str) -> String {
        HEADING
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| stored_title.filter(|t| !t.is_empty()).map(str::to_string))
            .unwrap_or_else(|| id.to_string())
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            published: self.published,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

/// Title and content submitted when creating or replacing a document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub published: Option<bool>,
}

/// Ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
