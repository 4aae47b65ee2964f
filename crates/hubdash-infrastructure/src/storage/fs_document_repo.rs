//! Markdown documents on disk
//!
//! Layout under the documentation directory:
//!
//! ```text
//! <id>.md            markdown body
//! meta/<id>.json     {id, title?, published, createdAt, updatedAt}
//! ```
//!
//! A document without metadata is unpublished and dated by its file mtime.
//! Invalid UTF-8 in a body is replaced rather than rejected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

use hubdash_core::domain::{is_valid_document_id, Document};
use hubdash_core::error::DomainError;
use hubdash_core::repositories::DocumentRepository;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMeta {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

pub struct FsDocumentRepository {
    root: PathBuf,
}

fn storage_error(context: &str, e: std::io::Error) -> DomainError {
    error!("Documentation storage error {}: {}", context, e);
    DomainError::StorageError(e.to_string())
}

impl FsDocumentRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the documentation and metadata directories if missing.
    pub async fn ensure_dirs(&self) -> Result<(), DomainError> {
        fs::create_dir_all(self.meta_dir())
            .await
            .map_err(|e| storage_error("creating directories", e))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn meta_dir(&self) -> PathBuf {
        self.root.join("meta")
    }

    fn content_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.md"))
    }

    fn meta_path(&self, id: &str) -> PathBuf {
        self.meta_dir().join(format!("{id}.json"))
    }

    async fn read_meta(&self, id: &str) -> Option<DocumentMeta> {
        let raw = fs::read_to_string(self.meta_path(id)).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("Ignoring unreadable metadata for document {}: {}", id, e);
                None
            }
        }
    }

    async fn load(&self, id: &str) -> Result<Option<Document>, DomainError> {
        let path = self.content_path(id);
        let content = match fs::read(&path).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("reading document", e)),
        };

        let modified: DateTime<Utc> = fs::metadata(&path)
            .await
            .and_then(|m| m.modified())
            .map(DateTime::from)
            .unwrap_or_else(|_| Utc::now());

        let meta = self.read_meta(id).await;
        let stored_title = meta.as_ref().and_then(|m| m.title.as_deref());

        Ok(Some(Document {
            id: id.to_string(),
            title: Document::resolve_title(&content, stored_title, id),
            created_at: meta.as_ref().and_then(|m| m.created_at).unwrap_or(modified),
            updated_at: meta.as_ref().and_then(|m| m.updated_at).unwrap_or(modified),
            published: meta.as_ref().map(|m| m.published).unwrap_or(false),
            content,
        }))
    }
}

#[async_trait]
impl DocumentRepository for FsDocumentRepository {
    async fn list(&self) -> Result<Vec<Document>, DomainError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Documentation directory {:?} does not exist", self.root);
                return Ok(Vec::new());
            }
            Err(e) => return Err(storage_error("listing documents", e)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error("listing documents", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_valid_document_id(id) {
                continue;
            }
            match self.load(id).await {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(e) => warn!("Skipping document {} in listing: {}", id, e),
            }
        }
        Ok(documents)
    }

    async fn find(&self, id: &str) -> Result<Option<Document>, DomainError> {
        if !is_valid_document_id(id) {
            return Ok(None);
        }
        self.load(id).await
    }

    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        if !is_valid_document_id(&document.id) {
            return Err(DomainError::ValidationError(format!(
                "invalid document id: {}",
                document.id
            )));
        }
        self.ensure_dirs().await?;

        fs::write(self.content_path(&document.id), &document.content)
            .await
            .map_err(|e| storage_error("writing document", e))?;

        let meta = DocumentMeta {
            id: document.id.clone(),
            title: Some(document.title.clone()),
            published: document.published,
            created_at: Some(document.created_at),
            updated_at: Some(document.updated_at),
        };
        let json = serde_json::to_string_pretty(&meta)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        fs::write(self.meta_path(&document.id), json)
            .await
            .map_err(|e| storage_error("writing metadata", e))
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        if !is_valid_document_id(id) {
            return Ok(false);
        }
        match fs::remove_file(self.content_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(storage_error("deleting document", e)),
        }
        if let Err(e) = fs::remove_file(self.meta_path(id)).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove metadata for document {}: {}", id, e);
            }
        }
        Ok(true)
    }
}
