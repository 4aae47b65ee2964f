//! Documentation pages: public reads gated by publish state, admin management

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{is_valid_document_id, Document, DocumentDraft, DocumentSummary};
use crate::error::DomainError;
use crate::repositories::DocumentRepository;

pub struct DocumentationService {
    repo: Arc<dyn DocumentRepository>,
}

impl DocumentationService {
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    /// Summaries visible to the caller, most recently updated first.
    pub async fn list_visible(&self, is_admin: bool) -> Result<Vec<DocumentSummary>, DomainError> {
        let mut summaries: Vec<DocumentSummary> = self
            .repo
            .list()
            .await?
            .iter()
            .filter(|doc| is_admin || doc.published)
            .map(Document::summary)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// A single document; unpublished ones are only readable by administrators.
    pub async fn get_visible(&self, id: &str, is_admin: bool) -> Result<Document, DomainError> {
        let document = self.get(id).await?;
        if !document.published && !is_admin {
            warn!("Denied access to unpublished document {}", id);
            return Err(DomainError::DocumentNotPublished(id.to_string()));
        }
        Ok(document)
    }

    pub async fn list_all(&self) -> Result<Vec<Document>, DomainError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Document, DomainError> {
        if !is_valid_document_id(id) {
            return Err(DomainError::DocumentNotFound(id.to_string()));
        }
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| DomainError::DocumentNotFound(id.to_string()))
    }

    pub async fn create(&self, draft: DocumentDraft) -> Result<Document, DomainError> {
        draft.validate()?;

        // Ids are creation timestamps; bump on collision.
        let mut millis = Utc::now().timestamp_millis();
        while self.repo.find(&millis.to_string()).await?.is_some() {
            millis += 1;
        }
        let id = millis.to_string();

        let now = Utc::now();
        let document = Document {
            title: Document::resolve_title(&draft.content, Some(&draft.title), &id),
            id,
            content: draft.content,
            created_at: now,
            updated_at: now,
            published: draft.published.unwrap_or(false),
        };
        self.repo.save(&document).await?;
        info!("Document created: {} - {}", document.id, document.title);
        Ok(document)
    }

    /// Replace title and content. A missing document is created under `id`.
    pub async fn update(&self, id: &str, draft: DocumentDraft) -> Result<Document, DomainError> {
        draft.validate()?;
        if !is_valid_document_id(id) {
            return Err(DomainError::ValidationError(format!("invalid document id: {id}")));
        }

        let now = Utc::now();
        let existing = self.repo.find(id).await?;
        let document = Document {
            id: id.to_string(),
            title: Document::resolve_title(&draft.content, Some(&draft.title), id),
            created_at: existing.as_ref().map(|d| d.created_at).unwrap_or(now),
            updated_at: now,
            published: draft
                .published
                .or(existing.as_ref().map(|d| d.published))
                .unwrap_or(false),
            content: draft.content,
        };
        self.repo.save(&document).await?;
        info!("Document saved: {}", id);
        Ok(document)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if !is_valid_document_id(id) || !self.repo.delete(id).await? {
            return Err(DomainError::DocumentNotFound(id.to_string()));
        }
        info!("Document deleted: {}", id);
        Ok(())
    }

    /// Set the publish flag, or flip it when `published` is `None`.
    pub async fn set_published(
        &self,
        id: &str,
        published: Option<bool>,
    ) -> Result<Document, DomainError> {
        let mut document = self.get(id).await?;
        document.published = published.unwrap_or(!document.published);
        document.updated_at = Utc::now();
        self.repo.save(&document).await?;
        info!("Document {} published={}", id, document.published);
        Ok(document)
    }
}
