//! Create, edit, read-touch, and expiry operations on pages.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use notelet_core::editcode::{EditCodeSource, WordlistCodes};
use notelet_core::error::PageError;
use notelet_core::excerpt::derive_description;
use notelet_core::types::{DbId, Timestamp};
use notelet_core::url_policy::{auto_url, is_reserved, slugify};
use notelet_db::models::page::{NewPage, Page, PageDraft};
use notelet_db::repositories::PageRepo;
use notelet_db::DbPool;

/// Business logic for the page lifecycle.
///
/// Cheaply cloneable; the edit-code source is injected so tests can supply
/// a deterministic one.
#[derive(Clone)]
pub struct PageLifecycle {
    pool: DbPool,
    codes: Arc<dyn EditCodeSource>,
}

impl PageLifecycle {
    pub fn new(pool: DbPool) -> Self {
        Self::with_codes(pool, Arc::new(WordlistCodes))
    }

    pub fn with_codes(pool: DbPool, codes: Arc<dyn EditCodeSource>) -> Self {
        Self { pool, codes }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Create a page from a draft.
    ///
    /// An explicit url must be unclaimed and unreserved. With no url in the
    /// draft, one is derived from the title and the store-assigned id. An
    /// empty edit code is replaced by a generated one; `created_at`
    /// defaults to now and `last_accessed_at` starts equal to it.
    pub async fn create(&self, draft: PageDraft) -> Result<Page, PageError> {
        let url = draft.url.trim().to_string();
        if !url.is_empty() {
            if is_reserved(&url) {
                return Err(PageError::UrlExists);
            }
            // Advisory pre-check for a friendlier error; the UNIQUE
            // constraint below remains the authoritative guard.
            if PageRepo::url_exists(&self.pool, &url, 0)
                .await
                .map_err(|e| store_fault("create", &e))?
            {
                return Err(PageError::UrlExists);
            }
        }

        let created_at = draft.created_at.unwrap_or_else(Utc::now);
        let edit_code = if draft.edit_code.is_empty() {
            self.codes.generate()
        } else {
            draft.edit_code.clone()
        };
        let description = derive_description(&draft.content);

        if url.is_empty() {
            return self
                .create_with_auto_url(&draft, &description, &edit_code, created_at)
                .await;
        }

        let new = NewPage {
            title: &draft.title,
            url: &url,
            content: &draft.content,
            description: &description,
            author: &draft.author,
            edit_code: &edit_code,
            created_at,
            last_accessed_at: created_at,
        };
        PageRepo::insert(&self.pool, &new)
            .await
            .map_err(|e| classify_write("create", e))
    }

    /// Two-phase creation when the draft carries no url: the
    /// uniqueness-safe auto url needs the store-assigned id, which is
    /// unknown before the first insert.
    async fn create_with_auto_url(
        &self,
        draft: &PageDraft,
        description: &str,
        edit_code: &str,
        created_at: Timestamp,
    ) -> Result<Page, PageError> {
        let placeholder = format!("~{}", Uuid::new_v4().simple());
        let new = NewPage {
            title: &draft.title,
            url: &placeholder,
            content: &draft.content,
            description,
            author: &draft.author,
            edit_code,
            created_at,
            last_accessed_at: created_at,
        };
        let mut page = PageRepo::insert(&self.pool, &new)
            .await
            .map_err(|e| classify_write("create", e))?;

        page.url = auto_url(&slugify(&draft.title), page.id);
        if let Err(err) = PageRepo::update(&self.pool, &page).await {
            let mapped = classify_write("create", err);
            // Don't leave the placeholder row behind.
            if let Err(err) = PageRepo::delete(&self.pool, page.id).await {
                tracing::warn!(id = page.id, error = %err, "failed to remove placeholder page");
            }
            return Err(mapped);
        }

        // Re-read so the caller observes the stored record, final url
        // included.
        PageRepo::find_by_id(&self.pool, page.id)
            .await
            .map_err(|e| store_fault("create", &e))?
            .ok_or(PageError::NotFound)
    }

    /// Replace a page's content, gated by its edit code.
    ///
    /// The code check comes before any other validation. A url change is
    /// policed like creation (unreserved, unclaimed by any other page); an
    /// empty draft url re-derives `slug + id`. `last_accessed_at` is
    /// refreshed, `created_at` is preserved, and an empty draft edit code
    /// keeps the stored one.
    pub async fn edit(
        &self,
        id: DbId,
        draft: PageDraft,
        supplied_code: &str,
    ) -> Result<Page, PageError> {
        let current = PageRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| store_fault("edit", &e))?
            .ok_or(PageError::NotFound)?;

        if supplied_code != current.edit_code {
            return Err(PageError::WrongEditCode);
        }

        let url = draft.url.trim().to_string();
        if !url.is_empty() {
            if is_reserved(&url) {
                return Err(PageError::UrlExists);
            }
            if PageRepo::url_exists(&self.pool, &url, id)
                .await
                .map_err(|e| store_fault("edit", &e))?
            {
                return Err(PageError::UrlExists);
            }
        }

        let url = if url.is_empty() {
            auto_url(&slugify(&draft.title), id)
        } else {
            url
        };
        let edit_code = if draft.edit_code.is_empty() {
            current.edit_code.clone()
        } else {
            draft.edit_code.clone()
        };
        let description = derive_description(&draft.content);

        let updated = Page {
            id,
            title: draft.title,
            url,
            content: draft.content,
            description,
            author: draft.author,
            edit_code,
            created_at: current.created_at,
            last_accessed_at: Utc::now(),
        };

        match PageRepo::update(&self.pool, &updated).await {
            Ok(0) => Err(PageError::NotFound),
            Ok(_) => Ok(updated),
            Err(err) => Err(classify_write("edit", err)),
        }
    }

    /// Fetch a page by url and record the read.
    ///
    /// The timestamp update is best-effort bookkeeping: a failure is
    /// logged and never fails the read itself.
    pub async fn read_touch(&self, url: &str) -> Result<Page, PageError> {
        let page = PageRepo::find_by_url(&self.pool, url)
            .await
            .map_err(|e| store_fault("read_touch", &e))?
            .ok_or(PageError::NotFound)?;

        match PageRepo::touch_last_accessed(&self.pool, url, Utc::now()).await {
            Ok(0) => tracing::warn!(url, "page vanished before its read was recorded"),
            Ok(_) => {}
            Err(err) => tracing::warn!(url, error = %err, "failed to record page read"),
        }

        Ok(page)
    }

    /// Delete every page whose last read is older than `retention`,
    /// measured from `now`. Returns the number removed.
    ///
    /// Each doomed page is logged before the delete. The log query and the
    /// delete are separate statements; the log is best-effort, not a
    /// transactional guarantee.
    pub async fn expiry_sweep(
        &self,
        retention: chrono::Duration,
        now: Timestamp,
    ) -> Result<u64, PageError> {
        let cutoff = now - retention;
        tracing::info!(%cutoff, "expiring pages not read since cutoff");

        let doomed = PageRepo::expiring_before(&self.pool, cutoff)
            .await
            .map_err(|e| store_fault("expiry_sweep", &e))?;
        for page in &doomed {
            tracing::info!(
                id = page.id,
                title = %page.title,
                last_accessed_at = %page.last_accessed_at,
                "expiring page"
            );
        }

        PageRepo::delete_before(&self.pool, cutoff)
            .await
            .map_err(|e| store_fault("expiry_sweep", &e))
    }
}

/// Log an unexpected storage fault and collapse it to the generic kind.
fn store_fault(operation: &'static str, err: &sqlx::Error) -> PageError {
    tracing::error!(operation, error = %err, "storage fault");
    PageError::Store
}

/// Classify a write error: the url UNIQUE constraint maps to `UrlExists`,
/// anything else is a logged storage fault.
fn classify_write(operation: &'static str, err: sqlx::Error) -> PageError {
    if matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()) {
        return PageError::UrlExists;
    }
    store_fault(operation, &err)
}
