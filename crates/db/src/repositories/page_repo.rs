//! Repository for the `pages` table.

use sqlx::SqlitePool;

use notelet_core::types::{DbId, Timestamp};

use crate::models::page::{ExpiringPage, NewPage, Page};

/// Column list for pages queries.
const COLUMNS: &str = "id, title, url, content, description, author, edit_code, created_at, last_accessed_at";

/// Provides CRUD operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page and return the stored row.
    ///
    /// Surfaces the url UNIQUE violation as a database error; callers
    /// classify it. The store assigns the id.
    pub async fn insert(pool: &SqlitePool, new: &NewPage<'_>) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages
                (title, url, content, description, author, edit_code, created_at, last_accessed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(new.title)
            .bind(new.url)
            .bind(new.content)
            .bind(new.description)
            .bind(new.author)
            .bind(new.edit_code)
            .bind(new.created_at)
            .bind(new.last_accessed_at)
            .fetch_one(pool)
            .await
    }

    /// Find a page by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = ?");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by url.
    pub async fn find_by_url(pool: &SqlitePool, url: &str) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE url = ?");
        sqlx::query_as::<_, Page>(&query)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Full replace of a page's mutable fields by id.
    ///
    /// `created_at` is immutable and deliberately absent from the column
    /// list. Returns the number of rows updated (0 when the id is gone).
    pub async fn update(pool: &SqlitePool, page: &Page) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pages
             SET title = ?, url = ?, content = ?, description = ?, author = ?,
                 edit_code = ?, last_accessed_at = ?
             WHERE id = ?",
        )
        .bind(&page.title)
        .bind(&page.url)
        .bind(&page.content)
        .bind(&page.description)
        .bind(&page.author)
        .bind(&page.edit_code)
        .bind(page.last_accessed_at)
        .bind(page.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Whether any page other than `excluding_id` currently has this url.
    ///
    /// Pass 0 to exclude nothing (no page has id 0).
    pub async fn url_exists(
        pool: &SqlitePool,
        url: &str,
        excluding_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM pages WHERE url = ? AND id <> ?)",
        )
        .bind(url)
        .bind(excluding_id)
        .fetch_one(pool)
        .await
    }

    /// Record a read of the page at `url`. Returns the rows updated.
    pub async fn touch_last_accessed(
        pool: &SqlitePool,
        url: &str,
        at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE pages SET last_accessed_at = ? WHERE url = ?")
            .bind(at)
            .bind(url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List identifying info for every page whose last read predates
    /// `cutoff`, for the pre-delete audit log.
    pub async fn expiring_before(
        pool: &SqlitePool,
        cutoff: Timestamp,
    ) -> Result<Vec<ExpiringPage>, sqlx::Error> {
        sqlx::query_as::<_, ExpiringPage>(
            "SELECT id, title, last_accessed_at FROM pages WHERE last_accessed_at < ?",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Delete every page whose last read predates `cutoff`. Returns the
    /// number removed.
    pub async fn delete_before(pool: &SqlitePool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE last_accessed_at < ?")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a single page by id. Returns the rows removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
