//! Page entity and write DTOs.

use serde::Serialize;
use sqlx::FromRow;

use notelet_core::types::{DbId, Timestamp};

/// A row from the `pages` table.
///
/// `edit_code` is compared against, never serialized: once a page is
/// created the code is not retrievable through any read surface.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub content: String,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing)]
    pub edit_code: String,
    pub created_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

/// Caller-supplied, not-yet-persisted field values for a page.
///
/// Empty strings mean "unset", matching the form inputs this is collected
/// from; the lifecycle manager fills in defaults before anything reaches
/// the store.
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub title: String,
    pub url: String,
    pub content: String,
    pub author: String,
    pub edit_code: String,
    pub created_at: Option<Timestamp>,
}

/// Fully resolved values for an insert, produced by the lifecycle manager.
#[derive(Debug)]
pub struct NewPage<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub content: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub edit_code: &'a str,
    pub created_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

/// Identifying fields of a page about to be expired, for the audit log.
#[derive(Debug, FromRow)]
pub struct ExpiringPage {
    pub id: DbId,
    pub title: String,
    pub last_accessed_at: Timestamp,
}
