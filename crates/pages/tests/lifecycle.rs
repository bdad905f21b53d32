//! Integration tests for the page lifecycle manager.
//!
//! Runs against real store files with a deterministic edit-code source.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use tempfile::TempDir;

use notelet_core::editcode::EditCodeSource;
use notelet_core::error::PageError;
use notelet_db::models::page::PageDraft;
use notelet_db::repositories::PageRepo;
use notelet_pages::PageLifecycle;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Always hands out the same code, so tests can assert on it.
struct FixedCodes(&'static str);

impl EditCodeSource for FixedCodes {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

async fn fixture() -> (TempDir, PageLifecycle) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pages.db");
    notelet_db::initialize_store(&path).await.expect("init");
    let pool = notelet_db::create_pool(&path).await.expect("pool");
    let pages = PageLifecycle::with_codes(pool, Arc::new(FixedCodes("lantern")));
    (dir, pages)
}

fn draft(title: &str, url: &str, content: &str) -> PageDraft {
    PageDraft {
        title: title.to_string(),
        url: url.to_string(),
        content: content.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_url_derives_slug_plus_id() {
    let (_dir, pages) = fixture().await;

    let page = pages
        .create(draft("Hello World", "", "body text"))
        .await
        .unwrap();

    assert_eq!(page.url, format!("hello_world{}", page.id));
    assert_eq!(page.edit_code, "lantern");
    assert_eq!(page.description, "body text");
    assert_eq!(page.last_accessed_at, page.created_at);

    // The stored row matches what the caller observed.
    let stored = PageRepo::find_by_url(pages.pool(), &page.url)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, page);
}

#[tokio::test]
async fn create_keeps_explicit_url_and_code() {
    let (_dir, pages) = fixture().await;

    let page = pages
        .create(PageDraft {
            title: "Mine".into(),
            url: "my_page".into(),
            content: "# Heading\nbody".into(),
            author: "ada".into(),
            edit_code: "opensesame".into(),
            created_at: None,
        })
        .await
        .unwrap();

    assert_eq!(page.url, "my_page");
    assert_eq!(page.edit_code, "opensesame");
    assert_eq!(page.author, "ada");
    assert_eq!(page.description, " Heading\nbody");
}

#[tokio::test]
async fn create_rejects_reserved_url_regardless_of_store_state() {
    let (_dir, pages) = fixture().await;

    for url in ["howto", "about"] {
        let err = pages.create(draft("T", url, "c")).await.unwrap_err();
        assert_matches!(err, PageError::UrlExists);
    }
}

#[tokio::test]
async fn create_rejects_taken_url() {
    let (_dir, pages) = fixture().await;

    let first = pages.create(draft("One", "taken", "first")).await.unwrap();
    let err = pages.create(draft("Two", "taken", "second")).await.unwrap_err();
    assert_matches!(err, PageError::UrlExists);

    // The winner is untouched.
    let stored = PageRepo::find_by_url(pages.pool(), "taken")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.content, "first");
}

#[tokio::test]
async fn concurrent_creates_with_same_url_elect_one_winner() {
    let (_dir, pages) = fixture().await;

    let (a, b) = tokio::join!(
        pages.create(draft("A", "contested", "a")),
        pages.create(draft("B", "contested", "b")),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == PageError::UrlExists));
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_with_wrong_code_mutates_nothing() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("Locked", "locked", "before")).await.unwrap();

    let err = pages
        .edit(page.id, draft("Changed", "locked", "after"), "not-lantern")
        .await
        .unwrap_err();
    assert_matches!(err, PageError::WrongEditCode);

    let stored = PageRepo::find_by_id(pages.pool(), page.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, page);
}

#[tokio::test]
async fn edit_with_correct_code_updates_and_touches() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("Post", "post", "old words")).await.unwrap();

    let updated = pages
        .edit(page.id, draft("Post", "post", "## new words"), "lantern")
        .await
        .unwrap();

    assert_eq!(updated.content, "## new words");
    assert_eq!(updated.description, " new words");
    assert_eq!(updated.created_at, page.created_at);
    assert!(updated.last_accessed_at >= page.last_accessed_at);
    assert_eq!(updated.edit_code, "lantern");
}

#[tokio::test]
async fn edit_with_empty_url_rederives_from_title() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("Old Title", "keepme", "c")).await.unwrap();

    let updated = pages
        .edit(page.id, draft("New Title", "", "c"), "lantern")
        .await
        .unwrap();
    assert_eq!(updated.url, format!("new_title{}", page.id));
    assert!(PageRepo::find_by_url(pages.pool(), "keepme")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn edit_rejects_url_claimed_by_another_page() {
    let (_dir, pages) = fixture().await;

    pages.create(draft("One", "one", "c")).await.unwrap();
    let two = pages.create(draft("Two", "two", "c")).await.unwrap();

    let err = pages
        .edit(two.id, draft("Two", "one", "c"), "lantern")
        .await
        .unwrap_err();
    assert_matches!(err, PageError::UrlExists);

    // Keeping its own url is always allowed.
    pages
        .edit(two.id, draft("Two", "two", "newer"), "lantern")
        .await
        .unwrap();
}

#[tokio::test]
async fn edit_rejects_reserved_url() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("P", "p", "c")).await.unwrap();
    let err = pages
        .edit(page.id, draft("P", "about", "c"), "lantern")
        .await
        .unwrap_err();
    assert_matches!(err, PageError::UrlExists);
}

#[tokio::test]
async fn edit_missing_page_is_not_found() {
    let (_dir, pages) = fixture().await;

    let err = pages
        .edit(9999, draft("X", "x", "c"), "whatever")
        .await
        .unwrap_err();
    assert_matches!(err, PageError::NotFound);
}

#[tokio::test]
async fn edit_can_rotate_the_edit_code() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("P", "rotate", "c")).await.unwrap();

    let mut rotated = draft("P", "rotate", "c");
    rotated.edit_code = "swordfish".to_string();
    pages.edit(page.id, rotated, "lantern").await.unwrap();

    // The old code no longer authorizes; the new one does.
    let err = pages
        .edit(page.id, draft("P", "rotate", "c2"), "lantern")
        .await
        .unwrap_err();
    assert_matches!(err, PageError::WrongEditCode);
    pages
        .edit(page.id, draft("P", "rotate", "c2"), "swordfish")
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// ReadTouch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn read_touch_returns_page_and_records_the_read() {
    let (_dir, pages) = fixture().await;

    let page = pages.create(draft("Readable", "readable", "words")).await.unwrap();

    let read = pages.read_touch("readable").await.unwrap();
    assert_eq!(read.content, "words");

    let stored = PageRepo::find_by_id(pages.pool(), page.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.last_accessed_at >= page.last_accessed_at);
    assert!(stored.last_accessed_at >= stored.created_at);
}

#[tokio::test]
async fn read_touch_missing_url_is_not_found() {
    let (_dir, pages) = fixture().await;

    let err = pages.read_touch("ghost").await.unwrap_err();
    assert_matches!(err, PageError::NotFound);
}

// ---------------------------------------------------------------------------
// ExpirySweep
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sweep_removes_exactly_the_idle_set_and_is_idempotent() {
    let (_dir, pages) = fixture().await;

    let stale = pages.create(draft("Stale", "stale", "c")).await.unwrap();
    pages.create(draft("Fresh", "fresh", "c")).await.unwrap();

    PageRepo::touch_last_accessed(pages.pool(), "stale", Utc::now() - Duration::days(90))
        .await
        .unwrap();

    let now = Utc::now();
    let removed = pages.expiry_sweep(Duration::days(60), now).await.unwrap();
    assert_eq!(removed, 1);
    assert!(PageRepo::find_by_id(pages.pool(), stale.id)
        .await
        .unwrap()
        .is_none());
    assert!(PageRepo::find_by_url(pages.pool(), "fresh")
        .await
        .unwrap()
        .is_some());

    // Re-running with the same `now` removes nothing further.
    let removed = pages.expiry_sweep(Duration::days(60), now).await.unwrap();
    assert_eq!(removed, 0);
}
