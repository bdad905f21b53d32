//! Handlers for the page UI: create form, page display, edit flow, and
//! the informational pages.
//!
//! Expected outcomes (`UrlExists`, `WrongEditCode`, missing fields)
//! re-render the relevant form with a message; anything else falls
//! through to [`AppError`].

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use notelet_core::error::PageError;
use notelet_db::models::page::PageDraft;

use crate::error::{AppError, AppResult};
use crate::markdown;
use crate::state::AppState;
use crate::views;

/* --------------------------------------------------------------------------
Form types
-------------------------------------------------------------------------- */

/// Fields of both the create and the edit form. On the edit form,
/// `editcode` carries the code that authorizes the change.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub editcode: String,
}

impl PageForm {
    /// Collect the form into a draft. Surrounding whitespace is the form's
    /// problem, not the core's, so it is trimmed here.
    fn into_draft(self) -> PageDraft {
        PageDraft {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            content: self.content,
            author: self.author.trim().to_string(),
            edit_code: self.editcode.trim().to_string(),
            created_at: None,
        }
    }
}

/// Caller-layer validation: the core does not reject empty titles or
/// content, the form does.
fn missing_field(draft: &PageDraft) -> Option<&'static str> {
    if draft.title.is_empty() {
        return Some("Please enter a title");
    }
    if draft.content.is_empty() {
        return Some("Please enter content");
    }
    None
}

/* --------------------------------------------------------------------------
Create
-------------------------------------------------------------------------- */

/// GET /
///
/// The empty create-page form.
pub async fn new_page(State(_state): State<AppState>) -> Html<String> {
    Html(views::new_page_form(&PageDraft::default(), None))
}

/// POST /
///
/// Create a page from the submitted form. On success, the one-time page
/// with the link and the edit code.
pub async fn create_page(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> AppResult<Response> {
    let draft = form.into_draft();

    if let Some(msg) = missing_field(&draft) {
        return Ok(Html(views::new_page_form(&draft, Some(msg))).into_response());
    }

    match state.pages.create(draft.clone()).await {
        Ok(page) => {
            tracing::info!(id = page.id, url = %page.url, "Page created");
            Ok(Html(views::create_success(&page)).into_response())
        }
        Err(PageError::UrlExists) => Ok(Html(views::new_page_form(
            &draft,
            Some("That URL is already taken. Choose another."),
        ))
        .into_response()),
        Err(err) => Err(AppError::Page(err)),
    }
}

/* --------------------------------------------------------------------------
Display
-------------------------------------------------------------------------- */

/// GET /{url}
///
/// Fetch the page, record the read, render the markdown body.
pub async fn show_page(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> AppResult<Html<String>> {
    let page = state.pages.read_touch(&url).await?;
    let rendered = markdown::render(&page.content);
    Ok(Html(views::page_view(&page, &rendered)))
}

/// GET /howto
pub async fn howto() -> Html<String> {
    Html(views::howto())
}

/// GET /about
pub async fn about() -> Html<String> {
    Html(views::about())
}

/* --------------------------------------------------------------------------
Edit
-------------------------------------------------------------------------- */

/// GET /{url}/edit
///
/// The edit form, pre-filled from the stored record. Loading it counts as
/// a read.
pub async fn edit_page(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> AppResult<Html<String>> {
    let page = state.pages.read_touch(&url).await?;
    let draft = PageDraft {
        title: page.title,
        url: page.url,
        content: page.content,
        author: page.author,
        ..Default::default()
    };
    Ok(Html(views::edit_page_form(&url, &draft, None)))
}

/// POST /{url}/edit
///
/// Apply the edit, gated by the submitted edit code. Success redirects to
/// the (possibly renamed) page.
pub async fn update_page(
    State(state): State<AppState>,
    Path(url): Path<String>,
    Form(form): Form<PageForm>,
) -> AppResult<Response> {
    let current = state.pages.read_touch(&url).await?;

    let supplied_code = form.editcode.trim().to_string();
    let mut draft = form.into_draft();
    // The form's code field authorizes; it is not a code rotation.
    draft.edit_code = String::new();

    if let Some(msg) = missing_field(&draft) {
        return Ok(Html(views::edit_page_form(&url, &draft, Some(msg))).into_response());
    }

    match state.pages.edit(current.id, draft.clone(), &supplied_code).await {
        Ok(page) => {
            tracing::info!(id = page.id, url = %page.url, "Page edited");
            Ok(Redirect::to(&format!("/{}", page.url)).into_response())
        }
        Err(PageError::WrongEditCode) => Ok(Html(views::edit_page_form(
            &url,
            &draft,
            Some("Incorrect edit code."),
        ))
        .into_response()),
        Err(PageError::UrlExists) => Ok(Html(views::edit_page_form(
            &url,
            &draft,
            Some("That URL is already taken. Choose another."),
        ))
        .into_response()),
        Err(err) => Err(AppError::Page(err)),
    }
}
