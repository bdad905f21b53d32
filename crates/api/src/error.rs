use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use notelet_core::error::PageError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Expected outcomes (`NotFound`, `UrlExists`, `WrongEditCode`) are mostly
/// handled inline by re-rendering the relevant form; whatever reaches this
/// type becomes a standalone HTML error page. Storage faults were already
/// logged where they were classified, so only a generic message is shown.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level outcome from the page lifecycle.
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            AppError::Page(PageError::NotFound) => (
                StatusCode::NOT_FOUND,
                "Page not found",
                "No page lives at this URL. It may have expired after going unread for too long.",
            ),
            AppError::Page(PageError::UrlExists) => (
                StatusCode::CONFLICT,
                "URL taken",
                "That URL is already taken.",
            ),
            AppError::Page(PageError::WrongEditCode) => (
                StatusCode::FORBIDDEN,
                "Incorrect edit code",
                "The edit code does not match this page.",
            ),
            AppError::Page(PageError::Store) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error",
                "A server error occurred.",
            ),
        };

        (status, Html(views::error_page(title, message))).into_response()
    }
}
