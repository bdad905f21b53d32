//! Routes for the page UI, registered at the site root.
//!
//! ```text
//! GET    /             new_page (create form)
//! POST   /             create_page
//! GET    /howto        howto
//! GET    /about        about
//! GET    /{url}        show_page
//! GET    /{url}/edit   edit_page (edit form)
//! POST   /{url}/edit   update_page
//! ```
//!
//! `howto` and `about` are registered ahead of the `{url}` capture; the
//! url policy reserves both words so no page can shadow them.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::new_page).post(pages::create_page))
        .route("/howto", get(pages::howto))
        .route("/about", get(pages::about))
        .route("/{url}", get(pages::show_page))
        .route("/{url}/edit", get(pages::edit_page).post(pages::update_page))
}
