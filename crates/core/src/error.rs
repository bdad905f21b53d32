/// Outcome of a page lifecycle operation, as seen by callers.
///
/// Expected, user-correctable outcomes (`NotFound`, `UrlExists`,
/// `WrongEditCode`) are distinct variants so the calling layer can render a
/// precise message. `Store` stands for any unexpected storage fault; the
/// underlying cause is logged at the point of classification and never
/// carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error("that URL is already taken")]
    UrlExists,

    #[error("incorrect edit code")]
    WrongEditCode,

    #[error("internal storage error")]
    Store,
}
