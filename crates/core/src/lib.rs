//! Domain policy for the notelet page service.
//!
//! This crate has zero internal dependencies and no storage concerns so it
//! can be used by the repository layer, the lifecycle manager, and any
//! future CLI or worker tooling alike.

pub mod editcode;
pub mod error;
pub mod excerpt;
pub mod types;
pub mod url_policy;
