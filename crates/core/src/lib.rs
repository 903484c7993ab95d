//! Domain logic shared by the database and API crates.
//!
//! This crate has no internal dependencies and no I/O: pagination math,
//! slug lifecycle, media classification, related-entity reconciliation
//! planning, and permission constants all live here so both the repository
//! layer and the HTTP layer can use them.

pub mod diff;
pub mod error;
pub mod media;
pub mod pagination;
pub mod permissions;
pub mod richtext;
pub mod slug;
pub mod types;
