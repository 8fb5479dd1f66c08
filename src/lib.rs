//! # Migration Console
//!
//! Client side of the admin console for the Quip to Google Drive migration.
//! All search, migration and restore logic lives behind the REST API; this
//! crate classifies user input, calls the endpoints and renders what comes back.
//!
//! ## Core Components
//!
//! - [`api`]: HTTP client for the migration REST API
//! - [`classifier`]: Quip ID vs. Google Drive ID/URL detection
//! - [`controllers`]: view models of the admin, search/restore and file listing pages
//! - [`pagination`]: page state of the file listing
//! - [`restore`]: decoding and saving restored documents
//! - [`csv_export`]: full-dataset CSV export
//! - [`clipboard`]: copy with fallbacks and button feedback
//! - [`config`]: layered configuration (embedded defaults, file, environment)
//! - [`error`]: the console error type

pub mod api;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod controllers;
pub mod csv_export;
pub mod download;
pub mod error;
pub mod pagination;
pub mod panel;
pub mod render;
pub mod restore;
pub mod types;

#[cfg(test)]
mod tests;
