//! Unit and integration tests for the migration console.
//!
//! ## Test Modules
//!
//! - **classifier_tests**: Quip ID vs. Google Drive ID/URL detection
//! - **pagination_tests**: page state transitions and bounds checks
//! - **csv_tests**: CSV serialization of the file listing
//! - **restore_tests**: decoding of restore responses and file naming
//! - **clipboard_tests**: fallback chain and button feedback
//! - **render_tests**: comparison view, tables and response panel
//! - **config_tests**: configuration loading and validation
//! - **error_tests**: error messages and conversions
//! - **controller_tests**: end-to-end runs against an in-process fake API
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! cargo test controller_tests
//! ```

pub mod fake_api;

pub mod clipboard_tests;
pub mod csv_tests;
