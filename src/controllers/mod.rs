//! View models behind the three console pages: admin panel, search and
//! restore, and the migrated file listing.

pub mod admin;
pub mod files;
pub mod search;

pub use admin::{AdminAction, AdminController, StatsRefresher};
pub use files::FilesController;
pub use search::{RestoreStatus, SearchController, SearchState};
