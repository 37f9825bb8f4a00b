//! HTTP API handlers for hsa-viewer

pub mod health;
pub mod record;
pub mod search;
pub mod sheets;

pub use health::health_routes;
pub use record::get_case_file;
pub use search::search;
pub use sheets::{get_sheet_records, list_sheets};
