//! hsa-viewer library - case-file workbook viewer
//!
//! Serves a read-only JSON API over an in-memory workbook snapshot: sheet
//! listing, paginated records, case-file cards with parsed traceability, and
//! multi-sheet search.

use std::sync::Arc;

use axum::Router;
use hsa_common::{TraceabilityParser, Workbook};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Workbook snapshot (never mutated after load)
    pub workbook: Arc<Workbook>,
    /// Traceability parser with the registered correction rules
    pub parser: Arc<TraceabilityParser>,
}

impl AppState {
    /// Create new application state using the built-in correction rules
    pub fn new(workbook: Workbook) -> Self {
        Self::with_parser(workbook, TraceabilityParser::default())
    }

    pub fn with_parser(workbook: Workbook, parser: TraceabilityParser) -> Self {
        Self {
            workbook: Arc::new(workbook),
            parser: Arc::new(parser),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/sheets", get(api::list_sheets))
        .route("/api/sheets/:name", get(api::get_sheet_records))
        .route("/api/sheets/:name/records/:index", get(api::get_case_file))
        .route("/api/search", get(api::search))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
