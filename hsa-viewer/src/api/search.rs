//! Multi-sheet free-text search
//!
//! Every whitespace-separated token of `q` must appear (case-insensitive
//! substring) in the record, either in any cell or in the one `field` column.

use axum::{
    extract::{Query, State},
    Json,
};
use hsa_common::{FieldScope, RawRecord, SearchQuery};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::AppState;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term; blank returns every record
    #[serde(default)]
    pub q: String,

    /// Column to search in; absent, blank or `ALL` searches every column
    pub field: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// One search hit, tagged with where it came from
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub sheet: String,
    /// Row index within `sheet`, usable with `/api/sheets/:name/records/:index`
    pub row: usize,
    pub record: RawRecord,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub scope: FieldScope,
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub results: Vec<SearchHit>,
}

/// GET /api/search?q=TERM&field=COLUMN&page=N
///
/// A `field` only some sheets carry restricts the search to those sheets; one
/// that no sheet carries yields an empty result.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let scope = FieldScope::from_selector(params.field.as_deref());
    let query = SearchQuery::new(params.q, scope);
    let hits = state.workbook.search(&query);
    debug!("Search {:?} over {:?}: {} results", query.raw_term, query.scope, hits.len());

    let p = calculate_pagination(hits.len(), params.page);
    let results = p
        .slice(&hits)
        .iter()
        .map(|hit| SearchHit {
            sheet: hit.source_sheet.to_string(),
            row: hit.row,
            record: hit.record.clone(),
        })
        .collect();

    Json(SearchResponse {
        total_results: hits.len(),
        query: query.raw_term,
        scope: query.scope,
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        results,
    })
}
