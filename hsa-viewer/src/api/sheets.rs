//! Sheet listing and paginated record browsing

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hsa_common::{RawRecord, SchemaUniverse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::AppState;

/// Query parameters for record browsing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

#[derive(Debug, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

/// Sheet listing plus the column universe for the field selector
#[derive(Debug, Serialize)]
pub struct SheetsResponse {
    pub sheets: Vec<SheetSummary>,
    pub schema_universe: SchemaUniverse,
}

/// One page of a sheet's records
#[derive(Debug, Serialize)]
pub struct SheetRecordsResponse {
    pub sheet_name: String,
    pub total_rows: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// GET /api/sheets
pub async fn list_sheets(State(state): State<AppState>) -> Json<SheetsResponse> {
    let sheets = state
        .workbook
        .sheets
        .iter()
        .map(|sheet| SheetSummary {
            name: sheet.name.clone(),
            row_count: sheet.len(),
            columns: sheet.columns.clone(),
        })
        .collect();

    Json(SheetsResponse {
        sheets,
        schema_universe: state.workbook.schema_universe(),
    })
}

/// GET /api/sheets/:name?page=N
pub async fn get_sheet_records(
    State(state): State<AppState>,
    Path(sheet_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SheetRecordsResponse>, SheetError> {
    let sheet = state
        .workbook
        .sheet(&sheet_name)
        .ok_or_else(|| SheetError::SheetNotFound(sheet_name.clone()))?;

    let p = calculate_pagination(sheet.len(), query.page);

    Ok(Json(SheetRecordsResponse {
        sheet_name,
        total_rows: sheet.len(),
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        columns: sheet.columns.clone(),
        records: p.slice(&sheet.records).to_vec(),
    }))
}

/// Sheet API errors
#[derive(Debug)]
pub enum SheetError {
    SheetNotFound(String),
}

impl IntoResponse for SheetError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SheetError::SheetNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("Sheet not found: {}", name))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
