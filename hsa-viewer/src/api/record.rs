//! Case-file card endpoint
//!
//! Returns the structured card for one record: the fixed dashboard fields, the
//! parsed traceability events, and the raw record.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hsa_common::case_file::CaseFileView;
use hsa_common::RawRecord;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::AppState;

/// Traceability event prepared for display
#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    /// `dd/mm/yyyy`
    pub date: String,
    /// `dd/mm/yy`, or `date` unchanged when it is not a calendar date
    pub short_date: String,
    pub description: String,
    pub calendar_date: bool,
}

#[derive(Debug, Serialize)]
pub struct CaseFileResponse {
    pub sheet_name: String,
    pub index: usize,
    pub card: CaseFileView,
    pub timeline: Vec<TimelineEntry>,
    pub record: RawRecord,
}

/// GET /api/sheets/:name/records/:index
///
/// `index` is the 0-based row position within the sheet.
pub async fn get_case_file(
    State(state): State<AppState>,
    Path((sheet_name, index)): Path<(String, usize)>,
) -> Result<Json<CaseFileResponse>, RecordError> {
    let sheet = state
        .workbook
        .sheet(&sheet_name)
        .ok_or_else(|| RecordError::SheetNotFound(sheet_name.clone()))?;

    let record = sheet
        .records
        .get(index)
        .ok_or(RecordError::RecordNotFound(index))?;

    let card = CaseFileView::from_record(record, &state.parser);
    debug!(
        "Case file {}[{}]: {} traceability events ({:?}, {} lines dropped)",
        sheet_name,
        index,
        card.trazabilidad.len(),
        card.trazabilidad.outcome,
        card.trazabilidad.dropped_lines
    );

    let timeline = card
        .trazabilidad
        .events
        .iter()
        .map(|event| TimelineEntry {
            date: event.display_date.clone(),
            short_date: event.short_date(),
            description: event.description.clone(),
            calendar_date: event.has_calendar_date(),
        })
        .collect();

    Ok(Json(CaseFileResponse {
        sheet_name,
        index,
        card,
        timeline,
        record: record.clone(),
    }))
}

/// Case-file API errors
#[derive(Debug)]
pub enum RecordError {
    SheetNotFound(String),
    RecordNotFound(usize),
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RecordError::SheetNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("Sheet not found: {}", name))
            }
            RecordError::RecordNotFound(index) => {
                (StatusCode::NOT_FOUND, format!("Record not found: {}", index))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
