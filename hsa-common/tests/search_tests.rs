//! Integration tests for multi-sheet search
//!
//! Tests cover:
//! - AND across tokens, OR across columns for the all-fields scope
//! - Scoped search over sheets with heterogeneous columns
//! - Sheet-order then row-order result tagging
//! - Absent cells never match a non-empty term

use hsa_common::search::search_workbook;
use hsa_common::{FieldScope, SearchQuery, Sheet, Workbook};

fn sheet(name: &str, columns: &[&str], rows: &[&[Option<&str>]]) -> Sheet {
    let mut sheet = Sheet::new(name, columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        sheet.push_row(row.iter().map(|c| c.map(str::to_string)).collect());
    }
    sheet
}

fn workbook() -> Workbook {
    Workbook::new(vec![
        sheet(
            "DESPACHO",
            &["EXPEDIENTE", "SOLICITANTE", "TEMA"],
            &[
                &[Some("2024-001"), Some("Juan Pérez"), Some("Pensión")],
                &[Some("2024-002"), Some("Juan Gómez"), Some("Salud")],
                &[Some("2024-003"), Some("Ana Pérez"), None],
            ],
        ),
        sheet(
            "PREARCHIVO",
            &["EXPEDIENTE", "ASUNTO"],
            &[
                &[Some("2023-101"), Some("Tutela de Juan contra Pérez S.A.")],
                &[Some("2023-102"), Some("Archivo definitivo")],
            ],
        ),
    ])
}

fn expedientes(results: &[hsa_common::SearchResult<'_>]) -> Vec<(String, String)> {
    results
        .iter()
        .map(|r| {
            (
                r.source_sheet.to_string(),
                r.record.get("EXPEDIENTE").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_all_scope_and_across_tokens() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::all("juan perez"));

    // Accents are not folded: "perez" does not match "Pérez"
    assert!(results.is_empty());

    let results = search_workbook(&wb, &SearchQuery::all("juan pérez"));
    assert_eq!(
        expedientes(&results),
        vec![
            ("DESPACHO".to_string(), "2024-001".to_string()),
            ("PREARCHIVO".to_string(), "2023-101".to_string()),
        ]
    );
}

#[test]
fn test_tokens_may_hit_different_columns() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::all("juan salud"));
    assert_eq!(
        expedientes(&results),
        vec![("DESPACHO".to_string(), "2024-002".to_string())]
    );
}

#[test]
fn test_record_with_only_one_token_does_not_match() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::all("ana salud"));
    assert!(results.is_empty());
}

#[test]
fn test_scoped_search_skips_sheets_without_column() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::in_column("juan", "SOLICITANTE"));

    // PREARCHIVO mentions Juan but has no SOLICITANTE column
    assert_eq!(
        expedientes(&results),
        vec![
            ("DESPACHO".to_string(), "2024-001".to_string()),
            ("DESPACHO".to_string(), "2024-002".to_string()),
        ]
    );
}

#[test]
fn test_scoped_search_on_column_of_second_sheet() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::in_column("ARCHIVO", "ASUNTO"));
    assert_eq!(
        expedientes(&results),
        vec![("PREARCHIVO".to_string(), "2023-102".to_string())]
    );
}

#[test]
fn test_scoped_column_requires_every_token() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::in_column("juan pensión", "SOLICITANTE"));
    assert!(results.is_empty());
}

#[test]
fn test_absent_cell_never_matches() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::in_column("disponible", "TEMA"));
    assert!(results.is_empty());
}

#[test]
fn test_blank_query_returns_everything_in_order() {
    let wb = workbook();
    let results = search_workbook(&wb, &SearchQuery::all(""));
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].source_sheet, "DESPACHO");
    assert_eq!(results[4].source_sheet, "PREARCHIVO");
}

#[test]
fn test_case_insensitive_substring() {
    let wb = workbook();
    let results = wb.search(&SearchQuery::new("2023-10", FieldScope::Column("EXPEDIENTE".into())));
    assert_eq!(results.len(), 2);
}

#[test]
fn test_schema_universe_is_union() {
    let universe = workbook().schema_universe();
    assert_eq!(
        universe.columns(),
        &["EXPEDIENTE", "SOLICITANTE", "TEMA", "ASUNTO"]
    );
}
