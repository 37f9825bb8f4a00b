//! Multi-term search over workbook sheets
//!
//! A query is split on whitespace into lower-cased tokens. A record matches when
//! every token is a case-insensitive substring of:
//! - at least one of its cells ([`FieldScope::All`]), or
//! - the one scoped column ([`FieldScope::Column`]).
//!
//! Sheets are filtered independently against their own columns and the results
//! are concatenated in sheet order, then row order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{RawRecord, Sheet, Workbook};

/// Selector value meaning "search every column"
pub const ALL_FIELDS_SELECTOR: &str = "ALL";

/// Columns a query is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldScope {
    #[default]
    All,
    Column(String),
}

impl FieldScope {
    /// Interpret a field selector; `None`, blank and exactly `"ALL"` select every
    /// column. Any other spelling (`"all"`, `"All"`) names a column.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            None | Some("") | Some(ALL_FIELDS_SELECTOR) => FieldScope::All,
            Some(column) => FieldScope::Column(column.to_string()),
        }
    }
}

/// A free-text search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub raw_term: String,
    #[serde(default)]
    pub scope: FieldScope,
}

impl SearchQuery {
    pub fn new(raw_term: impl Into<String>, scope: FieldScope) -> Self {
        Self {
            raw_term: raw_term.into(),
            scope,
        }
    }

    /// Query over every column
    pub fn all(raw_term: impl Into<String>) -> Self {
        Self::new(raw_term, FieldScope::All)
    }

    /// Query restricted to one column
    pub fn in_column(raw_term: impl Into<String>, column: impl Into<String>) -> Self {
        Self::new(raw_term, FieldScope::Column(column.into()))
    }

    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.raw_term)
    }
}

/// Whitespace tokenization, lower-cased
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether `record` satisfies every token under `scope`.
///
/// Absent cells never match. An empty token list matches everything.
pub fn record_matches(record: &RawRecord, tokens: &[String], scope: &FieldScope) -> bool {
    match scope {
        FieldScope::All => {
            let cells: Vec<String> = record.values().map(str::to_lowercase).collect();
            tokens
                .iter()
                .all(|token| cells.iter().any(|cell| cell.contains(token.as_str())))
        }
        FieldScope::Column(column) => match record.get(column) {
            Some(value) => {
                let cell = value.to_lowercase();
                tokens.iter().all(|token| cell.contains(token.as_str()))
            }
            None => tokens.is_empty(),
        },
    }
}

/// Records of one sheet matching `query`, in sheet order.
///
/// A column scope naming a column the sheet lacks returns nothing, even for a
/// blank query. Otherwise a blank query returns every record.
pub fn filter_records<'a>(sheet: &'a Sheet, query: &SearchQuery) -> Vec<&'a RawRecord> {
    matching_rows(sheet, query)
        .into_iter()
        .map(|(_, record)| record)
        .collect()
}

/// Like [`filter_records`], paired with each record's row index in the sheet
pub fn matching_rows<'a>(sheet: &'a Sheet, query: &SearchQuery) -> Vec<(usize, &'a RawRecord)> {
    if let FieldScope::Column(column) = &query.scope {
        if !sheet.has_column(column) {
            return Vec::new();
        }
    }

    let tokens = query.tokens();
    if tokens.is_empty() {
        return sheet.records.iter().enumerate().collect();
    }

    sheet
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(record, &tokens, &query.scope))
        .collect()
}

/// A matching record tagged with its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    pub source_sheet: &'a str,
    /// Row index within the source sheet
    pub row: usize,
    pub record: &'a RawRecord,
}

/// Run `query` over every sheet and concatenate the tagged matches.
///
/// Sheets without the scoped column are skipped.
pub fn search_workbook<'a>(workbook: &'a Workbook, query: &SearchQuery) -> Vec<SearchResult<'a>> {
    let mut results = Vec::new();

    for sheet in &workbook.sheets {
        if let FieldScope::Column(column) = &query.scope {
            if !sheet.has_column(column) {
                debug!("Sheet '{}' has no column '{}', skipped", sheet.name, column);
                continue;
            }
        }

        let matches = matching_rows(sheet, query);
        debug!(
            "Sheet '{}': {} of {} records match {:?}",
            sheet.name,
            matches.len(),
            sheet.len(),
            query.raw_term
        );

        results.extend(matches.into_iter().map(|(row, record)| SearchResult {
            source_sheet: sheet.name.as_str(),
            row,
            record,
        }));
    }

    results
}

/// Every column name seen across all sheets, first-seen order, no duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaUniverse {
    columns: Vec<String>,
}

impl SchemaUniverse {
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for column in workbook.sheets.iter().flat_map(|s| s.columns.iter()) {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        Self { columns }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Workbook {
    /// See [`search_workbook`]
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchResult<'_>> {
        search_workbook(self, query)
    }

    /// Union of all sheets' columns, recomputed on each call
    pub fn schema_universe(&self) -> SchemaUniverse {
        SchemaUniverse::from_workbook(self)
    }
}
