//! Sheet listing and loading
//!
//! Each non-internal table of the workbook is one sheet. Loading applies the
//! loader-side cleanup the core expects:
//! - column names are trimmed (later duplicates after trimming are skipped)
//! - NULL and blank cells become absent values
//! - numbers are stringified
//! - columns absent in every row are dropped

use anyhow::{Context, Result};
use hsa_common::{Sheet, Workbook};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, ValueRef};
use tracing::{debug, info, warn};

/// Sheet metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetInfo {
    /// Sheet (table) name
    pub name: String,
    /// Number of rows in the sheet
    pub row_count: i64,
}

/// List all sheets with row counts
///
/// Returns sheets in workbook order (table creation order, as exported),
/// excluding SQLite internal tables.
pub async fn list_sheets(pool: &SqlitePool) -> Result<Vec<SheetInfo>> {
    let tables = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut sheet_infos = Vec::new();

    for (sheet_name,) in tables {
        let row_count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", quote_identifier(&sheet_name)))
                .fetch_one(pool)
                .await?;

        sheet_infos.push(SheetInfo {
            name: sheet_name,
            row_count,
        });
    }

    Ok(sheet_infos)
}

/// Load one sheet into memory
pub async fn load_sheet(pool: &SqlitePool, sheet_name: &str) -> Result<Sheet> {
    let table = quote_identifier(sheet_name);

    // PRAGMA table_info returns: (cid, name, type, notnull, dflt_value, pk)
    let schema = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read columns of sheet '{}'", sheet_name))?;
    let raw_columns: Vec<String> = schema.iter().map(|row| row.get::<String, _>(1)).collect();

    // Trimmed names; index into the table's column order
    let mut columns: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in raw_columns.iter().enumerate() {
        let name = raw.trim().to_string();
        if columns.iter().any(|(_, existing)| *existing == name) {
            warn!(
                "Sheet '{}': duplicate column '{}' after trimming, keeping the first",
                sheet_name, name
            );
            continue;
        }
        columns.push((idx, name));
    }

    let rows = sqlx::query(&format!("SELECT * FROM {}", table))
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read rows of sheet '{}'", sheet_name))?;

    let cells: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|row| columns.iter().map(|(idx, _)| cell_to_text(row, *idx)).collect())
        .collect();

    // Drop columns that are absent in every row
    let keep: Vec<bool> = if cells.is_empty() {
        vec![true; columns.len()]
    } else {
        (0..columns.len())
            .map(|c| cells.iter().any(|row| row[c].is_some()))
            .collect()
    };

    let kept_columns: Vec<String> = columns
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|((_, name), _)| name.clone())
        .collect();

    let dropped = columns.len() - kept_columns.len();
    if dropped > 0 {
        debug!("Sheet '{}': dropped {} empty column(s)", sheet_name, dropped);
    }

    let mut sheet = Sheet::new(sheet_name, kept_columns);
    for row in cells {
        sheet.push_row(
            row.into_iter()
                .zip(&keep)
                .filter(|(_, keep)| **keep)
                .map(|(cell, _)| cell)
                .collect(),
        );
    }

    Ok(sheet)
}

/// Load every sheet into an immutable workbook snapshot
pub async fn load_workbook(pool: &SqlitePool) -> Result<Workbook> {
    let mut sheets = Vec::new();

    for info in list_sheets(pool).await? {
        let sheet = load_sheet(pool, &info.name).await?;
        info!(
            "Loaded sheet '{}' ({} rows, {} columns)",
            sheet.name,
            sheet.len(),
            sheet.columns.len()
        );
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

/// Convert one SQLite cell to text; NULL, blank and BLOB cells are absent
fn cell_to_text(row: &SqliteRow, idx: usize) -> Option<String> {
    let raw = row.try_get_raw(idx).ok()?;
    if raw.is_null() {
        return None;
    }

    let text = row
        .try_get::<String, _>(idx)
        .ok()
        .or_else(|| row.try_get::<i64, _>(idx).ok().map(|v| v.to_string()))
        .or_else(|| row.try_get::<f64, _>(idx).ok().map(|v| v.to_string()))?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Quote a table name for interpolation into SQL
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("EN DESPACHO"), "\"EN DESPACHO\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
