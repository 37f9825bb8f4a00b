//! Workbook access layer for hsa-viewer
//!
//! The workbook is a SQLite file with one table per sheet. It is opened
//! read-only, loaded once into an in-memory [`Workbook`](hsa_common::Workbook)
//! snapshot, and never written.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;

mod sheets;
pub use sheets::{list_sheets, load_sheet, load_workbook, SheetInfo};

/// Connect to the workbook in read-only mode
///
/// Safety: `read_only` + `immutable` prevent any write, including SQLite's own
/// journal bookkeeping.
pub async fn connect_readonly(workbook_path: &Path) -> Result<SqlitePool> {
    if !workbook_path.exists() {
        anyhow::bail!(
            "Workbook not found: {}\nExport the spreadsheet to SQLite (one table per sheet) first.",
            workbook_path.display()
        );
    }

    let options = SqliteConnectOptions::new()
        .filename(workbook_path)
        .read_only(true)
        .immutable(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .context("Failed to open workbook in read-only mode")?;

    // Verify read-only by attempting a write (should fail)
    #[cfg(debug_assertions)]
    {
        let write_test = sqlx::query("CREATE TABLE _test_write (id INTEGER)")
            .execute(&pool)
            .await;
        if write_test.is_ok() {
            panic!("SAFETY VIOLATION: Workbook connection is not read-only!");
        }
    }

    Ok(pool)
}
