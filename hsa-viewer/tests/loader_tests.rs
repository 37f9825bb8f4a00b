//! Workbook loader tests against a real SQLite file

use hsa_viewer::db::{connect_readonly, list_sheets, load_workbook};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;
use tempfile::TempDir;

/// Test helper: write a two-sheet workbook at `path`
async fn write_workbook(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.unwrap();

    for statement in [
        r#"CREATE TABLE "DESPACHO" (" EXPEDIENTE " TEXT, "TEMA" TEXT, "VACIA" TEXT, "FOLIOS" INTEGER)"#,
        r#"INSERT INTO "DESPACHO" VALUES ('2024-001', 'Pensión', NULL, 5)"#,
        r#"INSERT INTO "DESPACHO" VALUES ('2024-002', '   ', '', NULL)"#,
        r#"CREATE TABLE "ARCHIVO" ("EXPEDIENTE" TEXT, "ASUNTO" TEXT)"#,
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    pool.close().await;
}

async fn setup() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hsa.db");
    write_workbook(&path).await;
    let pool = connect_readonly(&path).await.unwrap();
    (dir, pool)
}

#[tokio::test]
async fn test_sheets_listed_in_workbook_order() {
    let (_dir, pool) = setup().await;

    // DESPACHO was created before ARCHIVO
    let sheets = list_sheets(&pool).await.unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["DESPACHO", "ARCHIVO"]);
    assert_eq!(sheets[0].row_count, 2);
    assert_eq!(sheets[1].row_count, 0);
}

#[tokio::test]
async fn test_workbook_keeps_creation_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orden.db");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let writer = SqlitePool::connect_with(options).await.unwrap();
    for name in ["EN DESPACHO", "ARCHIVO", "PREARCHIVO"] {
        sqlx::query(&format!(r#"CREATE TABLE "{}" ("EXPEDIENTE" TEXT)"#, name))
            .execute(&writer)
            .await
            .unwrap();
    }
    writer.close().await;

    let pool = connect_readonly(&path).await.unwrap();
    let workbook = load_workbook(&pool).await.unwrap();
    let names: Vec<&str> = workbook.sheet_names().collect();
    assert_eq!(names, vec!["EN DESPACHO", "ARCHIVO", "PREARCHIVO"]);
}

#[tokio::test]
async fn test_loader_cleanup() {
    let (_dir, pool) = setup().await;
    let workbook = load_workbook(&pool).await.unwrap();

    let despacho = workbook.sheet("DESPACHO").unwrap();
    // Trimmed names, all-empty column dropped
    assert_eq!(despacho.columns, vec!["EXPEDIENTE", "TEMA", "FOLIOS"]);

    let first = &despacho.records[0];
    assert_eq!(first.get("EXPEDIENTE"), Some("2024-001"));
    assert_eq!(first.get("FOLIOS"), Some("5"));

    // Blank and NULL cells are absent
    let second = &despacho.records[1];
    assert_eq!(second.get("TEMA"), None);
    assert_eq!(second.get("FOLIOS"), None);
    assert!(second.has_column("TEMA"));
}

#[tokio::test]
async fn test_empty_sheet_keeps_columns() {
    let (_dir, pool) = setup().await;
    let workbook = load_workbook(&pool).await.unwrap();

    let archivo = workbook.sheet("ARCHIVO").unwrap();
    assert!(archivo.is_empty());
    assert_eq!(archivo.columns, vec!["EXPEDIENTE", "ASUNTO"]);
    assert!(workbook.schema_universe().contains("ASUNTO"));
}
