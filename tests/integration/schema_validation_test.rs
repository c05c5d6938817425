//! Integration tests for sales table validation
//!
//! Only tables exposing date, unit_price and quantity may reach the
//! aggregation queries; anything else is a schema error.

#[path = "../helpers/mod.rs"]
mod helpers;

use rust_decimal_macros::dec;

use helpers::*;
use sales_report::{
    common::error::ReportError,
    db::{SalesRepository, SchemaRepository},
    models::sales::REQUIRED_COLUMNS,
};

async fn create_table_with(pool: &sqlx::SqlitePool, table: &str, columns: &[&str]) {
    let mut definitions = vec!["id INTEGER PRIMARY KEY".to_string()];
    definitions.extend(columns.iter().map(|c| format!("\"{}\" TEXT", c)));

    let sql = format!("CREATE TABLE \"{}\" ({})", table, definitions.join(", "));
    sqlx::query(&sql).execute(pool).await.unwrap();
}

#[tokio::test]
async fn accepts_table_with_required_and_extra_columns() {
    let pool = create_test_pool().await;
    create_table_with(&pool, "ventas", &["date", "unit_price", "quantity", "cliente"]).await;

    let table = SchemaRepository::new()
        .validate_sales_table(&pool, "ventas")
        .await
        .unwrap();

    assert_eq!(table.name(), "ventas");
    assert_eq!(table.quoted(), "\"ventas\"");
}

#[tokio::test]
async fn rejects_every_table_missing_a_required_column() {
    let pool = create_test_pool().await;

    // Todas as combinações estritamente menores que o conjunto completo
    for mask in 0..(1u32 << REQUIRED_COLUMNS.len()) - 1 {
        let present: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| *c)
            .collect();
        let expected_missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !present.contains(c))
            .collect();

        let mut columns = present.clone();
        columns.push("otra");
        let table = format!("ventas_{}", mask);
        create_table_with(&pool, &table, &columns).await;

        let err = SchemaRepository::new()
            .validate_sales_table(&pool, &table)
            .await
            .unwrap_err();

        match err {
            ReportError::Schema { missing, .. } => assert_eq!(missing, expected_missing),
            other => panic!("expected schema error for {:?}, got {:?}", present, other),
        }
    }
}

#[tokio::test]
async fn missing_table_is_a_schema_error() {
    let pool = create_test_pool().await;

    let err = SchemaRepository::new()
        .validate_sales_table(&pool, "no_existe")
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::Schema { ref table, .. } if table == "no_existe"));
    assert_eq!(
        err.user_message(),
        "❌ La tabla no contiene las columnas necesarias: date, unit_price, quantity"
    );
}

#[tokio::test]
async fn blank_table_name_is_a_schema_error() {
    let pool = create_test_pool().await;

    for name in ["", "   "] {
        let err = SchemaRepository::new()
            .validate_sales_table(&pool, name)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
    }
}

#[tokio::test]
async fn hostile_table_name_is_rejected_without_side_effects() {
    let pool = seeded_pool(&[("2025-03-01", 10.0, 2)]).await;

    let err = SchemaRepository::new()
        .validate_sales_table(&pool, "ventas; DROP TABLE ventas; --")
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Schema { .. }));

    // A tabela original continua lá
    SchemaRepository::new()
        .validate_sales_table(&pool, "ventas")
        .await
        .unwrap();
}

#[tokio::test]
async fn unusual_table_names_are_quoted_in_queries() {
    let pool = create_test_pool().await;
    let name = "ventas \"2025\"";
    create_table_with(&pool, &name.replace('"', "\"\""), &REQUIRED_COLUMNS).await;

    let insert = r#"INSERT INTO "ventas ""2025""" ("date", unit_price, quantity) VALUES ('2025-06-01', 2.5, 4)"#;
    sqlx::query(insert).execute(&pool).await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let table = SchemaRepository::new()
        .validate_sales_table(&mut *conn, name)
        .await
        .unwrap();
    let daily = SalesRepository::new()
        .daily_totals(&mut *conn, &table, 6)
        .await
        .unwrap();

    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].total, dec!(10));
}
