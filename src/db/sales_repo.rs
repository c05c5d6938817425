// src/db/sales_repo.rs

use chrono::NaiveDate;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use sqlx::{Executor, Sqlite};

use crate::{
    common::error::ReportError,
    db::schema_repo::SalesTable,
    models::sales::{DailyTotal, DailyTotalRow, MonthlyTotal, MonthlyTotalRow, SalesMonth},
};

#[derive(Clone, Default)]
pub struct SalesRepository;

impl SalesRepository {
    pub fn new() -> Self {
        Self
    }

    // 1. Vendas por dia dentro do mês (qualquer ano)
    pub async fn daily_totals<'e, E>(
        &self,
        executor: E,
        table: &SalesTable,
        month: i64,
    ) -> Result<Vec<DailyTotal>, ReportError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        // Mês inválido nunca vira uma lista vazia
        let month = SalesMonth::new(month)?;

        // O valor é calculado por linha (preço x quantidade) antes do SUM.
        // GROUP BY usa a expressão: uma coluna "day" da tabela venceria o alias
        let sql = format!(
            r#"
            SELECT
                date("date") AS day,
                TOTAL("unit_price" * "quantity") AS total
            FROM {}
            WHERE strftime('%m', "date") = ?1
            GROUP BY date("date")
            ORDER BY date("date") ASC
            "#,
            table.quoted()
        );

        let rows = sqlx::query_as::<_, DailyTotalRow>(&sql)
            .bind(month.as_sql_code())
            .fetch_all(executor)
            .await?;

        rows.into_iter()
            .map(|row| {
                let date = NaiveDate::parse_from_str(&row.day, "%Y-%m-%d").map_err(|e| {
                    ReportError::InvalidData(format!("data '{}': {}", row.day, e))
                })?;
                Ok(DailyTotal {
                    date,
                    total: to_decimal(row.total)?,
                })
            })
            .collect()
    }

    // 2. Vendas por mês (todos os anos somados no mesmo mês)
    pub async fn monthly_totals<'e, E>(
        &self,
        executor: E,
        table: &SalesTable,
    ) -> Result<Vec<MonthlyTotal>, ReportError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            r#"
            SELECT
                CAST(strftime('%m', "date") AS INTEGER) AS month,
                TOTAL("unit_price" * "quantity") AS total
            FROM {}
            WHERE strftime('%m', "date") IS NOT NULL
            GROUP BY CAST(strftime('%m', "date") AS INTEGER)
            ORDER BY CAST(strftime('%m', "date") AS INTEGER) ASC
            "#,
            table.quoted()
        );

        let rows = sqlx::query_as::<_, MonthlyTotalRow>(&sql)
            .fetch_all(executor)
            .await?;

        rows.into_iter()
            .map(|row| {
                let month = SalesMonth::new(row.month)
                    .map_err(|_| ReportError::InvalidData(format!("mês {}", row.month)))?;
                Ok(MonthlyTotal {
                    month,
                    total: to_decimal(row.total)?,
                })
            })
            .collect()
    }
}

fn to_decimal(value: f64) -> Result<Decimal, ReportError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ReportError::InvalidData(format!("total {} fora do intervalo", value)))
}
