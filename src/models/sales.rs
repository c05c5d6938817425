// src/models/sales.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::common::error::ReportError;

/// Colunas que a tabela de vendas precisa expor (comparação exata, case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "unit_price", "quantity"];

// --- Mês do calendário (1-12) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SalesMonth(u32);

impl SalesMonth {
    pub fn new(value: i64) -> Result<Self, ReportError> {
        match u32::try_from(value) {
            Ok(month @ 1..=12) => Ok(SalesMonth(month)),
            _ => Err(ReportError::InvalidMonth(value)),
        }
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    // Formato usado pelo strftime('%m') do SQLite
    pub fn as_sql_code(&self) -> String {
        format!("{:02}", self.0)
    }
}

// --- Linhas cruas vindas do SQLite ---

// O driver sqlite do sqlx não decodifica Decimal, então o total vem como REAL
// (TOTAL() sempre devolve REAL) e é convertido no repositório.
#[derive(Debug, FromRow)]
pub struct DailyTotalRow {
    pub day: String,
    pub total: f64,
}

#[derive(Debug, FromRow)]
pub struct MonthlyTotalRow {
    pub month: i64,
    pub total: f64,
}

// --- Resultados da agregação ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: SalesMonth,
    pub total: Decimal,
}
