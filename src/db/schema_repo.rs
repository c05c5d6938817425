// src/db/schema_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{common::error::ReportError, models::sales::REQUIRED_COLUMNS};

/// Nome de tabela que já foi conferido contra o schema real.
///
/// É a única forma de um nome de tabela chegar a uma query: identificadores não
/// podem ser passados como parâmetro, então o nome é validado e depois citado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesTable {
    name: String,
}

impl SalesTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identificador pronto para interpolar no SQL.
    pub fn quoted(&self) -> String {
        quote_identifier(&self.name)
    }
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone, Default)]
pub struct SchemaRepository;

impl SchemaRepository {
    pub fn new() -> Self {
        Self
    }

    // Confere se a tabela existe e expõe date, unit_price e quantity
    pub async fn validate_sales_table<'e, E>(
        &self,
        executor: E,
        table: &str,
    ) -> Result<SalesTable, ReportError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let table = table.trim();

        // Tabela vazia/inexistente cai no mesmo erro de schema
        if table.is_empty() {
            return Err(ReportError::Schema {
                table: table.to_string(),
                missing: REQUIRED_COLUMNS.to_vec(),
            });
        }

        // pragma_table_info aceita o nome como parâmetro; tabela inexistente = zero linhas
        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                .bind(table)
                .fetch_all(executor)
                .await?;

        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !columns.iter().any(|column| column == required))
            .collect();

        if !missing.is_empty() {
            tracing::debug!("Tabela '{}' tem as colunas {:?}", table, columns);
            return Err(ReportError::Schema {
                table: table.to_string(),
                missing,
            });
        }

        Ok(SalesTable {
            name: table.to_string(),
        })
    }
}
