// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro do pipeline, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("A tabela '{table}' não possui as colunas obrigatórias (faltando: {missing:?})")]
    Schema {
        table: String,
        missing: Vec<&'static str>,
    },

    #[error("Mês inválido: {0} (esperado 1-12)")]
    InvalidMonth(i64),

    #[error("Nenhum locale disponível para os nomes dos meses ({primary}, {fallback})")]
    LocaleUnavailable { primary: String, fallback: String },

    // Falha ao abrir/adquirir a conexão (arquivo inexistente, timeout...)
    #[error("Falha ao conectar ao banco de dados: {0}")]
    Connection(#[source] sqlx::Error),

    // Qualquer erro de SQL depois que a conexão já existe
    #[error("Erro de banco de dados")]
    Query(#[from] sqlx::Error),

    #[error("Dado inválido na tabela de vendas: {0}")]
    InvalidData(String),

    #[error("Falha ao gerar o gráfico: {0}")]
    Chart(String),

    #[error("Falha ao montar o PDF: {0}")]
    Assembly(String),
}

impl ReportError {
    /// Mensagem exibida ao usuário final (o relatório é em espanhol).
    pub fn user_message(&self) -> String {
        match self {
            ReportError::Schema { .. } => {
                "❌ La tabla no contiene las columnas necesarias: date, unit_price, quantity".to_string()
            }
            ReportError::InvalidMonth(month) => {
                format!("❌ El mes {} no es válido, ingrese un número entre 1 y 12", month)
            }
            ReportError::LocaleUnavailable { primary, fallback } => format!(
                "❌ No se pudo configurar el idioma español ({} / {})",
                primary, fallback
            ),
            ReportError::Connection(e) => {
                format!("❌ Error al conectar con la base de datos: {}", e)
            }
            ReportError::Query(e) => format!("❌ Error al consultar las ventas: {}", e),
            ReportError::InvalidData(detail) => {
                format!("❌ La tabla contiene datos no válidos: {}", detail)
            }
            ReportError::Chart(detail) => format!("❌ No se pudo generar el gráfico: {}", detail),
            ReportError::Assembly(detail) => {
                format!("❌ No se pudo generar el PDF: {}", detail)
            }
        }
    }
}
