// src/models/report.rs

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub const MONTH_TOTAL_LABEL: &str = "Total del mes";
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

// --- Tabela diária ---

/// Uma linha da tabela diária. A linha de total é uma variante própria, então
/// quem consome precisa tratá-la explicitamente.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SummaryRow {
    Day { date: NaiveDate, total: Decimal },
    MonthTotal { total: Decimal },
}

impl SummaryRow {
    /// Primeira coluna: "DD/MM/YYYY" ou o rótulo do total.
    pub fn label(&self) -> String {
        match self {
            SummaryRow::Day { date, .. } => date.format(DISPLAY_DATE_FORMAT).to_string(),
            SummaryRow::MonthTotal { .. } => MONTH_TOTAL_LABEL.to_string(),
        }
    }

    pub fn total(&self) -> Decimal {
        match self {
            SummaryRow::Day { total, .. } | SummaryRow::MonthTotal { total } => *total,
        }
    }

    /// Segunda coluna, sempre com 2 casas.
    pub fn display_total(&self) -> String {
        format!("{:.2}", self.total())
    }

    pub fn is_month_total(&self) -> bool {
        matches!(self, SummaryRow::MonthTotal { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    rows: Vec<SummaryRow>,
}

impl DailySummary {
    // Só o builder de resumo monta isso, garantindo o total no final
    pub(crate) fn from_rows(rows: Vec<SummaryRow>) -> Self {
        debug_assert!(matches!(rows.last(), Some(SummaryRow::MonthTotal { .. })));
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn day_rows(&self) -> &[SummaryRow] {
        &self.rows[..self.rows.len().saturating_sub(1)]
    }

    pub fn month_total(&self) -> Decimal {
        self.rows.last().map(SummaryRow::total).unwrap_or(Decimal::ZERO)
    }
}

// --- Série do gráfico mensal ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// --- Documento final ---

/// Tamanho de página, sem depender do genpdf neste módulo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// "A4" ou "Letter", sem diferenciar maiúsculas.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "carta" => Some(PageSize::Letter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    Title(String),
    Spacer(f64),
    Heading(String),
    DailyTable(DailySummary),
    ChartImage(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub page_size: PageSize,
    pub blocks: Vec<LayoutBlock>,
}
