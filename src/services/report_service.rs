// src/services/report_service.rs

use std::path::{Path, PathBuf};

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    common::{error::ReportError, i18n::ReportLocale},
    db::{SalesRepository, SchemaRepository},
    models::{
        report::{ChartSeries, DailySummary},
        sales::{DailyTotal, MonthlyTotal, SalesMonth},
    },
    services::{
        chart_service::ChartService,
        document_service::DocumentService,
        month_labels::{build_chart_series, month_name},
        summary_service::build_summary,
    },
};

pub const REPORT_TITLE_PREFIX: &str = "Reporte de Ventas — ";

/// Parâmetros já coletados pela camada de entrada (CLI).
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub table: String,
    pub month: i64,
    pub output_path: Option<PathBuf>,
}

/// Dados agregados de uma execução, antes de virar PDF.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub title: String,
    pub month: SalesMonth,
    pub daily_summary: DailySummary,
    pub chart_series: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Generated(PathBuf),
    // O usuário não escolheu onde salvar: fim normal, sem PDF
    Declined,
}

#[derive(Clone)]
pub struct ReportService {
    schema_repo: SchemaRepository,
    sales_repo: SalesRepository,
    chart_service: ChartService,
    document_service: DocumentService,
    locale: ReportLocale,
    chart_path: PathBuf,
}

impl ReportService {
    pub fn new(
        schema_repo: SchemaRepository,
        sales_repo: SalesRepository,
        chart_service: ChartService,
        document_service: DocumentService,
        locale: ReportLocale,
        chart_path: PathBuf,
    ) -> Self {
        Self {
            schema_repo,
            sales_repo,
            chart_service,
            document_service,
            locale,
            chart_path,
        }
    }

    /// Valida a tabela, roda as duas agregações e monta os dados do relatório.
    pub async fn collect(
        &self,
        pool: &SqlitePool,
        table: &str,
        month: i64,
    ) -> Result<ReportData, ReportError> {
        // Mês inválido falha antes de tocar no banco
        let month = SalesMonth::new(month)?;
        let month_label = month_name(i64::from(month.number()), self.locale)?;

        let (daily, monthly) = self.query_totals(pool, table, month).await?;

        let daily_summary = build_summary(&daily);
        let chart_series = build_chart_series(&monthly, self.locale)?;

        tracing::info!(
            "Resumo de {}: {} dias, total do mês {:.2}",
            month_label,
            daily.len(),
            daily_summary.month_total()
        );

        Ok(ReportData {
            title: format!("{}{}", REPORT_TITLE_PREFIX, month_label),
            month,
            daily_summary,
            chart_series,
        })
    }

    /// Gera o gráfico e o PDF a partir de dados já agregados.
    pub fn publish(
        &self,
        data: &ReportData,
        output_path: Option<&Path>,
    ) -> Result<ReportOutcome, ReportError> {
        let Some(output_path) = output_path else {
            tracing::info!("Nenhum caminho de saída informado, PDF não gerado");
            return Ok(ReportOutcome::Declined);
        };

        let chart = self
            .chart_service
            .render_monthly_chart(&data.chart_series, &self.chart_path)?;

        self.document_service.assemble(
            &data.title,
            &data.daily_summary,
            chart.path(),
            output_path,
        )?;

        // O gráfico temporário é removido aqui, junto com o guard
        drop(chart);

        Ok(ReportOutcome::Generated(output_path.to_path_buf()))
    }

    // Uma conexão só, liberada ao sair do escopo mesmo se uma query falhar
    async fn query_totals(
        &self,
        pool: &SqlitePool,
        table: &str,
        month: SalesMonth,
    ) -> Result<(Vec<DailyTotal>, Vec<MonthlyTotal>), ReportError> {
        let mut conn = pool.acquire().await.map_err(ReportError::Connection)?;

        let table = self
            .schema_repo
            .validate_sales_table(&mut *conn, table)
            .await?;

        let daily = self
            .sales_repo
            .daily_totals(&mut *conn, &table, i64::from(month.number()))
            .await?;

        let monthly = self.sales_repo.monthly_totals(&mut *conn, &table).await?;

        tracing::debug!(
            "Tabela {}: {} dias no mês {}, {} meses no total",
            table.name(),
            daily.len(),
            month.number(),
            monthly.len()
        );

        Ok((daily, monthly))
    }
}
