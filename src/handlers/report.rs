// src/handlers/report.rs

use std::path::PathBuf;

use crate::{
    common::error::ReportError,
    config::AppState,
    services::{report_service::ReportData, ReportOutcome, ReportRequest},
};

/// Resultado de uma execução pronto para mostrar ao usuário.
#[derive(Debug)]
pub struct HandlerOutput {
    pub message: String,
    pub data: Option<ReportData>,
}

pub async fn generate_report(
    app_state: &AppState,
    request: ReportRequest,
    include_data: bool,
) -> Result<HandlerOutput, ReportError> {
    let service = &app_state.report_service;

    let data = service
        .collect(&app_state.db_pool, &request.table, request.month)
        .await?;

    let outcome = service.publish(&data, request.output_path.as_deref())?;

    Ok(HandlerOutput {
        message: outcome_message(&outcome),
        data: include_data.then_some(data),
    })
}

pub fn outcome_message(outcome: &ReportOutcome) -> String {
    match outcome {
        ReportOutcome::Generated(path) => {
            format!("✅ PDF generado correctamente en:\n{}", path.display())
        }
        ReportOutcome::Declined => "❌ No se guardó el archivo PDF".to_string(),
    }
}

/// Caminho de saída vazio conta como "não salvar".
pub fn normalize_output_path(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}
