// src/services/month_labels.rs

use chrono::{TimeZone, Utc};

use crate::{
    common::{error::ReportError, i18n::ReportLocale},
    models::{
        report::{ChartPoint, ChartSeries},
        sales::{MonthlyTotal, SalesMonth},
    },
    services::summary_service::round_money,
};

/// Nome do mês no idioma pedido, com a primeira letra maiúscula ("Marzo").
pub fn month_name(month: i64, locale: ReportLocale) -> Result<String, ReportError> {
    let month = SalesMonth::new(month)?;

    // Qualquer ano serve, só o mês importa para o %B
    let first_day = Utc
        .with_ymd_and_hms(2000, month.number(), 1, 0, 0, 0)
        .single()
        .ok_or(ReportError::InvalidMonth(i64::from(month.number())))?;

    let name = first_day.format_localized("%B", locale.0).to_string();
    Ok(capitalize(&name))
}

/// Converte os totais mensais nos pares (rótulo, valor) do gráfico, mesma ordem.
pub fn build_chart_series(
    monthly_totals: &[MonthlyTotal],
    locale: ReportLocale,
) -> Result<ChartSeries, ReportError> {
    let points = monthly_totals
        .iter()
        .map(|entry| {
            Ok(ChartPoint {
                label: month_name(i64::from(entry.month.number()), locale)?,
                value: round_money(entry.total),
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(ChartSeries { points })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
