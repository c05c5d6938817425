// src/services/summary_service.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    report::{DailySummary, SummaryRow},
    sales::DailyTotal,
};

pub const MONEY_DECIMALS: u32 = 2;

/// Arredondamento monetário usado em todo o relatório (meio para cima).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Monta a tabela diária com a linha "Total del mes" no final.
///
/// O total do mês é somado sobre os valores originais e só depois tudo é
/// arredondado, uma única vez.
pub fn build_summary(daily_totals: &[DailyTotal]) -> DailySummary {
    let month_total: Decimal = daily_totals.iter().map(|day| day.total).sum();

    let mut rows: Vec<SummaryRow> = daily_totals
        .iter()
        .map(|day| SummaryRow::Day {
            date: day.date,
            total: round_money(day.total),
        })
        .collect();

    rows.push(SummaryRow::MonthTotal {
        total: round_money(month_total),
    });

    DailySummary::from_rows(rows)
}
