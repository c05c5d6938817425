//! Integration tests for chart rendering and PDF assembly
//!
//! Failure paths run everywhere. The rendering tests need the Roboto fonts in
//! `./fonts` and are ignored by default: `cargo test -- --ignored`.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::fs;
use std::path::Path;

use rust_decimal_macros::dec;

use helpers::*;
use sales_report::{
    common::error::ReportError,
    config::{self, AppConfig},
    models::{
        report::{ChartPoint, ChartSeries},
        sales::DailyTotal,
    },
    services::{
        summary_service::build_summary, ChartService, DocumentService, ReportOutcome,
    },
};

const FONTS_DIR: &str = "./fonts";

fn fonts_installed() -> bool {
    ["Roboto-Regular.ttf", "Roboto-Bold.ttf", "Roboto-Italic.ttf", "Roboto-BoldItalic.ttf"]
        .iter()
        .all(|f| Path::new(FONTS_DIR).join(f).is_file())
}

fn assert_fonts_installed() {
    assert!(
        fonts_installed(),
        "Roboto fonts missing from {}, see fonts/README.md",
        FONTS_DIR
    );
}

fn march_summary() -> sales_report::models::report::DailySummary {
    build_summary(&[DailyTotal {
        date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        total: dec!(25),
    }])
}

fn series() -> ChartSeries {
    ChartSeries {
        points: vec![
            ChartPoint { label: "Enero".into(), value: dec!(100.00) },
            ChartPoint { label: "Febrero".into(), value: dec!(50.00) },
        ],
    }
}

#[test]
fn missing_chart_image_is_an_assembly_error() {
    let output = temp_path("missing_chart.pdf");
    let chart = temp_path("no_such_chart.png");

    let err = DocumentService::new(FONTS_DIR)
        .assemble("Reporte de Ventas — Marzo", &march_summary(), &chart, &output)
        .unwrap_err();

    assert!(matches!(err, ReportError::Assembly(_)));
    assert!(!output.exists());
}

#[test]
fn output_in_missing_directory_is_an_assembly_error() {
    let chart = temp_path("dummy_chart_dir.png");
    fs::write(&chart, b"not really a png").unwrap();
    let output = temp_path("no_such_dir").join("reporte.pdf");

    let err = DocumentService::new(FONTS_DIR)
        .assemble("Reporte de Ventas — Marzo", &march_summary(), &chart, &output)
        .unwrap_err();

    assert!(matches!(err, ReportError::Assembly(ref msg) if msg.contains("no_such_dir")));
    fs::remove_file(&chart).ok();
}

#[test]
fn directory_as_output_is_an_assembly_error() {
    let chart = temp_path("dummy_chart_outdir.png");
    fs::write(&chart, b"not really a png").unwrap();

    let err = DocumentService::new(FONTS_DIR)
        .assemble("Reporte", &march_summary(), &chart, &std::env::temp_dir())
        .unwrap_err();

    assert!(matches!(err, ReportError::Assembly(_)));
    fs::remove_file(&chart).ok();
}

#[test]
fn missing_fonts_are_an_assembly_error() {
    let chart = temp_path("dummy_chart_fonts.png");
    fs::write(&chart, b"not really a png").unwrap();
    let output = temp_path("no_fonts.pdf");

    let err = DocumentService::new(temp_path("no_fonts_here"))
        .assemble("Reporte", &march_summary(), &chart, &output)
        .unwrap_err();

    assert!(matches!(err, ReportError::Assembly(ref msg) if msg.contains("Roboto")));
    assert!(!output.exists());
    assert!(err.user_message().starts_with("❌ No se pudo generar el PDF"));
    fs::remove_file(&chart).ok();
}

#[test]
fn chart_fails_cleanly_without_a_font() {
    // Com as fontes instaladas outro teste pode já ter registrado a Roboto
    if fonts_installed() {
        return;
    }

    let chart = temp_path("chart_without_font.png");
    let result =
        ChartService::new(temp_path("no_fonts_here")).render_monthly_chart(&series(), &chart);

    assert!(matches!(result, Err(ReportError::Chart(_))));
    assert!(!chart.exists());
}

#[test]
#[ignore = "needs the Roboto fonts in ./fonts"]
fn chart_file_lives_as_long_as_the_artifact() {
    assert_fonts_installed();

    let chart_path = temp_path("artifact_chart.png");
    fs::write(&chart_path, b"stale").unwrap();

    let artifact = ChartService::new(FONTS_DIR)
        .render_monthly_chart(&series(), &chart_path)
        .unwrap();

    let (width, height) = image::image_dimensions(artifact.path()).unwrap();
    assert_eq!((width, height), (1000, 600));

    drop(artifact);
    assert!(!chart_path.exists());
}

#[tokio::test]
#[ignore = "needs the Roboto fonts in ./fonts"]
async fn full_report_is_written_and_chart_is_cleaned_up() {
    assert_fonts_installed();

    let pool = seeded_pool(&[
        ("2025-01-10", 50.0, 2),
        ("2025-03-01", 10.0, 2),
        ("2025-03-01", 5.0, 1),
    ])
    .await;

    let chart_path = temp_path("full_report_chart.png");
    let output = temp_path("reporte_marzo.pdf");
    fs::remove_file(&output).ok();

    let config = AppConfig {
        fonts_dir: FONTS_DIR.into(),
        chart_path: chart_path.clone(),
        ..AppConfig::default()
    };
    let service = config::build_report_service(&config).unwrap();

    let data = service.collect(&pool, "ventas", 3).await.unwrap();
    let outcome = service.publish(&data, Some(output.as_path())).unwrap();

    assert_eq!(outcome, ReportOutcome::Generated(output.clone()));
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(!chart_path.exists());

    fs::remove_file(&output).ok();
}
