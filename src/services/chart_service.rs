// src/services/chart_service.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use rust_decimal::prelude::ToPrimitive;

use crate::{common::error::ReportError, models::report::ChartSeries};

pub const CHART_TITLE: &str = "Ventas por Mes";
pub const X_AXIS_TITLE: &str = "Ventas ($)";
pub const Y_AXIS_TITLE: &str = "Mes";

// 10x6 em proporção, como a figura do relatório
pub const CHART_WIDTH_PX: u32 = 1000;
pub const CHART_HEIGHT_PX: u32 = 600;

const CHART_FONT_FILE: &str = "Roboto-Regular.ttf";
const CHART_FONT_FAMILY: &str = "sans-serif";
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

static FONT_REGISTERED: OnceLock<()> = OnceLock::new();

/// Imagem do gráfico em disco. O arquivo é removido quando o valor sai de escopo,
/// então nenhum caminho de erro deixa um PNG velho para a próxima execução.
#[derive(Debug)]
pub struct ChartArtifact {
    path: PathBuf,
}

impl ChartArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ChartArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Não foi possível remover o gráfico temporário {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[derive(Clone)]
pub struct ChartService {
    fonts_dir: PathBuf,
}

impl ChartService {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
        }
    }

    /// Desenha o gráfico de barras horizontais (valor no eixo X, mês no eixo Y).
    pub fn render_monthly_chart(
        &self,
        series: &ChartSeries,
        output_path: &Path,
    ) -> Result<ChartArtifact, ReportError> {
        // Um arquivo de uma execução anterior nunca é reaproveitado
        if output_path.exists() {
            fs::remove_file(output_path).map_err(|e| {
                ReportError::Chart(format!(
                    "não foi possível substituir {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ReportError::Chart(e.to_string()))?;
            }
        }

        self.ensure_font_registered()?;

        // A partir daqui o guard garante a limpeza se o desenho falhar
        let artifact = ChartArtifact {
            path: output_path.to_path_buf(),
        };

        draw_horizontal_bars(series, output_path)?;

        if !output_path.is_file() {
            return Err(ReportError::Chart(format!(
                "o gráfico não foi gravado em {}",
                output_path.display()
            )));
        }

        tracing::debug!(
            "Gráfico mensal com {} barras gravado em {}",
            series.len(),
            output_path.display()
        );

        Ok(artifact)
    }

    // O backend ab_glyph não procura fontes do sistema, então registramos a
    // mesma Roboto usada no PDF. Só o sucesso fica gravado: uma pasta errada
    // não impede uma nova tentativa com outra configuração
    fn ensure_font_registered(&self) -> Result<(), ReportError> {
        if FONT_REGISTERED.get().is_some() {
            return Ok(());
        }

        let font_path = self.fonts_dir.join(CHART_FONT_FILE);
        let bytes = fs::read(&font_path).map_err(|e| {
            ReportError::Chart(format!("fonte {}: {}", font_path.display(), e))
        })?;
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

        register_font(CHART_FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
            ReportError::Chart(format!("fonte inválida em {}", font_path.display()))
        })?;

        let _ = FONT_REGISTERED.set(());
        Ok(())
    }
}

fn draw_horizontal_bars(series: &ChartSeries, output_path: &Path) -> Result<(), ReportError> {
    let labels = series.labels();
    let values: Vec<f64> = series
        .points
        .iter()
        .map(|p| p.value.to_f64().unwrap_or(0.0))
        .collect();

    let bars = values.len().max(1) as i32;
    let x_max = values.iter().copied().fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let root = BitMapBackend::new(output_path, (CHART_WIDTH_PX, CHART_HEIGHT_PX))
        .into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, (CHART_FONT_FAMILY, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(120)
        .build_cartesian_2d(0f64..x_max, (0..bars).into_segmented())
        .map_err(chart_err)?;

    let label_for = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(index) => labels
            .get(*index as usize)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .y_labels(bars as usize)
        .y_label_formatter(&label_for)
        .x_label_formatter(&|value: &f64| format!("{:.0}", value))
        .label_style((CHART_FONT_FAMILY, 16))
        .axis_desc_style((CHART_FONT_FAMILY, 18))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(BAR_COLOR.filled())
                .margin(8)
                .data(values.iter().enumerate().map(|(i, v)| (i as i32, *v))),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}
