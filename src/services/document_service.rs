// src/services/document_service.rs

use std::path::{Path, PathBuf};

use genpdf::{elements, style, Alignment, Element, Scale};

use crate::{
    common::{error::ReportError, pdf_elements::ShadedCell},
    models::report::{DailySummary, LayoutBlock, PageSize, ReportDocument},
};

pub const DAILY_HEADING: &str = "Ventas por Día";
pub const MONTHLY_HEADING: &str = "Ventas Totales por Mes";
pub const TABLE_HEADERS: [&str; 2] = ["Fecha", "Total"];

const FONT_FAMILY_NAME: &str = "Roboto";
const SPACER_LINES: f64 = 1.5;
const PAGE_MARGINS_MM: i32 = 15;

// Largura alvo da imagem do gráfico na página (mm) e DPI padrão do genpdf
const CHART_WIDTH_MM: f64 = 176.0;
const GENPDF_DEFAULT_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

// Cores da tabela
const HEADER_BACKGROUND: style::Color = style::Color::Rgb(128, 128, 128);
const HEADER_FOREGROUND: style::Color = style::Color::Rgb(245, 245, 245);
const TOTAL_BACKGROUND: style::Color = style::Color::Rgb(173, 216, 230);

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
    page_size: PageSize,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            page_size: PageSize::A4,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Ordem fixa: título, espaço, tabela diária, espaço, gráfico mensal.
    pub fn compose(
        &self,
        title: &str,
        summary: &DailySummary,
        chart_image_path: &Path,
    ) -> ReportDocument {
        ReportDocument {
            title: title.to_string(),
            page_size: self.page_size,
            blocks: vec![
                LayoutBlock::Title(title.to_string()),
                LayoutBlock::Spacer(SPACER_LINES),
                LayoutBlock::Heading(DAILY_HEADING.to_string()),
                LayoutBlock::DailyTable(summary.clone()),
                LayoutBlock::Spacer(SPACER_LINES),
                LayoutBlock::Heading(MONTHLY_HEADING.to_string()),
                LayoutBlock::ChartImage(chart_image_path.to_path_buf()),
            ],
        }
    }

    /// Monta e grava o PDF em `output_path`.
    pub fn assemble(
        &self,
        title: &str,
        summary: &DailySummary,
        chart_image_path: &Path,
        output_path: &Path,
    ) -> Result<(), ReportError> {
        // 1. Valida as entradas antes de qualquer trabalho
        if !chart_image_path.is_file() {
            return Err(ReportError::Assembly(format!(
                "imagem do gráfico não encontrada em {}",
                chart_image_path.display()
            )));
        }

        if output_path.as_os_str().is_empty() || output_path.is_dir() {
            return Err(ReportError::Assembly(format!(
                "caminho de saída inválido: '{}'",
                output_path.display()
            )));
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ReportError::Assembly(format!(
                    "diretório de saída não existe: {}",
                    parent.display()
                )));
            }
        }

        // 2. Layout lógico
        let report = self.compose(title, summary, chart_image_path);

        // 3. Renderiza com o genpdf
        let document = self.render_document(&report)?;
        document.render_to_file(output_path).map_err(|e| {
            ReportError::Assembly(format!(
                "não foi possível gravar {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::info!("📄 PDF gravado em {}", output_path.display());
        Ok(())
    }

    fn render_document(&self, report: &ReportDocument) -> Result<genpdf::Document, ReportError> {
        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, FONT_FAMILY_NAME, None)
            .map_err(|e| {
                ReportError::Assembly(format!(
                    "fonte {} não encontrada em {}: {}",
                    FONT_FAMILY_NAME,
                    self.fonts_dir.display(),
                    e
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(report.title.clone());
        doc.set_paper_size(match report.page_size {
            PageSize::A4 => genpdf::PaperSize::A4,
            PageSize::Letter => genpdf::PaperSize::Letter,
        });

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(PAGE_MARGINS_MM);
        doc.set_page_decorator(decorator);

        for block in &report.blocks {
            match block {
                LayoutBlock::Title(text) => doc.push(
                    elements::Paragraph::new(text.as_str())
                        .aligned(Alignment::Center)
                        .styled(style::Style::new().bold().with_font_size(18)),
                ),
                LayoutBlock::Spacer(lines) => doc.push(elements::Break::new(*lines)),
                LayoutBlock::Heading(text) => doc.push(
                    elements::Paragraph::new(text.as_str())
                        .styled(style::Style::new().bold().with_font_size(14)),
                ),
                LayoutBlock::DailyTable(summary) => doc.push(daily_table(summary)?),
                LayoutBlock::ChartImage(path) => doc.push(chart_image(path)?),
            }
        }

        Ok(doc)
    }
}

// --- TABELA DIÁRIA ---
// Duas colunas de mesma largura, tudo centralizado e com grade
fn daily_table(summary: &DailySummary) -> Result<elements::TableLayout, ReportError> {
    let table_err = |e: genpdf::error::Error| ReportError::Assembly(format!("tabela: {}", e));

    let mut table = elements::TableLayout::new(vec![1, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    for [first, second] in table_cells(summary) {
        table
            .row()
            .element(first)
            .element(second)
            .push()
            .map_err(table_err)?;
    }

    Ok(table)
}

// Cabeçalho cinza com texto claro, linhas dos dias sem fundo, total em azul claro
fn table_cells(summary: &DailySummary) -> Vec<[ShadedCell; 2]> {
    let header_style = style::Style::new().bold().with_color(HEADER_FOREGROUND);
    let header = TABLE_HEADERS.map(|label| {
        ShadedCell::new(label)
            .styled(header_style)
            .with_background(HEADER_BACKGROUND)
    });

    let body = summary.rows().iter().map(|row| {
        let background = row.is_month_total().then_some(TOTAL_BACKGROUND);
        let style = if row.is_month_total() {
            style::Style::new().bold()
        } else {
            style::Style::new()
        };

        [row.label(), row.display_total()].map(|text| {
            ShadedCell::new(text)
                .styled(style)
                .with_background(background)
        })
    });

    std::iter::once(header).chain(body).collect()
}

// --- GRÁFICO ---
fn chart_image(path: &Path) -> Result<elements::Image, ReportError> {
    let (width_px, _) = image::image_dimensions(path).map_err(|e| {
        ReportError::Assembly(format!("imagem do gráfico ilegível {}: {}", path.display(), e))
    })?;

    let natural_width_mm = MM_PER_INCH * f64::from(width_px) / GENPDF_DEFAULT_DPI;
    let scale = if natural_width_mm > f64::EPSILON {
        CHART_WIDTH_MM / natural_width_mm
    } else {
        1.0
    };

    let image = elements::Image::from_path(path)
        .map_err(|e| ReportError::Assembly(format!("imagem do gráfico: {}", e)))?
        .with_alignment(Alignment::Center)
        .with_scale(Scale::new(scale, scale));

    Ok(image)
}
