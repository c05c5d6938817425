// src/common/pdf_elements.rs

//! Elementos do genpdf que a crate não traz pronta: célula de tabela com
//! fundo colorido e texto centralizado.

use genpdf::error::Error;
use genpdf::style::{Color, LineStyle, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

const DEFAULT_CELL_PADDING_MM: f64 = 1.5;

/// Uma linha de texto centralizada, opcionalmente pintada com uma cor de fundo.
///
/// O genpdf 0.2 só sabe desenhar linhas, então o fundo é uma única linha
/// horizontal com a espessura da altura da célula.
pub struct ShadedCell {
    text: String,
    style: Style,
    background: Option<Color>,
    padding: Mm,
}

impl ShadedCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
            background: None,
            padding: Mm::from(DEFAULT_CELL_PADDING_MM),
        }
    }

    pub fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_background(mut self, background: impl Into<Option<Color>>) -> Self {
        self.background = background.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

impl Element for ShadedCell {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();

        let style = style.and(self.style);
        let string = StyledString::new(self.text.clone(), style);
        let text_width = string.width(&context.font_cache);
        let line_height = style.line_height(&context.font_cache);
        let height = line_height + self.padding + self.padding;
        let width = area.size().width;

        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        // Fundo primeiro, para o texto ficar por cima
        if let Some(color) = self.background {
            let middle = height / 2.0;
            area.draw_line(
                vec![Position::new(0, middle), Position::new(width, middle)],
                LineStyle::new().with_color(color).with_thickness(height),
            );
        }

        let x_offset = if text_width < width {
            (width - text_width) / 2.0
        } else {
            Mm::from(0)
        };

        match area.text_section(
            &context.font_cache,
            Position::new(x_offset, self.padding),
            style,
        ) {
            Some(mut section) => section.print_str(&string.s, style)?,
            None => {
                result.has_more = true;
                return Ok(result);
            }
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}
