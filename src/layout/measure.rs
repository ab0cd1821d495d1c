//! # Measurement
//!
//! Element preparation and intrinsic sizing.
//!
//! Preparation runs once per document before layout: text styles are
//! resolved against the base style, image headers are probed and symbol
//! values are encoded. Every failure is tagged with the element's path.
//! Measurement then answers one question for the allocator: how tall is this
//! element at a given width. All lengths are in document units except font
//! sizes, which stay in points.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::Unit;
use crate::error::{ElementPath, GridError, Region};
use crate::font::{FontContext, FontKey};
use crate::image_loader::{ImageStore, SourceImage};
use crate::model::{Element, LineProps, Row};
use crate::style::{BaseStyle, Color, ResolvedTextStyle};
use crate::symbol::{self, LinearSymbol, QrMatrix};
use crate::text::{BrokenLine, TextLayout};

use super::grid::ColumnSlot;

/// An element with everything resolved that can fail.
#[derive(Debug, Clone)]
pub struct PreparedElement {
    /// Offset from the top of the cell.
    pub top: f64,
    pub kind: PreparedKind,
}

#[derive(Debug, Clone)]
pub enum PreparedKind {
    Text {
        content: String,
        style: ResolvedTextStyle,
        font: FontKey,
    },
    Image {
        image: Arc<SourceImage>,
        percent: f64,
        center: bool,
    },
    Line(LineProps),
    Barcode {
        symbol: LinearSymbol,
        percent: f64,
        module_width: Option<f64>,
        proportion: f64,
        center: bool,
        color: Color,
    },
    QrCode {
        matrix: QrMatrix,
        percent: f64,
        module_size: Option<f64>,
        center: bool,
        color: Color,
    },
}

#[derive(Debug, Clone)]
pub struct PreparedColumn {
    pub size: i32,
    pub elements: Vec<PreparedElement>,
}

#[derive(Debug, Clone)]
pub struct PreparedRow {
    pub path: ElementPath,
    pub height: Option<f64>,
    pub background: Option<Color>,
    pub columns: Vec<PreparedColumn>,
}

impl PreparedRow {
    pub fn shares(&self) -> Vec<i32> {
        self.columns.iter().map(|c| c.size).collect()
    }
}

/// Shared state for preparing one document's rows.
pub struct Preparer<'a> {
    pub fonts: &'a FontContext,
    pub base: &'a BaseStyle,
    pub images: &'a mut ImageStore,
}

impl Preparer<'_> {
    pub fn prepare_rows(
        &mut self,
        rows: &[Row],
        region: Region,
    ) -> Result<Vec<PreparedRow>, GridError> {
        rows.iter()
            .enumerate()
            .map(|(r, row)| {
                let path = ElementPath::row(region, r);
                if let Some(h) = row.height {
                    if !h.is_finite() || h < 0.0 {
                        return Err(GridError::InvalidDocumentConfig(format!(
                            "{path}: row height must be non-negative, got {h}"
                        )));
                    }
                }
                let columns = row
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(c, column)| {
                        let elements = column
                            .elements
                            .iter()
                            .enumerate()
                            .map(|(e, el)| {
                                let at = path.column(c).element(e);
                                self.prepare_element(el, at).map_err(|err| err.at(at))
                            })
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(PreparedColumn {
                            size: column.size,
                            elements,
                        })
                    })
                    .collect::<Result<Vec<_>, GridError>>()?;
                Ok(PreparedRow {
                    path,
                    height: row.height,
                    background: row.background,
                    columns,
                })
            })
            .collect()
    }

    fn prepare_element(
        &mut self,
        element: &Element,
        path: ElementPath,
    ) -> Result<PreparedElement, GridError> {
        let kind = match element {
            Element::Text(p) => {
                let style = p.style.resolve(self.base);
                if !(style.font_size.is_finite() && style.font_size > 0.0) {
                    return Err(GridError::InvalidDocumentConfig(format!(
                        "{path}: font size must be positive, got {}",
                        style.font_size
                    )));
                }
                let font = self.fonts.resolve_key(
                    &style.font_family,
                    style.weight.value(),
                    style.italic(),
                );
                PreparedKind::Text {
                    content: p.content.clone(),
                    style,
                    font,
                }
            }
            Element::Image(p) => PreparedKind::Image {
                image: self.images.load(&p.source, path)?,
                percent: p.percent,
                center: p.center,
            },
            Element::Line(p) => PreparedKind::Line(p.clone()),
            Element::Barcode(p) => PreparedKind::Barcode {
                symbol: symbol::encode_barcode(&p.value, p.symbology, p.min_digits)?,
                percent: p.percent,
                module_width: p.module_width,
                proportion: p.proportion,
                center: p.center,
                color: p.color,
            },
            Element::QrCode(p) => PreparedKind::QrCode {
                matrix: symbol::qr::encode(&p.value)?,
                percent: p.percent,
                module_size: p.module_size,
                center: p.center,
                color: p.color,
            },
        };
        Ok(PreparedElement {
            top: element.top(),
            kind,
        })
    }
}

/// A percent value as a 0..=1 fraction.
pub(crate) fn fraction(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0) / 100.0
    } else {
        1.0
    }
}

/// Intrinsic sizes at a given width.
pub struct Measurer<'a> {
    pub fonts: &'a FontContext,
    pub unit: Unit,
    text: TextLayout,
}

impl<'a> Measurer<'a> {
    pub fn new(fonts: &'a FontContext, unit: Unit) -> Self {
        Self {
            fonts,
            unit,
            text: TextLayout::new(),
        }
    }

    /// Wrapped lines of a text block at `width`.
    pub fn text_lines(
        &self,
        content: &str,
        style: &ResolvedTextStyle,
        font: &FontKey,
        width: f64,
    ) -> Vec<BrokenLine> {
        self.text.break_into_lines(
            self.fonts,
            content,
            width * self.unit.points(),
            style.font_size,
            font,
        )
    }

    /// Height of one text line.
    pub fn line_height(&self, style: &ResolvedTextStyle) -> f64 {
        self.unit.from_points(style.font_size * style.line_height)
    }

    pub fn measure_text(
        &self,
        content: &str,
        style: &ResolvedTextStyle,
        font: &FontKey,
        width: f64,
    ) -> f64 {
        self.text_lines(content, style, font, width).len() as f64 * self.line_height(style)
    }

    /// Image height when it spans `percent` of `width`, keeping its aspect.
    pub fn measure_image(&self, image: &SourceImage, percent: f64, width: f64) -> f64 {
        width * fraction(percent) * image.aspect()
    }

    /// Width and height of a barcode in a cell `width` wide.
    pub fn barcode_size(
        &self,
        symbol: &LinearSymbol,
        percent: f64,
        module_width: Option<f64>,
        proportion: f64,
        width: f64,
    ) -> (f64, f64) {
        let w = match module_width {
            Some(m) if m > 0.0 => m * symbol.module_count() as f64,
            _ => width * fraction(percent),
        }
        .min(width)
        .max(0.0);
        (w, w * proportion.max(0.0))
    }

    /// Edge length of a QR symbol in a cell `width` wide.
    pub fn qr_side(
        &self,
        matrix: &QrMatrix,
        percent: f64,
        module_size: Option<f64>,
        width: f64,
    ) -> f64 {
        match module_size {
            Some(m) if m > 0.0 => m * matrix.size as f64,
            _ => width * fraction(percent),
        }
        .min(width)
        .max(0.0)
    }

    pub fn measure_line(&self, line: &LineProps) -> f64 {
        line.thickness.max(0.0)
    }

    /// Intrinsic height of an element at `width`, excluding its `top`.
    pub fn element_height(&self, element: &PreparedElement, width: f64) -> f64 {
        match &element.kind {
            PreparedKind::Text {
                content,
                style,
                font,
            } => self.measure_text(content, style, font, width),
            PreparedKind::Image { image, percent, .. } => {
                self.measure_image(image, *percent, width)
            }
            PreparedKind::Line(line) => self.measure_line(line),
            PreparedKind::Barcode {
                symbol,
                percent,
                module_width,
                proportion,
                ..
            } => {
                self.barcode_size(symbol, *percent, *module_width, *proportion, width)
                    .1
            }
            PreparedKind::QrCode {
                matrix,
                percent,
                module_size,
                ..
            } => self.qr_side(matrix, *percent, *module_size, width),
        }
    }

    /// Tallest `top + height` over a column's elements.
    pub fn column_height(&self, column: &PreparedColumn, width: f64) -> f64 {
        column
            .elements
            .iter()
            .map(|e| e.top.max(0.0) + self.element_height(e, width))
            .fold(0.0, f64::max)
    }

    /// The declared height, or the tallest column for auto rows.
    pub fn row_height(&self, row: &PreparedRow, slots: &[ColumnSlot]) -> f64 {
        if let Some(h) = row.height {
            return h;
        }

        #[cfg(feature = "parallel")]
        let heights: Vec<f64> = row
            .columns
            .par_iter()
            .zip(slots.par_iter())
            .map(|(column, slot)| self.column_height(column, slot.width))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let heights: Vec<f64> = row
            .columns
            .iter()
            .zip(slots)
            .map(|(column, slot)| self.column_height(column, slot.width))
            .collect();

        heights.into_iter().fold(0.0, f64::max)
    }
}
