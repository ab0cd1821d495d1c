//! # Element Renderer
//!
//! Turns a placed row into draw commands. Every element kind is handled by
//! one arm of an exhaustive match; each arm writes commands that stay inside
//! the element's cell (text that cannot wrap is the one exception, and it
//! overflows to the right).
//!
//! Coordinates are document units with the origin at the page's top-left
//! corner. The PDF writer flips them.

use std::sync::Arc;

use crate::font::FontKey;
use crate::image_loader::SourceImage;
use crate::layout::grid::ColumnSlot;
use crate::layout::measure::{fraction, Measurer, PreparedElement, PreparedKind, PreparedRow};
use crate::style::{Align, Color, LineStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One line of positioned text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f64,
    /// Distance from the page top to the baseline.
    pub baseline: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
    },
    Stroke {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f64,
        color: Color,
        style: LineStyle,
    },
    Text {
        lines: Vec<TextLine>,
        font: FontKey,
        /// Font size in points.
        size: f64,
        color: Color,
    },
    Image {
        image: Arc<SourceImage>,
        rect: Rect,
    },
}

/// Draws rows into command lists.
pub struct Renderer<'a> {
    measurer: &'a Measurer<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(measurer: &'a Measurer<'a>) -> Self {
        Self { measurer }
    }

    /// Draw `row` at vertical offset `y` with its resolved height and slots.
    /// `span` is the horizontal extent of the row background.
    pub fn render_row(
        &self,
        row: &PreparedRow,
        y: f64,
        height: f64,
        slots: &[ColumnSlot],
        span: (f64, f64),
        out: &mut Vec<DrawCommand>,
    ) {
        if let Some(color) = row.background {
            out.push(DrawCommand::Fill {
                rect: Rect {
                    x: span.0,
                    y,
                    width: span.1,
                    height,
                },
                color,
            });
        }
        for (column, slot) in row.columns.iter().zip(slots) {
            for element in &column.elements {
                let top = element.top.max(0.0);
                let cell = Rect {
                    x: slot.x,
                    y: y + top,
                    width: slot.width,
                    height: (height - top).max(0.0),
                };
                self.render_element(element, cell, out);
            }
        }
    }

    pub fn render_element(
        &self,
        element: &PreparedElement,
        cell: Rect,
        out: &mut Vec<DrawCommand>,
    ) {
        let m = self.measurer;
        match &element.kind {
            PreparedKind::Text {
                content,
                style,
                font,
            } => {
                let line_h = m.line_height(style);
                let size_u = m.unit.from_points(style.font_size);
                let ascent = m.unit.from_points(m.fonts.ascent(font, style.font_size));
                let lead = (line_h - size_u) / 2.0;
                let lines = m
                    .text_lines(content, style, font, cell.width)
                    .into_iter()
                    .enumerate()
                    .filter(|(_, l)| !l.text.is_empty())
                    .map(|(i, l)| {
                        let w = m.unit.from_points(l.width);
                        let x = match style.align {
                            Align::Start => cell.x,
                            Align::Center => cell.x + (cell.width - w) / 2.0,
                            Align::End => cell.x + cell.width - w,
                        };
                        TextLine {
                            x,
                            baseline: cell.y + i as f64 * line_h + lead + ascent,
                            text: l.text,
                        }
                    })
                    .collect::<Vec<_>>();
                if !lines.is_empty() {
                    out.push(DrawCommand::Text {
                        lines,
                        font: font.clone(),
                        size: style.font_size,
                        color: style.color,
                    });
                }
            }

            PreparedKind::Image {
                image,
                percent,
                center,
            } => {
                let mut w = cell.width * fraction(*percent);
                let mut h = w * image.aspect();
                if h > cell.height {
                    h = cell.height;
                    w = h / image.aspect();
                }
                if w > 0.0 && h > 0.0 {
                    out.push(DrawCommand::Image {
                        image: Arc::clone(image),
                        rect: place(cell, w, h, *center),
                    });
                }
            }

            PreparedKind::Line(line) => {
                let len = cell.width * fraction(line.size_percent);
                let x0 = cell.x + (cell.width - len) / 2.0;
                let cy = cell.y + cell.height / 2.0;
                if len > 0.0 && line.thickness > 0.0 {
                    out.push(DrawCommand::Stroke {
                        from: (x0, cy),
                        to: (x0 + len, cy),
                        thickness: line.thickness,
                        color: line.color,
                        style: line.style,
                    });
                }
            }

            PreparedKind::Barcode {
                symbol,
                percent,
                module_width,
                proportion,
                center,
                color,
            } => {
                let (w, h) =
                    m.barcode_size(symbol, *percent, *module_width, *proportion, cell.width);
                let h = h.min(cell.height);
                if w <= 0.0 || h <= 0.0 {
                    return;
                }
                let area = place(cell, w, h, *center);
                let module = w / symbol.module_count() as f64;
                for (start, len) in symbol.bars() {
                    out.push(DrawCommand::Fill {
                        rect: Rect {
                            x: area.x + start as f64 * module,
                            y: area.y,
                            width: len as f64 * module,
                            height: h,
                        },
                        color: *color,
                    });
                }
            }

            PreparedKind::QrCode {
                matrix,
                percent,
                module_size,
                center,
                color,
            } => {
                let side = m
                    .qr_side(matrix, *percent, *module_size, cell.width)
                    .min(cell.height);
                if side <= 0.0 {
                    return;
                }
                let area = place(cell, side, side, *center);
                let module = side / matrix.size as f64;
                for (row, start, len) in matrix.dark_runs() {
                    out.push(DrawCommand::Fill {
                        rect: Rect {
                            x: area.x + start as f64 * module,
                            y: area.y + row as f64 * module,
                            width: len as f64 * module,
                            height: module,
                        },
                        color: *color,
                    });
                }
            }
        }
    }
}

/// Position a `w`×`h` box in `cell`, centered on both axes or at the
/// top-left corner.
fn place(cell: Rect, w: f64, h: f64, center: bool) -> Rect {
    let (x, y) = if center {
        (
            cell.x + (cell.width - w) / 2.0,
            cell.y + (cell.height - h) / 2.0,
        )
    } else {
        (cell.x, cell.y)
    };
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}
