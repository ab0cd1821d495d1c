//! # Row/Page Allocator
//!
//! Layout never builds a tall canvas to slice afterwards. Pages are opened
//! with known dimensions and each row asks the current page: "do you have
//! room for me?"
//!
//! 1. Open a page, draw the header at the top margin, put the cursor just
//!    below it
//! 2. Measure the next row (auto rows take their tallest column)
//! 3. If it fits above the footer reservation, place it and advance
//! 4. If not, close the page (draw the footer), open a new one, retry
//! 5. A row taller than the whole body gets a page to itself and a warning
//!
//! Header and footer are measured once and repeated on every page.

pub mod grid;
pub mod measure;

use serde::Serialize;

use crate::config::DocumentConfig;
use crate::error::{ElementPath, GridError};
use crate::render::{DrawCommand, Renderer};

use self::grid::{resolve_columns, ColumnSlot};
use self::measure::{Measurer, PreparedRow};

/// Slack for accumulated floating-point error in fit checks.
const FIT_EPSILON: f64 = 1e-6;

/// A finished page. Geometry is in document units, origin top-left.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// Non-fatal conditions reported next to a successful render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// A row taller than the body region was placed alone on its page and
    /// overflows into the footer area.
    OversizeRow {
        #[serde(skip)]
        path: ElementPath,
        row_height: f64,
        body_height: f64,
        page_index: usize,
    },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::OversizeRow {
                path,
                row_height,
                body_height,
                page_index,
            } => write!(
                f,
                "{path} is {row_height:.2} tall but the body holds {body_height:.2}; placed alone on page {}",
                page_index + 1
            ),
        }
    }
}

#[derive(Debug)]
pub struct LayoutResult {
    pub pages: Vec<LayoutPage>,
    pub warnings: Vec<LayoutWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllocState {
    Init,
    Accumulating,
    PageFull,
    Finalized,
}

/// A header or footer row with its measured geometry.
struct FixedRow<'r> {
    row: &'r PreparedRow,
    height: f64,
    slots: Vec<ColumnSlot>,
}

/// The page under construction.
struct PageCursor {
    commands: Vec<DrawCommand>,
    y: f64,
    rows: usize,
}

pub struct LayoutEngine<'a> {
    config: &'a DocumentConfig,
    measurer: &'a Measurer<'a>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a DocumentConfig, measurer: &'a Measurer<'a>) -> Self {
        Self { config, measurer }
    }

    fn slots(&self, row: &PreparedRow) -> Result<Vec<ColumnSlot>, GridError> {
        resolve_columns(
            self.config.margins.left,
            self.config.content_width(),
            &row.shares(),
            self.config.grid_total,
        )
        .map_err(|e| e.at(row.path))
    }

    fn measure_fixed<'r>(&self, rows: &'r [PreparedRow]) -> Result<Vec<FixedRow<'r>>, GridError> {
        rows.iter()
            .map(|row| {
                let slots = self.slots(row)?;
                let height = self.measurer.row_height(row, &slots);
                Ok(FixedRow { row, height, slots })
            })
            .collect()
    }

    /// Lay out body rows into pages, repeating header and footer.
    pub fn layout(
        &self,
        header: &[PreparedRow],
        footer: &[PreparedRow],
        body: &[PreparedRow],
    ) -> Result<LayoutResult, GridError> {
        let header = self.measure_fixed(header)?;
        let footer = self.measure_fixed(footer)?;
        let header_height: f64 = header.iter().map(|r| r.height).sum();
        let footer_height: f64 = footer.iter().map(|r| r.height).sum();

        let cfg = self.config;
        let body_top = cfg.margins.top + header_height;
        let body_bottom = cfg.height - cfg.margins.bottom - footer_height;
        let body_height = body_bottom - body_top;
        if body_height <= 0.0 {
            return Err(GridError::InvalidDocumentConfig(format!(
                "header ({header_height:.2}) and footer ({footer_height:.2}) leave no room for body rows"
            )));
        }

        let mut allocator = PageAllocator {
            engine: self,
            header: &header,
            footer: &footer,
            footer_top: body_bottom,
            body_top,
            body_bottom,
            state: AllocState::Init,
            pages: Vec::new(),
            current: None,
            warnings: Vec::new(),
        };
        allocator.open_page();

        for row in body {
            let slots = self.slots(row)?;
            let height = self.measurer.row_height(row, &slots);
            allocator.allocate(row, height, &slots);
        }

        Ok(allocator.finish())
    }
}

struct PageAllocator<'e, 'r> {
    engine: &'e LayoutEngine<'e>,
    header: &'e [FixedRow<'r>],
    footer: &'e [FixedRow<'r>],
    footer_top: f64,
    body_top: f64,
    body_bottom: f64,
    state: AllocState,
    pages: Vec<LayoutPage>,
    current: Option<PageCursor>,
    warnings: Vec<LayoutWarning>,
}

impl PageAllocator<'_, '_> {
    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(self.engine.measurer)
    }

    fn span(&self) -> (f64, f64) {
        let cfg = self.engine.config;
        (cfg.margins.left, cfg.content_width())
    }

    fn open_page(&mut self) {
        let mut commands = Vec::new();
        let mut y = self.engine.config.margins.top;
        let renderer = self.renderer();
        for fixed in self.header {
            renderer.render_row(
                fixed.row,
                y,
                fixed.height,
                &fixed.slots,
                self.span(),
                &mut commands,
            );
            y += fixed.height;
        }
        log::debug!("opened page {}", self.pages.len() + 1);
        self.current = Some(PageCursor {
            commands,
            y: self.body_top,
            rows: 0,
        });
        self.state = AllocState::Accumulating;
    }

    fn close_page(&mut self) {
        let Some(mut page) = self.current.take() else {
            return;
        };
        let mut y = self.footer_top;
        let renderer = self.renderer();
        for fixed in self.footer {
            renderer.render_row(
                fixed.row,
                y,
                fixed.height,
                &fixed.slots,
                self.span(),
                &mut page.commands,
            );
            y += fixed.height;
        }
        log::debug!(
            "closed page {} with {} rows",
            self.pages.len() + 1,
            page.rows
        );
        let cfg = self.engine.config;
        self.pages.push(LayoutPage {
            width: cfg.width,
            height: cfg.height,
            commands: page.commands,
        });
    }

    fn place(&mut self, row: &PreparedRow, height: f64, slots: &[ColumnSlot]) {
        let span = self.span();
        let renderer = Renderer::new(self.engine.measurer);
        if let Some(page) = self.current.as_mut() {
            renderer.render_row(row, page.y, height, slots, span, &mut page.commands);
            log::debug!("placed {} at y={:.2} h={:.2}", row.path, page.y, height);
            page.y += height;
            page.rows += 1;
        }
    }

    fn allocate(&mut self, row: &PreparedRow, height: f64, slots: &[ColumnSlot]) {
        let body_height = self.body_bottom - self.body_top;
        loop {
            match self.state {
                AllocState::Init | AllocState::PageFull => {
                    self.close_page();
                    self.open_page();
                }
                AllocState::Accumulating => {
                    let (y, rows) = match &self.current {
                        Some(page) => (page.y, page.rows),
                        None => (self.body_top, 0),
                    };

                    if height > body_height + FIT_EPSILON {
                        if rows > 0 {
                            self.state = AllocState::PageFull;
                            continue;
                        }
                        self.place(row, height, slots);
                        let warning = LayoutWarning::OversizeRow {
                            path: row.path,
                            row_height: height,
                            body_height,
                            page_index: self.pages.len(),
                        };
                        log::warn!("{warning}");
                        self.warnings.push(warning);
                        // Nothing else may share this page.
                        self.state = AllocState::PageFull;
                        return;
                    }

                    if y + height <= self.body_bottom + FIT_EPSILON {
                        self.place(row, height, slots);
                        return;
                    }
                    self.state = AllocState::PageFull;
                }
                AllocState::Finalized => return,
            }
        }
    }

    fn finish(mut self) -> LayoutResult {
        self.close_page();
        self.state = AllocState::Finalized;
        log::debug!("layout finished with {} pages", self.pages.len());
        LayoutResult {
            pages: self.pages,
            warnings: self.warnings,
        }
    }
}
