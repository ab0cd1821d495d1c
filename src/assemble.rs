//! # Document Assembler
//!
//! Drives one render from start to finish: validate the configuration, load
//! fonts, prepare every element, allocate rows to pages and serialize.
//! Any error aborts the whole document; there is no partial output.

use serde::Serialize;

use crate::error::{GridError, Region};
use crate::font::FontContext;
use crate::image_loader::ImageStore;
use crate::layout::measure::{Measurer, Preparer};
use crate::layout::{LayoutEngine, LayoutWarning};
use crate::model::Document;
use crate::pdf::PdfWriter;

/// The finished document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<LayoutWarning>,
}

pub fn assemble(document: &Document) -> Result<RenderOutput, GridError> {
    let config = &document.config;
    config.validate()?;

    let fonts = FontContext::with_fonts(&config.fonts)?;
    let mut images = ImageStore::new();

    let (header, footer, body) = {
        let mut preparer = Preparer {
            fonts: &fonts,
            base: &config.base,
            images: &mut images,
        };
        (
            preparer.prepare_rows(&document.header, Region::Header)?,
            preparer.prepare_rows(&document.footer, Region::Footer)?,
            preparer.prepare_rows(&document.rows, Region::Body)?,
        )
    };
    log::debug!(
        "prepared {} header, {} footer and {} body rows ({} images)",
        header.len(),
        footer.len(),
        body.len(),
        images.len()
    );

    let measurer = Measurer::new(&fonts, config.unit);
    let layout = LayoutEngine::new(config, &measurer).layout(&header, &footer, &body)?;

    let bytes = PdfWriter::new()
        .compress(config.compress)
        .write(&layout.pages, config.unit, &config.metadata, &fonts)?;

    log::info!(
        "rendered {} pages ({} bytes, {} warnings)",
        layout.pages.len(),
        bytes.len(),
        layout.warnings.len()
    );
    Ok(RenderOutput {
        bytes,
        page_count: layout.pages.len(),
        warnings: layout.warnings,
    })
}
