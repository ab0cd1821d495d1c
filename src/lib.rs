//! # gridpage
//!
//! A grid-based document composer for fixed-size pages.
//!
//! A document is a list of rows. Each row is split into columns on a
//! 12-share grid (configurable), and each column holds elements: text,
//! images, lines, barcodes and QR codes. A header and a footer are repeated
//! on every page.
//!
//! Pages are allocated row by row. A row either fits in the space left above
//! the footer or moves to a fresh page as a whole; rows are never split.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    Document tree: rows, columns, elements
//!       ↓
//!   [layout]   Prepare elements, resolve grid shares, measure rows,
//!              allocate rows to pages
//!       ↓
//!   [render]   Element rectangles to draw commands
//!       ↓
//!   [pdf]      Serialize to PDF bytes
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod render;
pub mod style;
pub mod symbol;
pub mod text;

pub use assemble::RenderOutput;
pub use config::{DocumentConfig, Edges, Metadata, Unit};
pub use error::{ElementPath, GridError, Region};
pub use layout::LayoutWarning;
pub use model::{
    BarcodeProps, Column, Document, Element, ImageProps, ImageSource, LineProps, QrProps, Row,
    TextProps,
};
pub use style::{Align, Color, TextStyle};
pub use symbol::Symbology;

/// Render a document to PDF.
///
/// This is the primary entry point. Oversize rows are reported in
/// [`RenderOutput::warnings`]; every other problem is an error and no bytes
/// are produced.
pub fn render(document: &Document) -> Result<RenderOutput, GridError> {
    assemble::assemble(document)
}

/// Render a document described as JSON.
pub fn render_json(json: &str) -> Result<RenderOutput, GridError> {
    let document: Document = serde_json::from_str(json)?;
    render(&document)
}
