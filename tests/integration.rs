//! Integration tests for the gridpage rendering pipeline.
//!
//! These tests exercise the full path from a document tree (or JSON) to PDF
//! output. They verify:
//! - Rows are allocated to the right number of pages
//! - Header and footer repeat on every page
//! - Auto rows take the height of their content
//! - Errors point at the offending element
//! - PDF output is structurally valid

use std::io::Cursor;

use gridpage::config::DocumentConfig;
use gridpage::error::Region;
use gridpage::font::FontContext;
use gridpage::image_loader::ImageStore;
use gridpage::layout::measure::{Measurer, Preparer};
use gridpage::layout::{LayoutEngine, LayoutResult};
use gridpage::render::DrawCommand;
use gridpage::style::FontSlant;
use gridpage::*;

// ─── Helpers ────────────────────────────────────────────────────

/// 120 x 200 mm with 10 mm margins: the content box is 100 x 180.
fn config() -> DocumentConfig {
    DocumentConfig::builder()
        .dimensions(120.0, 200.0)
        .margins(10.0, 10.0, 10.0, 10.0)
        .compress(false)
        .build()
        .unwrap()
}

fn text_row(height: f64, content: &str) -> Row {
    Row::new(height).add(Column::new(12).add(TextProps::new(content)))
}

fn line_row(height: f64) -> Row {
    Row::new(height).add(Column::new(12).add(LineProps::default()))
}

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([20, 120, 220]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

/// Run preparation and layout without serializing.
fn layout(doc: &Document) -> LayoutResult {
    let fonts = FontContext::new();
    let mut images = ImageStore::new();
    let mut preparer = Preparer {
        fonts: &fonts,
        base: &doc.config.base,
        images: &mut images,
    };
    let header = preparer.prepare_rows(&doc.header, Region::Header).unwrap();
    let footer = preparer.prepare_rows(&doc.footer, Region::Footer).unwrap();
    let body = preparer.prepare_rows(&doc.rows, Region::Body).unwrap();
    let measurer = Measurer::new(&fonts, doc.config.unit);
    LayoutEngine::new(&doc.config, &measurer)
        .layout(&header, &footer, &body)
        .unwrap()
}

fn stroke_ys(commands: &[DrawCommand]) -> Vec<f64> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Stroke { from, .. } => Some(from.1),
            _ => None,
        })
        .collect()
}

fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    assert!(bytes.windows(5).any(|w| w == b"%%EOF"), "Missing %%EOF marker");
    assert!(bytes.windows(4).any(|w| w == b"xref"), "Missing xref table");
    assert!(bytes.windows(7).any(|w| w == b"trailer"), "Missing trailer");
}

// ─── Page Allocation Tests ──────────────────────────────────────

#[test]
fn test_fitting_rows_make_one_page() {
    let doc = Document::new(config()).rows((0..5).map(|i| text_row(20.0, &format!("Row {i}"))));
    let out = render(&doc).unwrap();
    assert_valid_pdf(&out.bytes);
    assert_eq!(out.page_count, 1);
    assert!(out.warnings.is_empty());
    assert!(pdf_text(&out.bytes).contains("/Count 1"));
}

#[test]
fn test_empty_document_still_has_a_page() {
    let out = render(&Document::new(config())).unwrap();
    assert_valid_pdf(&out.bytes);
    assert_eq!(out.page_count, 1);
}

#[test]
fn test_overflow_repeats_header_and_footer() {
    // body = 180 - 10 - 10 = 160; ten rows of 40 -> four per page -> 3 pages
    let doc = Document::new(config())
        .header(text_row(10.0, "Header"))
        .footer(text_row(10.0, "Footer"))
        .rows((0..10).map(|_| line_row(40.0)));
    let out = render(&doc).unwrap();
    assert_eq!(out.page_count, 3);

    let text = pdf_text(&out.bytes);
    assert_eq!(text.matches("(Header) Tj").count(), 3);
    assert_eq!(text.matches("(Footer) Tj").count(), 3);

    let result = layout(&doc);
    let per_page: Vec<usize> = result
        .pages
        .iter()
        .map(|p| stroke_ys(&p.commands).len())
        .collect();
    assert_eq!(per_page, vec![4, 4, 2]);
}

#[test]
fn test_three_half_body_rows_make_two_pages() {
    let doc = Document::new(config()).rows((0..3).map(|_| line_row(90.0)));
    let result = layout(&doc);
    assert_eq!(result.pages.len(), 2);
    let second = stroke_ys(&result.pages[1].commands);
    assert_eq!(second.len(), 1);
    // alone at the top of page 2
    assert!((second[0] - 55.0).abs() < 1e-9);
}

#[test]
fn test_oversize_row_is_placed_alone_with_warning() {
    let doc = Document::new(config())
        .row(line_row(10.0))
        .row(line_row(400.0))
        .row(line_row(10.0));
    let out = render(&doc).unwrap();
    assert_eq!(out.page_count, 3);
    assert_eq!(out.warnings.len(), 1);
    let LayoutWarning::OversizeRow { path, row_height, .. } = &out.warnings[0];
    assert_eq!(path.region, Region::Body);
    assert_eq!(path.row, Some(1));
    assert!((row_height - 400.0).abs() < 1e-9);
}

// ─── Measurement Tests ──────────────────────────────────────────

#[test]
fn test_wrapped_text_sets_auto_row_height() {
    // three 16-character words; no two fit on one 100 mm line at 12 pt
    let word = "M".repeat(16);
    let content = format!("{word} {word} {word}");
    assert_eq!(content.chars().count(), 50);

    let doc = Document::new(config())
        .row(Row::auto().add(
            Column::new(12).add(TextProps::new(&content).style(TextStyle::default().size(12.0))),
        ))
        .row(line_row(10.0));
    let result = layout(&doc);
    assert_eq!(result.pages.len(), 1);

    let commands = &result.pages[0].commands;
    let lines = commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Text { lines, .. } => Some(lines.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(lines, 3);

    // 3 lines x 12 pt x 1.2 = 43.2 pt = 15.24 mm
    let row_height = 3.0 * 12.0 * 1.2 * 25.4 / 72.0;
    let line_y = stroke_ys(commands)[0];
    assert!((line_y - (10.0 + row_height + 5.0)).abs() < 1e-6, "{line_y}");
}

#[test]
fn test_image_row_keeps_aspect_ratio() {
    let doc = Document::new(config())
        .row(Row::auto().add(Column::new(6).add(ImageProps::new(ImageSource::Bytes(png(4, 2))))));
    let result = layout(&doc);
    let rect = result.pages[0]
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Image { rect, .. } => Some(*rect),
            _ => None,
        })
        .unwrap();
    assert!((rect.width - 50.0).abs() < 1e-9);
    assert!((rect.height - 25.0).abs() < 1e-9);
}

#[test]
fn test_shared_image_is_embedded_once() {
    let logo = ImageSource::Bytes(png(8, 8));
    let doc = Document::new(config())
        .header(Row::new(10.0).add(Column::new(3).add(ImageProps::new(logo.clone()))))
        .rows(
            (0..6).map(|_| Row::new(60.0).add(Column::new(4).add(ImageProps::new(logo.clone())))),
        );
    let out = render(&doc).unwrap();
    assert!(out.page_count > 1);
    let text = pdf_text(&out.bytes);
    assert_eq!(text.matches("/Subtype /Image").count(), 1);
}

// ─── Error Tests ────────────────────────────────────────────────

#[test]
fn test_margins_over_half_page_rejected() {
    let mut cfg = config();
    cfg.margins.top = 101.0;
    let doc = Document::new(cfg).row(text_row(10.0, "never laid out"));
    assert!(matches!(
        render(&doc),
        Err(GridError::InvalidDocumentConfig(_))
    ));
}

#[test]
fn test_header_and_footer_filling_page_rejected() {
    let doc = Document::new(config())
        .header(line_row(100.0))
        .footer(line_row(80.0));
    assert!(matches!(
        render(&doc),
        Err(GridError::InvalidDocumentConfig(_))
    ));
}

#[test]
fn test_unencodable_barcode_points_at_element() {
    let doc = Document::new(config()).row(
        Row::new(20.0)
            .add(Column::new(6))
            .add(
                Column::new(6)
                    .add(TextProps::new("label"))
                    .add(BarcodeProps::new("12ab").symbology(Symbology::Ean13)),
            ),
    );
    let err = render(&doc).unwrap_err();
    assert!(matches!(err, GridError::UnencodableValue { .. }));
    assert_eq!(
        err.path(),
        Some(&ElementPath::row(Region::Body, 0).column(1).element(1))
    );
}

#[test]
fn test_missing_image_is_unreadable() {
    let doc = Document::new(config()).header(
        Row::new(10.0).add(Column::new(4).add(ImageProps::new(ImageSource::Path(
            "/nonexistent/logo.png".into(),
        )))),
    );
    let err = render(&doc).unwrap_err();
    assert!(matches!(err, GridError::UnreadableImage { .. }));
    assert_eq!(err.path().map(|p| p.region), Some(Region::Header));
}

#[test]
fn test_cmyk_jpeg_rejected_with_element_path() {
    // SOI, then a SOF0 frame header declaring 4 color components.
    let cmyk = vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x01, 0x00, 0x01, 0x04,
    ];
    let doc = Document::new(config())
        .row(Row::new(10.0))
        .row(Row::new(20.0).add(Column::new(6).add(ImageProps::new(ImageSource::Bytes(cmyk)))));
    let err = render(&doc).unwrap_err();
    assert!(matches!(err, GridError::UnreadableImage { .. }));
    assert_eq!(
        err.path(),
        Some(&ElementPath::row(Region::Body, 1).column(0).element(0))
    );
}

#[test]
fn test_zero_font_size_is_config_error() {
    let text = TextProps::new("x").style(TextStyle::default().size(0.0));
    let doc = Document::new(config()).row(Row::auto().add(Column::new(12).add(text)));
    let err = render(&doc).unwrap_err();
    assert!(matches!(err, GridError::InvalidDocumentConfig(_)));
    assert!(err.to_string().contains("body row 0 / column 0 / element 0"));
}

#[test]
fn test_negative_share_is_invalid_grid() {
    let doc = Document::new(config()).row(Row::new(10.0).add(Column::new(-1)));
    assert!(matches!(
        render(&doc),
        Err(GridError::InvalidGridSpec { .. })
    ));
}

// ─── Output Tests ───────────────────────────────────────────────

#[test]
fn test_page_placeholders() {
    let doc = Document::new(config())
        .footer(text_row(10.0, "Page {{pageNumber}} of {{totalPages}}"))
        .rows((0..2).map(|_| line_row(100.0)));
    let out = render(&doc).unwrap();
    assert_eq!(out.page_count, 2);
    let text = pdf_text(&out.bytes);
    assert!(text.contains("(Page 1 of 2) Tj"));
    assert!(text.contains("(Page 2 of 2) Tj"));
}

#[test]
fn test_metadata_in_pdf() {
    let mut cfg = config();
    cfg.metadata = Metadata {
        title: Some("Ticket #1".to_string()),
        author: Some("ShowBees".to_string()),
        ..Metadata::default()
    };
    let out = render(&Document::new(cfg)).unwrap();
    let text = pdf_text(&out.bytes);
    assert!(text.contains("/Title (Ticket #1)"));
    assert!(text.contains("/Author (ShowBees)"));
}

#[test]
fn test_italic_bold_fonts_registered() {
    let doc = Document::new(config()).row(
        Row::new(10.0)
            .add(Column::new(6).add(TextProps::new("a").style(TextStyle::default().bold())))
            .add(Column::new(6).add(TextProps::new("b").style(TextStyle {
                slant: Some(FontSlant::Italic),
                ..TextStyle::default()
            }))),
    );
    let text = pdf_text(&render(&doc).unwrap().bytes);
    assert!(text.contains("/BaseFont /Helvetica-Bold "));
    assert!(text.contains("/BaseFont /Helvetica-Oblique "));
}

// ─── JSON Tests ─────────────────────────────────────────────────

#[test]
fn test_render_json() {
    let json = r#"{
        "config": {
            "width": 120, "height": 200,
            "margins": { "top": 10, "right": 10, "bottom": 10, "left": 10 },
            "metadata": { "title": "From JSON" }
        },
        "footer": [{ "height": 5, "columns": [{ "size": 12, "elements": [
            { "type": "text", "content": "footer", "style": { "align": "center" } }
        ]}]}],
        "rows": [
            { "background": { "r": 240, "g": 240, "b": 240 }, "columns": [
                { "size": 8, "elements": [{ "type": "text", "content": "Planet of the Gophers" }] },
                { "size": 4, "elements": [{ "type": "qrCode", "value": "1\nGophedorium", "center": true }] }
            ]},
            { "height": 15, "columns": [{ "size": 12, "elements": [
                { "type": "barcode", "value": "400638133393", "symbology": "ean13", "center": true }
            ]}]}
        ]
    }"#;
    let out = render_json(json).unwrap();
    assert_valid_pdf(&out.bytes);
    assert_eq!(out.page_count, 1);
}

#[test]
fn test_render_json_parse_error_has_hint() {
    let err = render_json(r#"{ "rows": [ { "columns": 3 } ] }"#).unwrap_err();
    assert!(matches!(err, GridError::Parse { .. }));
    assert!(err.to_string().contains("Hint"));
}
