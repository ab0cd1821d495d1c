//! # Document Model
//!
//! The input representation for the engine: a strict tree of
//! Document > Row > Column > Element. Rows stack vertically, columns split a
//! row horizontally by grid shares, and elements are the leaf content.
//!
//! The tree can be built in Rust with the constructor methods below or
//! deserialized from JSON:
//!
//! ```json
//! {
//!   "config": { "width": 120, "height": 200 },
//!   "header": [{ "height": 16, "columns": [{ "size": 12, "elements": [
//!     { "type": "text", "content": "ShowBees", "style": { "weight": "bold" } }
//!   ]}]}],
//!   "rows": [{ "columns": [{ "size": 12, "elements": [
//!     { "type": "qrCode", "value": "1\nPlanet of the Gophers", "center": true }
//!   ]}]}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::DocumentConfig;
use crate::style::{Color, LineStyle, TextStyle};
use crate::symbol::Symbology;

/// A complete document ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub config: DocumentConfig,

    /// Rows repeated at the top of every page.
    #[serde(default)]
    pub header: Vec<Row>,

    /// Rows repeated at the bottom of every page.
    #[serde(default)]
    pub footer: Vec<Row>,

    /// Body rows, in order.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Document {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn header(mut self, row: Row) -> Self {
        self.header.push(row);
        self
    }

    pub fn footer(mut self, row: Row) -> Self {
        self.footer.push(row);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }
}

/// A horizontal band of columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Fixed height in document units; `None` sizes the row to its tallest
    /// column.
    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub background: Option<Color>,
}

impl Row {
    /// A row of fixed height. Without columns it is vertical whitespace.
    pub fn new(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    /// A row sized to its content.
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn add(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Width as a share of the grid total.
    pub size: i32,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Column {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    pub fn add(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }
}

/// Leaf content of a column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Text(TextProps),
    Image(ImageProps),
    Line(LineProps),
    Barcode(BarcodeProps),
    QrCode(QrProps),
}

impl Element {
    /// Vertical offset from the top of the cell, in document units.
    pub fn top(&self) -> f64 {
        match self {
            Element::Text(p) => p.top,
            Element::Image(p) => p.top,
            Element::Line(p) => p.top,
            Element::Barcode(p) => p.top,
            Element::QrCode(p) => p.top,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub top: f64,
}

impl TextProps {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }
}

/// Where image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    /// A file on disk.
    Path(String),
    /// Base64 data or a `data:` URI.
    Base64(String),
    /// Bytes supplied directly by a Rust caller.
    #[serde(skip)]
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub source: ImageSource,
    /// Share of the cell width the image may occupy, 0..=100.
    #[serde(default = "default_percent")]
    pub percent: f64,
    /// Center the image in its cell instead of anchoring it top-left.
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub top: f64,
}

impl ImageProps {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            percent: 100.0,
            center: false,
            top: 0.0,
        }
    }

    pub fn percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    /// Stroke thickness in document units.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub style: LineStyle,
    /// Share of the cell width the line spans, centered.
    #[serde(default = "default_percent")]
    pub size_percent: f64,
    #[serde(default)]
    pub top: f64,
}

impl Default for LineProps {
    fn default() -> Self {
        Self {
            thickness: default_thickness(),
            color: Color::BLACK,
            style: LineStyle::Solid,
            size_percent: 100.0,
            top: 0.0,
        }
    }
}

impl LineProps {
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }

    pub fn size_percent(mut self, percent: f64) -> Self {
        self.size_percent = percent;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeProps {
    pub value: String,
    #[serde(default)]
    pub symbology: Symbology,
    #[serde(default = "default_percent")]
    pub percent: f64,
    /// Narrow bar width in document units. Overrides `percent`.
    #[serde(default)]
    pub module_width: Option<f64>,
    /// Symbol height as a fraction of its width.
    #[serde(default = "default_proportion")]
    pub proportion: f64,
    #[serde(default)]
    pub center: bool,
    /// All-digit values shorter than this are zero-padded on the left.
    #[serde(default)]
    pub min_digits: usize,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub top: f64,
}

impl BarcodeProps {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            symbology: Symbology::default(),
            percent: 100.0,
            module_width: None,
            proportion: default_proportion(),
            center: false,
            min_digits: 0,
            color: Color::BLACK,
            top: 0.0,
        }
    }

    pub fn symbology(mut self, symbology: Symbology) -> Self {
        self.symbology = symbology;
        self
    }

    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }

    pub fn min_digits(mut self, digits: usize) -> Self {
        self.min_digits = digits;
        self
    }

    pub fn module_width(mut self, width: f64) -> Self {
        self.module_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrProps {
    pub value: String,
    #[serde(default = "default_percent")]
    pub percent: f64,
    /// Module edge length in document units. Overrides `percent`.
    #[serde(default)]
    pub module_size: Option<f64>,
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub top: f64,
}

impl QrProps {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            percent: 100.0,
            module_size: None,
            center: false,
            color: Color::BLACK,
            top: 0.0,
        }
    }

    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }

    pub fn module_size(mut self, size: f64) -> Self {
        self.module_size = Some(size);
        self
    }
}

fn default_percent() -> f64 {
    100.0
}

fn default_thickness() -> f64 {
    0.2
}

fn default_proportion() -> f64 {
    0.2
}

impl From<TextProps> for Element {
    fn from(p: TextProps) -> Self {
        Element::Text(p)
    }
}

impl From<ImageProps> for Element {
    fn from(p: ImageProps) -> Self {
        Element::Image(p)
    }
}

impl From<LineProps> for Element {
    fn from(p: LineProps) -> Self {
        Element::Line(p)
    }
}

impl From<BarcodeProps> for Element {
    fn from(p: BarcodeProps) -> Self {
        Element::Barcode(p)
    }
}

impl From<QrProps> for Element {
    fn from(p: QrProps) -> Self {
        Element::QrCode(p)
    }
}
