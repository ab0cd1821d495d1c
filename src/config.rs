//! # Document Configuration
//!
//! Page geometry, grid total, base style and output options. All geometry is
//! expressed in the document [`Unit`] (millimeters unless stated otherwise);
//! font sizes are always points.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::style::{BaseStyle, Color};

/// Physical unit used for page size, margins, row heights and offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    #[default]
    Mm,
    Pt,
    In,
}

impl Unit {
    /// How many PDF points one unit spans.
    pub fn points(&self) -> f64 {
        match self {
            Unit::Mm => 72.0 / 25.4,
            Unit::Pt => 1.0,
            Unit::In => 72.0,
        }
    }

    /// Convert a length in points into this unit.
    pub fn from_points(&self, pt: f64) -> f64 {
        pt / self.points()
    }
}

/// Edge values (top, right, bottom, left) used for page margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

/// Document metadata written into the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
}

/// A custom TrueType font to register before layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Family name elements refer to (e.g. "Inter").
    pub family: String,
    /// File path, base64 data, or a data URI.
    pub src: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub italic: bool,
}

fn default_weight() -> u32 {
    400
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentConfig {
    /// Page width in `unit`.
    pub width: f64,
    /// Page height in `unit`.
    pub height: f64,
    pub unit: Unit,
    pub margins: Edges,
    /// Number of shares a full-width row is divided into.
    pub grid_total: i32,
    pub base: BaseStyle,
    pub metadata: Metadata,
    pub fonts: Vec<FontEntry>,
    /// Deflate content streams and image data.
    pub compress: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            unit: Unit::Mm,
            margins: Edges {
                top: 10.0,
                right: 10.0,
                bottom: 20.0,
                left: 10.0,
            },
            grid_total: 12,
            base: BaseStyle::default(),
            metadata: Metadata::default(),
            fonts: Vec::new(),
            compress: true,
        }
    }
}

impl DocumentConfig {
    pub fn builder() -> DocumentConfigBuilder {
        DocumentConfigBuilder::default()
    }

    /// Width available to rows, between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.margins.horizontal()
    }

    /// Check page geometry, grid total and base style.
    pub fn validate(&self) -> Result<(), GridError> {
        let invalid = |msg: String| Err(GridError::InvalidDocumentConfig(msg));

        if !(self.width.is_finite() && self.width > 0.0) {
            return invalid(format!("page width must be positive, got {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return invalid(format!("page height must be positive, got {}", self.height));
        }

        let m = &self.margins;
        for (name, value, limit) in [
            ("left", m.left, self.width / 2.0),
            ("right", m.right, self.width / 2.0),
            ("top", m.top, self.height / 2.0),
            ("bottom", m.bottom, self.height / 2.0),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} margin must be non-negative, got {value}"));
            }
            if value > limit {
                return invalid(format!(
                    "{name} margin {value} exceeds half the page dimension ({limit})"
                ));
            }
        }

        if self.grid_total <= 0 {
            return invalid(format!(
                "grid total must be positive, got {}",
                self.grid_total
            ));
        }
        if !(self.base.font_size.is_finite() && self.base.font_size > 0.0) {
            return invalid(format!(
                "base font size must be positive, got {}",
                self.base.font_size
            ));
        }
        if !(self.base.line_height.is_finite() && self.base.line_height > 0.0) {
            return invalid(format!(
                "line height must be positive, got {}",
                self.base.line_height
            ));
        }
        Ok(())
    }
}

/// Fluent construction of a [`DocumentConfig`], validated on `build`.
#[derive(Debug, Clone, Default)]
pub struct DocumentConfigBuilder {
    config: DocumentConfig,
}

impl DocumentConfigBuilder {
    pub fn dimensions(mut self, width: f64, height: f64) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn margins(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.config.margins = Edges {
            top,
            right,
            bottom,
            left,
        };
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.config.unit = unit;
        self
    }

    pub fn grid_total(mut self, total: i32) -> Self {
        self.config.grid_total = total;
        self
    }

    pub fn font_family(mut self, family: &str) -> Self {
        self.config.base.font_family = family.to_string();
        self
    }

    pub fn base_font_size(mut self, size: f64) -> Self {
        self.config.base.font_size = size;
        self
    }

    pub fn line_height(mut self, factor: f64) -> Self {
        self.config.base.line_height = factor;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.base.color = color;
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.config.metadata = metadata;
        self
    }

    pub fn font(mut self, entry: FontEntry) -> Self {
        self.config.fonts.push(entry);
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    pub fn build(self) -> Result<DocumentConfig, GridError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
