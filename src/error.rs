//! Structured error types for the grid engine.
//!
//! Every variant is terminal for the document being rendered. Element-level
//! failures carry an [`ElementPath`] so callers can point at the offending
//! row, column and element.

use std::fmt;

use thiserror::Error;

/// Which part of the document a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    Header,
    #[default]
    Body,
    Footer,
}

/// Location of a row, column or element inside the content tree.
///
/// An empty path (no row) stands for the document as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementPath {
    pub region: Region,
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub element: Option<usize>,
}

impl ElementPath {
    pub fn row(region: Region, row: usize) -> Self {
        Self {
            region,
            row: Some(row),
            column: None,
            element: None,
        }
    }

    pub fn column(self, column: usize) -> Self {
        Self {
            column: Some(column),
            ..self
        }
    }

    pub fn element(self, element: usize) -> Self {
        Self {
            element: Some(element),
            ..self
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = match self.region {
            Region::Header => "header",
            Region::Body => "body",
            Region::Footer => "footer",
        };
        let Some(row) = self.row else {
            return write!(f, "document");
        };
        write!(f, "{region} row {row}")?;
        if let Some(column) = self.column {
            write!(f, " / column {column}")?;
        }
        if let Some(element) = self.element {
            write!(f, " / element {element}")?;
        }
        Ok(())
    }
}

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum GridError {
    /// A row's column shares cannot be resolved against the grid.
    #[error("invalid grid spec at {path}: {reason}")]
    InvalidGridSpec { path: ElementPath, reason: String },

    /// Page size, margins, grid total or fonts are unusable.
    #[error("invalid document config: {0}")]
    InvalidDocumentConfig(String),

    /// An image source could not be read or its header could not be decoded.
    #[error("unreadable image at {path}: {reason}")]
    UnreadableImage { path: ElementPath, reason: String },

    /// A barcode or QR value violates the symbology's constraints.
    #[error("cannot encode {value:?} at {path}: {reason}")]
    UnencodableValue {
        path: ElementPath,
        value: String,
        reason: String,
    },

    /// The finished pages could not be written to the output format.
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// JSON input failed to parse as a valid document.
    #[error("failed to parse document: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl GridError {
    pub(crate) fn grid(reason: impl Into<String>) -> Self {
        GridError::InvalidGridSpec {
            path: ElementPath::default(),
            reason: reason.into(),
        }
    }

    pub(crate) fn image(reason: impl Into<String>) -> Self {
        GridError::UnreadableImage {
            path: ElementPath::default(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unencodable(value: &str, reason: impl Into<String>) -> Self {
        GridError::UnencodableValue {
            path: ElementPath::default(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach the location of the failing row/element. Variants without a
    /// path are returned unchanged.
    pub fn at(self, location: ElementPath) -> Self {
        match self {
            GridError::InvalidGridSpec { reason, .. } => GridError::InvalidGridSpec {
                path: location,
                reason,
            },
            GridError::UnreadableImage { reason, .. } => GridError::UnreadableImage {
                path: location,
                reason,
            },
            GridError::UnencodableValue { value, reason, .. } => GridError::UnencodableValue {
                path: location,
                value,
                reason,
            },
            other => other,
        }
    }

    /// The element path, for variants that have one.
    pub fn path(&self) -> Option<&ElementPath> {
        match self {
            GridError::InvalidGridSpec { path, .. }
            | GridError::UnreadableImage { path, .. }
            | GridError::UnencodableValue { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the document schema. Check field names and element types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        GridError::Parse { source: e, hint }
    }
}
