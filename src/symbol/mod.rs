//! # Symbol Encoding
//!
//! Turns barcode and QR values into module patterns before layout, so that
//! invalid values fail early with an element path and the renderer only has
//! to draw rectangles.

pub mod code128;
pub mod ean13;
pub mod qr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

pub use qr::QrMatrix;

/// 1D symbologies supported for barcode elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symbology {
    #[default]
    Code128,
    Ean13,
}

/// A 1D symbol as a row of modules, `true` for bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSymbol {
    pub modules: Vec<bool>,
    /// The value actually encoded, after padding and check digits.
    pub text: String,
}

impl LinearSymbol {
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Consecutive bar modules as `(start, len)` pairs.
    pub fn bars(&self) -> Vec<(usize, usize)> {
        runs(&self.modules)
    }
}

/// Encode a barcode value, zero-padding all-digit values to `min_digits`.
pub fn encode_barcode(
    value: &str,
    symbology: Symbology,
    min_digits: usize,
) -> Result<LinearSymbol, GridError> {
    let padded = pad_digits(value, min_digits);
    match symbology {
        Symbology::Code128 => code128::encode(&padded),
        Symbology::Ean13 => ean13::encode(&padded),
    }
}

fn pad_digits(value: &str, min_digits: usize) -> String {
    let numeric = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if numeric && value.len() < min_digits {
        format!("{value:0>min_digits$}")
    } else {
        value.to_string()
    }
}

/// Start/length pairs of `true` runs.
pub(crate) fn runs(cells: &[bool]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &on) in cells.iter().enumerate() {
        match (on, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, cells.len() - s));
    }
    out
}

/// Expand alternating bar/space widths (starting with a bar) into modules.
pub(crate) fn widths_to_modules(widths: &[u8], out: &mut Vec<bool>) {
    for (i, &w) in widths.iter().enumerate() {
        let bar = i % 2 == 0;
        out.extend(std::iter::repeat(bar).take(w as usize));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_numeric_values() {
        assert_eq!(pad_digits("1", 6), "000001");
        assert_eq!(pad_digits("123456", 4), "123456");
        assert_eq!(pad_digits("AB", 6), "AB");
    }

    #[test]
    fn padded_value_is_encoded() {
        let symbol = encode_barcode("42", Symbology::Code128, 6).unwrap();
        assert_eq!(symbol.text, "000042");
    }

    #[test]
    fn runs_merge_adjacent_modules() {
        let cells = [true, true, false, true, false, false, true];
        assert_eq!(runs(&cells), vec![(0, 2), (3, 1), (6, 1)]);
    }

    #[test]
    fn widths_expand_alternating() {
        let mut out = Vec::new();
        widths_to_modules(&[2, 1, 3], &mut out);
        assert_eq!(out, vec![true, true, false, true, true, true]);
    }
}
