//! QR code matrices via the `qrcode` crate, error correction level M.

use qrcode::{EcLevel, QrCode};

use crate::error::GridError;

/// A square module matrix, row-major, `true` for dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    pub size: usize,
    pub modules: Vec<bool>,
}

impl QrMatrix {
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    /// Horizontal runs of dark modules as `(row, start, len)`.
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        self.modules
            .chunks(self.size)
            .enumerate()
            .flat_map(|(y, row)| {
                super::runs(row)
                    .into_iter()
                    .map(move |(start, len)| (y, start, len))
            })
            .collect()
    }
}

pub fn encode(value: &str) -> Result<QrMatrix, GridError> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::M)
        .map_err(|e| GridError::unencodable(value, e.to_string()))?;
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    Ok(QrMatrix {
        size: code.width(),
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_encoder() {
        let payload = "1\nPlanet of the Gophers: The War Begins\nSat 01/01/2022 7:00 PM\nGophedorium";
        let matrix = encode(payload).unwrap();
        let reference = QrCode::with_error_correction_level(payload, EcLevel::M).unwrap();
        assert_eq!(matrix.size, reference.width());
        for y in 0..matrix.size {
            for x in 0..matrix.size {
                assert_eq!(
                    matrix.is_dark(x, y),
                    reference[(x, y)] == qrcode::Color::Dark
                );
            }
        }
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let matrix = encode("hello").unwrap();
        assert_eq!(matrix.size, 21);
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(6, 0));
        assert!(!matrix.is_dark(7, 0));
    }

    #[test]
    fn runs_cover_every_dark_module() {
        let matrix = encode("Booking ID: 1").unwrap();
        let dark: usize = matrix.modules.iter().filter(|m| **m).count();
        let covered: usize = matrix.dark_runs().iter().map(|(_, _, len)| len).sum();
        assert_eq!(dark, covered);
    }

    #[test]
    fn oversized_payload_is_unencodable() {
        let payload = "x".repeat(4000);
        assert!(matches!(
            encode(&payload),
            Err(GridError::UnencodableValue { .. })
        ));
    }
}
