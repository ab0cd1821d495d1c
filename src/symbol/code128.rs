//! Code 128 encoder.
//!
//! Printable ASCII goes through code set B. All-digit values of four or more
//! characters use code set C (two digits per symbol); an odd trailing digit
//! switches back to set B.

use super::{widths_to_modules, LinearSymbol};
use crate::error::GridError;

const START_B: usize = 104;
const START_C: usize = 105;
const CODE_B: usize = 100;
const STOP: usize = 106;
const MAX_LEN: usize = 80;

/// Bar/space widths for symbol values 0..=106. Each symbol spans 11
/// modules; the stop pattern spans 13.
#[rustfmt::skip]
pub(crate) const PATTERNS: [&[u8]; 107] = [
    &[2,1,2,2,2,2], &[2,2,2,1,2,2], &[2,2,2,2,2,1], &[1,2,1,2,2,3], &[1,2,1,3,2,2],
    &[1,3,1,2,2,2], &[1,2,2,2,1,3], &[1,2,2,3,1,2], &[1,3,2,2,1,2], &[2,2,1,2,1,3],
    &[2,2,1,3,1,2], &[2,3,1,2,1,2], &[1,1,2,2,3,2], &[1,2,2,1,3,2], &[1,2,2,2,3,1],
    &[1,1,3,2,2,2], &[1,2,3,1,2,2], &[1,2,3,2,2,1], &[2,2,3,2,1,1], &[2,2,1,1,3,2],
    &[2,2,1,2,3,1], &[2,1,3,2,1,2], &[2,2,3,1,1,2], &[3,1,2,1,3,1], &[3,1,1,2,2,2],
    &[3,2,1,1,2,2], &[3,2,1,2,2,1], &[3,1,2,2,1,2], &[3,2,2,1,1,2], &[3,2,2,2,1,1],
    &[2,1,2,1,2,3], &[2,1,2,3,2,1], &[2,3,2,1,2,1], &[1,1,1,3,2,3], &[1,3,1,1,2,3],
    &[1,3,1,3,2,1], &[1,1,2,3,1,3], &[1,3,2,1,1,3], &[1,3,2,3,1,1], &[2,1,1,3,1,3],
    &[2,3,1,1,1,3], &[2,3,1,3,1,1], &[1,1,2,1,3,3], &[1,1,2,3,3,1], &[1,3,2,1,3,1],
    &[1,1,3,1,2,3], &[1,1,3,3,2,1], &[1,3,3,1,2,1], &[3,1,3,1,2,1], &[2,1,1,3,3,1],
    &[2,3,1,1,3,1], &[2,1,3,1,1,3], &[2,1,3,3,1,1], &[2,1,3,1,3,1], &[3,1,1,1,2,3],
    &[3,1,1,3,2,1], &[3,3,1,1,2,1], &[3,1,2,1,1,3], &[3,1,2,3,1,1], &[3,3,2,1,1,1],
    &[3,1,4,1,1,1], &[2,2,1,4,1,1], &[4,3,1,1,1,1], &[1,1,1,2,2,4], &[1,1,1,4,2,2],
    &[1,2,1,1,2,4], &[1,2,1,4,2,1], &[1,4,1,1,2,2], &[1,4,1,2,2,1], &[1,1,2,2,1,4],
    &[1,1,2,4,1,2], &[1,2,2,1,1,4], &[1,2,2,4,1,1], &[1,4,2,1,1,2], &[1,4,2,2,1,1],
    &[2,4,1,2,1,1], &[2,2,1,1,1,4], &[4,1,3,1,1,1], &[2,4,1,1,1,2], &[1,3,4,1,1,1],
    &[1,1,1,2,4,2], &[1,2,1,1,4,2], &[1,2,1,2,4,1], &[1,1,4,2,1,2], &[1,2,4,1,1,2],
    &[1,2,4,2,1,1], &[4,1,1,2,1,2], &[4,2,1,1,1,2], &[4,2,1,2,1,1], &[2,1,2,1,4,1],
    &[2,1,4,1,2,1], &[4,1,2,1,2,1], &[1,1,1,1,4,3], &[1,1,1,3,4,1], &[1,3,1,1,4,1],
    &[1,1,4,1,1,3], &[1,1,4,3,1,1], &[4,1,1,1,1,3], &[4,1,1,3,1,1], &[1,1,3,1,4,1],
    &[1,1,4,1,3,1], &[3,1,1,1,4,1], &[4,1,1,1,3,1], &[2,1,1,4,1,2], &[2,1,1,2,1,4],
    &[2,1,1,2,3,2], &[2,3,3,1,1,1,2],
];

/// Symbol values for `value`, including start and check symbols but not the
/// stop symbol.
fn symbol_values(value: &str) -> Result<Vec<usize>, GridError> {
    if value.is_empty() {
        return Err(GridError::unencodable(value, "Code 128 value is empty"));
    }
    if value.len() > MAX_LEN {
        return Err(GridError::unencodable(
            value,
            format!("Code 128 value longer than {MAX_LEN} characters"),
        ));
    }
    if let Some(bad) = value.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(GridError::unencodable(
            value,
            format!("character {bad:?} is outside printable ASCII"),
        ));
    }

    let bytes = value.as_bytes();
    let numeric = bytes.iter().all(u8::is_ascii_digit);
    let mut values = Vec::with_capacity(bytes.len() + 3);

    if numeric && bytes.len() >= 4 {
        values.push(START_C);
        let pairs = bytes.len() / 2;
        for pair in bytes.chunks_exact(2).take(pairs) {
            values.push(((pair[0] - b'0') * 10 + (pair[1] - b'0')) as usize);
        }
        if bytes.len() % 2 == 1 {
            values.push(CODE_B);
            values.push((bytes[bytes.len() - 1] - b' ') as usize);
        }
    } else {
        values.push(START_B);
        values.extend(bytes.iter().map(|b| (b - b' ') as usize));
    }

    values.push(checksum(&values));
    Ok(values)
}

/// Weighted modulo-103 check over the start symbol and data symbols.
fn checksum(values: &[usize]) -> usize {
    let weighted: usize = values
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { *v } else { i * v })
        .sum();
    weighted % 103
}

pub fn encode(value: &str) -> Result<LinearSymbol, GridError> {
    let values = symbol_values(value)?;
    let mut modules = Vec::with_capacity((values.len() + 1) * 11 + 2);
    for &v in values.iter().chain(std::iter::once(&STOP)) {
        widths_to_modules(PATTERNS[v], &mut modules);
    }
    Ok(LinearSymbol {
        modules,
        text: value.to_string(),
    })
}
