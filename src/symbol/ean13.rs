//! EAN-13 encoder. Accepts 12 digits (the check digit is appended) or 13
//! digits (the check digit is verified).

use super::LinearSymbol;
use crate::error::GridError;

/// Left-hand odd parity (L) patterns; bit 6 is the leftmost module.
const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Left-hand even parity (G) patterns.
const G_CODES: [u8; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101, 0b0111001, 0b0000101, 0b0010001,
    0b0001001, 0b0010111,
];

/// Parity of the six left digits for each leading digit, bit 5 first;
/// a set bit selects G.
const PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

pub(crate) fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| *d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn push_pattern(bits: u8, out: &mut Vec<bool>) {
    out.extend((0..7).rev().map(|i| bits >> i & 1 == 1));
}

pub fn encode(value: &str) -> Result<LinearSymbol, GridError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GridError::unencodable(value, "EAN-13 accepts digits only"));
    }
    let mut digits: Vec<u8> = value.bytes().map(|b| b - b'0').collect();
    match digits.len() {
        12 => digits.push(check_digit(&digits)),
        13 => {
            let expected = check_digit(&digits[..12]);
            if digits[12] != expected {
                return Err(GridError::unencodable(
                    value,
                    format!("check digit should be {expected}"),
                ));
            }
        }
        n => {
            return Err(GridError::unencodable(
                value,
                format!("EAN-13 needs 12 or 13 digits, got {n}"),
            ))
        }
    }

    let parity = PARITY[digits[0] as usize];
    let mut modules = Vec::with_capacity(95);
    modules.extend([true, false, true]);
    for (i, &d) in digits[1..7].iter().enumerate() {
        let even = parity >> (5 - i) & 1 == 1;
        let code = if even { G_CODES[d as usize] } else { L_CODES[d as usize] };
        push_pattern(code, &mut modules);
    }
    modules.extend([false, true, false, true, false]);
    for &d in &digits[7..] {
        // R patterns are the complement of L.
        push_pattern(!L_CODES[d as usize] & 0x7F, &mut modules);
    }
    modules.extend([true, false, true]);

    Ok(LinearSymbol {
        modules,
        text: digits.iter().map(|d| (b'0' + d) as char).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(modules: &[bool]) -> Option<String> {
        if modules.len() != 95 {
            return None;
        }
        let bits = |chunk: &[bool]| chunk.iter().fold(0u8, |acc, &m| acc << 1 | m as u8);
        let mut parity = 0u8;
        let mut digits = Vec::new();
        for i in 0..6 {
            let code = bits(&modules[3 + i * 7..10 + i * 7]);
            if let Some(d) = L_CODES.iter().position(|c| *c == code) {
                digits.push(d as u8);
                parity <<= 1;
            } else {
                digits.push(G_CODES.iter().position(|c| *c == code)? as u8);
                parity = parity << 1 | 1;
            }
        }
        for i in 0..6 {
            let code = bits(&modules[50 + i * 7..57 + i * 7]);
            let d = L_CODES.iter().position(|c| !*c & 0x7F == code)?;
            digits.push(d as u8);
        }
        let first = PARITY.iter().position(|p| *p == parity)? as u8;
        digits.insert(0, first);
        if check_digit(&digits[..12]) != digits[12] {
            return None;
        }
        Some(digits.iter().map(|d| (b'0' + d) as char).collect())
    }

    #[test]
    fn computes_check_digit() {
        let symbol = encode("400638133393").unwrap();
        assert_eq!(symbol.text, "4006381333931");
        assert_eq!(symbol.module_count(), 95);
    }

    #[test]
    fn round_trip() {
        for value in ["4006381333931", "5901234123457", "0000000000000"] {
            let symbol = encode(value).unwrap();
            assert_eq!(decode(&symbol.modules).as_deref(), Some(value));
        }
    }

    #[test]
    fn rejects_bad_check_digit() {
        assert!(matches!(
            encode("4006381333932"),
            Err(GridError::UnencodableValue { .. })
        ));
    }

    #[test]
    fn rejects_non_digits_and_bad_length() {
        for value in ["40063813339A", "12345", ""] {
            assert!(matches!(
                encode(value),
                Err(GridError::UnencodableValue { .. })
            ));
        }
    }

    #[test]
    fn guard_bars_in_place() {
        let m = encode("590123412345").unwrap().modules;
        assert_eq!(&m[..3], &[true, false, true]);
        assert_eq!(&m[45..50], &[false, true, false, true, false]);
        assert_eq!(&m[92..], &[true, false, true]);
    }
}
