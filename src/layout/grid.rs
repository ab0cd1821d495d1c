//! # Grid Resolver
//!
//! Converts a row's column shares into absolute horizontal slots. A row is
//! divided into `total` equal shares (12 by default); each column takes as
//! many shares as it asks for, in order.
//!
//! Column edges are computed from cumulative share sums, so columns whose
//! shares sum to the total tile the parent width exactly. Shares past the
//! total are clipped (later columns get zero width), and shares summing
//! below the total leave blank space on the right.

use crate::error::GridError;

/// Absolute horizontal placement of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    pub x: f64,
    pub width: f64,
}

/// Resolve `shares` against a grid of `total` shares spanning `width`,
/// starting at `x`.
pub fn resolve_columns(
    x: f64,
    width: f64,
    shares: &[i32],
    total: i32,
) -> Result<Vec<ColumnSlot>, GridError> {
    if total <= 0 {
        return Err(GridError::grid(format!(
            "grid total must be positive, got {total}"
        )));
    }
    if let Some((i, s)) = shares.iter().enumerate().find(|(_, s)| **s < 0) {
        return Err(GridError::grid(format!(
            "column {i} has negative share {s}"
        )));
    }

    let total = total as i64;
    let edge = |cumulative: i64| x + width * cumulative.min(total) as f64 / total as f64;

    let mut slots = Vec::with_capacity(shares.len());
    let mut cumulative: i64 = 0;
    for &share in shares {
        let left = edge(cumulative);
        cumulative += share as i64;
        let right = edge(cumulative);
        slots.push(ColumnSlot {
            x: left,
            width: right - left,
        });
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_summing_to_total_tile_width() {
        let slots = resolve_columns(10.0, 100.0, &[4, 2, 6], 12).unwrap();
        assert_eq!(slots.len(), 3);
        assert!((slots[0].x - 10.0).abs() < 0.001);
        assert!((slots[0].width - 100.0 / 3.0).abs() < 0.001);
        assert!((slots[1].x - (10.0 + 100.0 / 3.0)).abs() < 0.001);
        assert!((slots[2].x + slots[2].width - 110.0).abs() < 1e-9);
        let sum: f64 = slots.iter().map(|s| s.width).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn odd_totals_do_not_drift() {
        let shares = vec![1; 7];
        let slots = resolve_columns(0.0, 97.3, &shares, 7).unwrap();
        let sum: f64 = slots.iter().map(|s| s.width).sum();
        assert!((sum - 97.3).abs() < 1e-9);
    }

    #[test]
    fn overflow_is_clipped() {
        let slots = resolve_columns(0.0, 120.0, &[8, 8, 4], 12).unwrap();
        assert!((slots[0].width - 80.0).abs() < 0.001);
        assert!((slots[1].width - 40.0).abs() < 0.001);
        assert!(slots[2].width.abs() < 1e-9);
        assert!((slots[2].x - 120.0).abs() < 1e-9);
    }

    #[test]
    fn underflow_leaves_trailing_space() {
        let slots = resolve_columns(0.0, 120.0, &[3, 3], 12).unwrap();
        assert!((slots[1].x + slots[1].width - 60.0).abs() < 0.001);
    }

    #[test]
    fn zero_share_is_placeholder() {
        let slots = resolve_columns(0.0, 120.0, &[6, 0, 6], 12).unwrap();
        assert!(slots[1].width.abs() < 1e-9);
        assert!((slots[2].x - 60.0).abs() < 0.001);
    }

    #[test]
    fn negative_share_rejected() {
        let err = resolve_columns(0.0, 100.0, &[6, -1], 12).unwrap_err();
        assert!(matches!(err, GridError::InvalidGridSpec { .. }));
    }

    #[test]
    fn zero_total_rejected() {
        assert!(matches!(
            resolve_columns(0.0, 100.0, &[1], 0),
            Err(GridError::InvalidGridSpec { .. })
        ));
    }

    #[test]
    fn no_columns() {
        assert!(resolve_columns(0.0, 100.0, &[], 12).unwrap().is_empty());
    }
}
