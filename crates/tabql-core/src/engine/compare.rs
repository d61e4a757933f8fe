//! How two cell values compare.

use core::cmp::Ordering;

/// Parses a cell as a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compares numerically when both sides are numbers, else lexically.
pub fn compare_values(left: &str, right: &str) -> Ordering {
    match (parse_number(left), parse_number(right)) {
        (Some(l), Some(r)) => l.total_cmp(&r),
        _ => left.cmp(right),
    }
}
