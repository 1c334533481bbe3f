//! Order statistics for the market baseline.
//!
//! The screen only ever needs a plain sample median:
//!
//! ```text
//! k odd  -> x[(k-1)/2]
//! k even -> (x[k/2 - 1] + x[k/2]) / 2
//! ```
//!
//! computed after sorting. Inputs are owned so the caller's slice order is
//! never disturbed.

/// Sample median of `values`, or `None` when empty.
///
/// Non-finite values are ignored; the normalizers never produce them, but a
/// NaN would otherwise make the sort order meaningless.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);

    let k = values.len();
    let mid = k / 2;
    if k % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Round to 2 decimal places.
///
/// Goes through the `{:.2}` formatter so an exact binary tie (`0.125`)
/// rounds to even, matching the reason texts built with the same format.
pub fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_takes_middle() {
        assert_eq!(median(vec![9.0, 1.0, 5.0]), Some(5.0));
    }

    #[test]
    fn median_even_averages_middle_pair() {
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn median_empty_is_none() {
        assert_eq!(median(Vec::new()), None);
        assert_eq!(median(vec![f64::NAN]), None);
    }

    #[test]
    fn round2_basic() {
        assert!((round2(1234.5678) - 1234.57).abs() < 1e-9);
        assert!((round2(0.004) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn round2_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(801.0 / 8.0), 100.12);
        assert_eq!(round2(-0.125), -0.12);
    }
}
