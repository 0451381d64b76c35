//! Decimal-to-integer scaling at the input boundary (spec.md §3).
//!
//! The core engine operates on integer coordinates only. Requests carry
//! decimal widths/heights/kerf/trim as strings; `scale_factor` picks a
//! power of ten covering the maximum number of decimal places present
//! across all of them (capped so the scaled values stay within six total
//! digits), and `scale`/`unscale` convert at the boundary.

/// Largest factor this system will scale by: 10^6.
pub const MAX_FACTOR_DIGITS: u32 = 6;

/// Number of digits after the decimal point in a numeric literal, ignoring
/// a trailing all-zero fractional part.
fn decimal_places(value: &str) -> u32 {
    match value.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len() as u32,
        None => 0,
    }
}

/// Compute `factor = 10^d` where `d` is the max decimal-place count across
/// all given numeric strings, capped at [`MAX_FACTOR_DIGITS`].
pub fn scale_factor<'a>(values: impl IntoIterator<Item = &'a str>) -> i64 {
    let d = values
        .into_iter()
        .map(decimal_places)
        .max()
        .unwrap_or(0)
        .min(MAX_FACTOR_DIGITS);
    10_i64.pow(d)
}

/// Scale a decimal value to an integer coordinate.
pub fn scale(value: f64, factor: i64) -> i32 {
    (value * factor as f64).round() as i32
}

/// Scale an integer coordinate back to a decimal value.
pub fn unscale(value: i64, factor: i64) -> f64 {
    value as f64 / factor as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_picks_max_decimal_places() {
        assert_eq!(scale_factor(["100", "50.5", "12.345"]), 1_000);
        assert_eq!(scale_factor(["100", "50"]), 1);
    }

    #[test]
    fn round_trip_is_exact() {
        let factor = scale_factor(["100.25"]);
        let scaled = scale(100.25, factor);
        assert_eq!(unscale(scaled as i64, factor), 100.25);
    }

    #[test]
    fn trailing_zero_fraction_does_not_inflate_factor() {
        assert_eq!(scale_factor(["100.50"]), 10);
    }
}
