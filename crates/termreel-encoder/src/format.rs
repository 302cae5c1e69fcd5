//! Compact numeric formatting for emitted documents.
//!
//! Every number written into a document goes through these helpers. Whole
//! values print as integers; fractional values print at a fixed precision
//! with trailing zeros (and a dangling decimal point) stripped. Keyframe
//! percentages pick their precision from the stop count, so that evenly
//! spaced stops stay textually distinct however dense the timeline gets.

/// Format a coordinate or length with at most one decimal place.
pub fn format_coord(value: f64) -> String {
    format_fixed(value, 1)
}

/// Format a duration in seconds with at most two decimal places.
pub fn format_secs(value: f64) -> String {
    format_fixed(value, 2)
}

/// Decimal places needed to keep `stop_count` evenly spaced percentages
/// textually distinct.
pub fn percent_precision(stop_count: usize) -> usize {
    match stop_count {
        0..=99 => 1,
        100..=999 => 2,
        1_000..=9_999 => 3,
        10_000..=99_999 => 4,
        _ => 5,
    }
}

/// Format a keyframe percentage at the given precision.
pub fn format_percent(value: f64, precision: usize) -> String {
    format_fixed(value, precision)
}

fn format_fixed(value: f64, precision: usize) -> String {
    if value == value.trunc() {
        return format!("{}", value as i64);
    }
    let mut text = format!("{value:.precision$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_whole_values_have_no_decimals() {
        assert_eq!(format_coord(12.0), "12");
        assert_eq!(format_coord(0.0), "0");
        assert_eq!(format_secs(2.0), "2");
        assert_eq!(format_percent(100.0, 3), "100");
    }

    #[test]
    fn test_coord_keeps_one_decimal() {
        assert_eq!(format_coord(12.34), "12.3");
        assert_eq!(format_coord(0.55), "0.6");
        assert_eq!(format_coord(7.04), "7");
    }

    #[test]
    fn test_secs_keeps_two_decimals() {
        assert_eq!(format_secs(1.5), "1.5");
        assert_eq!(format_secs(0.333), "0.33");
        assert_eq!(format_secs(2.999), "3");
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(format_percent(33.30, 2), "33.3");
        assert_eq!(format_percent(25.000001, 1), "25");
        assert_eq!(format_percent(0.5, 3), "0.5");
    }

    #[test]
    fn test_precision_grows_with_stop_count() {
        assert_eq!(percent_precision(0), 1);
        assert_eq!(percent_precision(99), 1);
        assert_eq!(percent_precision(100), 2);
        assert_eq!(percent_precision(999), 2);
        assert_eq!(percent_precision(1_000), 3);
        assert_eq!(percent_precision(9_999), 3);
        assert_eq!(percent_precision(10_000), 4);
        assert_eq!(percent_precision(99_999), 4);
        assert_eq!(percent_precision(100_000), 5);
    }

    #[test]
    fn test_evenly_spaced_percentages_stay_distinct() {
        // 33 evenly spaced stops sampled from timelines of increasing
        // density must never collide after formatting.
        for &count in &[50usize, 500, 5_000, 50_000] {
            let precision = percent_precision(count);
            let span = (count - 1) as f64;
            let mut seen = HashSet::new();
            for k in 0..33 {
                let index = k * (count - 1) / 32;
                let text = format_percent(index as f64 / span * 100.0, precision);
                assert!(
                    seen.insert(text.clone()),
                    "collision at count={count}: {text}"
                );
            }
        }
    }

    #[test]
    fn test_consecutive_stops_stay_distinct() {
        // Adjacent stops are the tightest spacing a timeline produces.
        for &count in &[50usize, 500, 5_000, 50_000] {
            let precision = percent_precision(count);
            let span = (count - 1) as f64;
            let mut seen = HashSet::new();
            for index in count / 2 - 16..count / 2 + 17 {
                let text = format_percent(index as f64 / span * 100.0, precision);
                assert!(
                    seen.insert(text.clone()),
                    "collision at count={count}: {text}"
                );
            }
        }
    }
}
