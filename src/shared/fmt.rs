//! Display formatting: USD amounts, signed percentages, compact magnitudes,
//! coin quantities and chart timestamps.

use chrono::DateTime;

/// Adds thousands separators to the integer part of a plain decimal string.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let mut parts = unsigned.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Trims trailing zeros (and a dangling point) from a fixed-point string.
fn trim_fraction(formatted: String) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Format a USD amount.
///
/// Sub-cent amounts get six decimals, amounts of a thousand or more drop
/// trailing cents, everything else shows exactly two decimals.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let body = if abs != 0.0 && abs < 0.01 {
        format!("{:.6}", abs)
    } else if abs >= 1000.0 {
        group_thousands(&trim_fraction(format!("{:.2}", abs)))
    } else {
        group_thousands(&format!("{:.2}", abs))
    };
    format!("{}${}", sign, body)
}

/// Format a percentage with an explicit sign, e.g. `+1.23%`.
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "0.00%".to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

/// Format a large number with a K/M/B/T suffix, at most two decimals.
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

    if !value.is_finite() {
        return "0".to_string();
    }
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let mut unit = UNITS.iter().rposition(|(scale, _)| abs >= *scale);
    // 999_999 rounds to 1000K; promote it to 1M.
    if let Some(i) = unit {
        let rounded = (abs / UNITS[i].0 * 100.0).round() / 100.0;
        if rounded >= 1000.0 && i + 1 < UNITS.len() {
            unit = Some(i + 1);
        }
    } else if (abs * 100.0).round() / 100.0 >= 1000.0 {
        unit = Some(0);
    }

    match unit {
        Some(i) => {
            let (scale, suffix) = UNITS[i];
            format!("{}{}{}", sign, trim_fraction(format!("{:.2}", abs / scale)), suffix)
        }
        None => format!("{}{}", sign, trim_fraction(format!("{:.2}", abs))),
    }
}

/// Format a coin quantity; smaller amounts get more precision.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let abs = value.abs();
    if abs != 0.0 && abs < 0.0001 {
        format!("{:.8}", value)
    } else if abs < 1.0 {
        format!("{:.6}", value)
    } else if abs < 1000.0 {
        format!("{:.4}", value)
    } else {
        group_thousands(&trim_fraction(format!("{:.2}", value)))
    }
}

/// Chart axis label for a millisecond timestamp, e.g. `Nov 14` (UTC).
/// Out-of-range timestamps format as an empty string.
pub fn format_chart_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// Date and time for a millisecond timestamp, e.g. `Nov 14, 10:13 PM` (UTC).
pub fn format_date_time(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%b %-d, %-I:%M %p").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567.5"), "1,234,567.5");
        assert_eq!(group_thousands("-1234.56"), "-1,234.56");
        assert_eq!(group_thousands("-123"), "-123");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234.5), "$1,234.5");
        assert_eq!(format_currency(65_000.0), "$65,000");
        assert_eq!(format_currency(0.000123), "$0.000123");
        assert_eq!(format_currency(-1500.25), "-$1,500.25");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(1.234), "+1.23%");
        assert_eq!(format_percentage(0.0), "+0.00%");
        assert_eq!(format_percentage(-4.5), "-4.50%");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(1234.0), "1.23K");
        assert_eq!(format_compact(1_500_000.0), "1.5M");
        assert_eq!(format_compact(999_999.0), "1M");
        assert_eq!(format_compact(2_000_000_000.0), "2B");
        assert_eq!(format_compact(1.2e12), "1.2T");
        assert_eq!(format_compact(-1234.0), "-1.23K");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.00001234), "0.00001234");
        assert_eq!(format_quantity(0.5), "0.500000");
        assert_eq!(format_quantity(12.0), "12.0000");
        assert_eq!(format_quantity(12_345.678), "12,345.68");
        assert_eq!(format_quantity(0.0), "0.000000");
    }

    #[test]
    fn test_format_chart_date() {
        assert_eq!(format_chart_date(1_700_000_000_000), "Nov 14");
        assert_eq!(format_chart_date(1_704_067_200_000), "Jan 1");
        assert_eq!(format_chart_date(i64::MAX), "");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time(1_700_000_000_000), "Nov 14, 10:13 PM");
        assert_eq!(format_date_time(1_704_067_200_000), "Jan 1, 12:00 AM");
        assert_eq!(format_date_time(1_704_110_700_000), "Jan 1, 12:05 PM");
    }
}
