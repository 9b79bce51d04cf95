//! Locale-invariant number formatting for package values.
//!
//! Both formatters use `.` as the decimal separator and no grouping.
//! Values with a decimal exponent below -5 or at least 15 use scientific
//! notation with a signed two-digit exponent (`1.5E-07`).

/// Significant digits written by the legacy manual layout.
pub const LEGACY_SIGNIFICANT_DIGITS: usize = 15;

/// Format a double with the shortest digits that round-trip.
///
/// Used by the structured writer and the CLI.
pub fn format_invariant(value: f64) -> String {
    format_special(value).unwrap_or_else(|| render(&format!("{:e}", value)))
}

/// Format a double rounded to 15 significant digits, trailing zeros trimmed.
///
/// Matches the legacy manual layout, so tolerance arithmetic noise such as
/// `0.19999999999999998` is written as `0.2`.
pub fn format_legacy(value: f64) -> String {
    format_special(value).unwrap_or_else(|| {
        render(&format!("{:.*e}", LEGACY_SIGNIFICANT_DIGITS - 1, value))
    })
}

fn format_special(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else if value == 0.0 {
        Some("0".to_string())
    } else {
        None
    }
}

/// Render Rust's `d.ddde±x` output in the invariant layout.
fn render(scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if mantissa.starts_with('-') { "-" } else { "" };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    if !(-5..15).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}{}E{}{:02}", sign, lead, fraction, exp_sign, exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, fraction) = digits.split_at(int_len);
        format!("{}{}.{}", sign, int_part, fraction)
    }
}
