//! Operand text helpers: parsing, canonical form and display formatting.
//!
//! Grouping separators only ever exist in rendered text. They are still
//! stripped before every parse so that text copied back from a display
//! round-trips.

use crate::config::EngineConfig;

/// Counts the decimal digits in an operand, ignoring sign and punctuation
#[must_use]
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Removes the grouping separator, if any, from `text`
#[must_use]
pub fn strip_grouping(text: &str, separator: Option<char>) -> String {
    match separator {
        Some(sep) => text.chars().filter(|&c| c != sep).collect(),
        None => text.to_string(),
    }
}

/// Parses operand text into a finite number.
///
/// Returns `None` for anything that is not a plain decimal numeral,
/// including `inf`/`NaN` spellings.
#[must_use]
pub fn parse_operand(text: &str, separator: Option<char>) -> Option<f64> {
    let clean = strip_grouping(text, separator);
    let clean = clean.trim();
    if clean.is_empty()
        || !clean
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    {
        return None;
    }
    clean.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical operand text for a computed value (`-0` becomes `0`)
#[must_use]
pub fn number_to_operand(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Exponential notation with `fraction_digits` mantissa digits and an
/// explicitly signed exponent, e.g. `1.234568e+12`
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    let raw = format!("{value:.fraction_digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// Inserts `separator` every three digits of an integer numeral
#[must_use]
pub fn group_thousands(integer: &str, separator: char) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders an operand for the display.
///
/// - more than `max_digits` digits and magnitude at least `10^max_digits`:
///   exponential notation
/// - contains a decimal point: shown as typed
/// - otherwise: integer with thousands grouping
///
/// Text that does not parse is returned unchanged.
#[must_use]
pub fn format_display(operand: &str, config: &EngineConfig) -> String {
    let separator = config.grouping.separator();
    let Some(value) = parse_operand(operand, separator) else {
        return operand.to_string();
    };

    if digit_count(operand) > config.max_digits && value.abs() >= config.exponent_threshold() {
        return to_exponential(value, config.exponent_digits);
    }

    if operand.contains('.') {
        return operand.to_string();
    }

    let integer = strip_grouping(operand, separator);
    match separator {
        Some(sep) => group_thousands(&integer, sep),
        None => integer,
    }
}
