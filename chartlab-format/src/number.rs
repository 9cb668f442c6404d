//! Precision and big-number formatting.
//!
//! One code path per operation, parameterized by `RoundingMode` — the
//! nearest / up / down strategies that elsewhere tend to grow into
//! near-duplicate format functions.

use crate::locale::{active_locale, Locale};
use crate::PLACEHOLDER;

/// Rounding strategy applied to the scaled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Round half away from zero.
    #[default]
    Nearest,
    /// Ceiling.
    Up,
    /// Floor — the truncating variant.
    Down,
}

impl RoundingMode {
    fn apply(self, value: f64) -> f64 {
        match self {
            RoundingMode::Nearest => value.round(),
            RoundingMode::Up => value.ceil(),
            RoundingMode::Down => value.floor(),
        }
    }
}

/// `format_precision` against the active locale, rounding to nearest.
pub fn format_precision(value: f64, precision: usize) -> String {
    format_precision_with(&active_locale(), value, precision, RoundingMode::Nearest)
}

/// Render `value` with exactly `precision` fractional digits, thousands
/// grouping and decimal separator per `locale`, rounding per `mode`.
///
/// Non-finite input renders as its plain display form — never an error.
pub fn format_precision_with(
    locale: &Locale,
    value: f64,
    precision: usize,
    mode: RoundingMode,
) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scale = 10f64.powi(precision.min(12) as i32);
    let rounded = mode.apply(value * scale) / scale;
    let negative = rounded < 0.0;

    let digits = format!("{:.*}", precision, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (digits.as_str(), ""),
    };

    let mut out = String::with_capacity(digits.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &locale.thousands));
    if !frac_part.is_empty() {
        out.push_str(&locale.decimal);
        out.push_str(frac_part);
    }
    out
}

/// `format_big_number` against the active locale, rounding to nearest.
pub fn format_big_number(value: f64) -> String {
    format_big_number_with(&active_locale(), value, RoundingMode::Nearest)
}

/// Abbreviate magnitude with the locale's K/M/B/T suffixes, keeping up to
/// two fractional digits (trailing zeros trimmed). `mode` picks the
/// rounding function applied to the scaled magnitude.
pub fn format_big_number_with(locale: &Locale, value: f64, mode: RoundingMode) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let abs = value.abs();
    let suffixes = &locale.abbreviations;
    let (divisor, suffix) = if abs >= 1e12 {
        (1e12, suffixes.trillion.as_str())
    } else if abs >= 1e9 {
        (1e9, suffixes.billion.as_str())
    } else if abs >= 1e6 {
        (1e6, suffixes.million.as_str())
    } else if abs >= 1e3 {
        (1e3, suffixes.thousand.as_str())
    } else {
        (1.0, "")
    };

    let scaled = mode.apply(abs / divisor * 100.0) / 100.0;
    let digits = format!("{scaled:.2}");
    let trimmed = digits.trim_end_matches('0').trim_end_matches('.');
    let body = trimmed.replace('.', &locale.decimal);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{body}{suffix}")
}

/// `format_big_number_str` against the active locale, rounding to nearest.
pub fn format_big_number_str(raw: &str) -> String {
    format_big_number_str_with(&active_locale(), raw, RoundingMode::Nearest)
}

/// Accept a locale-delimited numeral string ("1.234,56" under `id`),
/// normalize it, and abbreviate. Input that cannot be coerced to a number
/// yields the placeholder.
pub fn format_big_number_str_with(locale: &Locale, raw: &str, mode: RoundingMode) -> String {
    let normalized = raw
        .trim()
        .replace(&locale.thousands, "")
        .replace(&locale.decimal, ".");
    match normalized.parse::<f64>() {
        Ok(value) => format_big_number_with(locale, value, mode),
        Err(_) => PLACEHOLDER.to_string(),
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let count = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
