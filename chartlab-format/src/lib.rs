//! ChartLab Format — locale-aware display formatting.
//!
//! Turns raw indicator and price values into display strings:
//! - Precision formatting with an explicit rounding-mode strategy
//! - Big-number abbreviation (K/M/B/T)
//! - Date rendering through an injected date-time formatter collaborator
//! - Safe keyed-value lookup with a uniform placeholder
//!
//! Formatting never fails: anything unformattable comes back as the
//! placeholder string, so presentation code handles no errors. A locale
//! table can be activated process-wide, and every operation also has a
//! `*_with` form taking the locale explicitly.

pub mod date;
pub mod locale;
pub mod number;
pub mod value;

/// The uniform "missing/invalid" display string.
pub const PLACEHOLDER: &str = "--";

pub use date::{format_date, ChronoDateTimeFormatter, DateTimeFormatter, DEFAULT_DATE_PATTERN};
pub use locale::{active_locale, register_locale, set_locale, Abbreviations, Locale, LocaleError};
pub use number::{
    format_big_number, format_big_number_str, format_big_number_str_with, format_big_number_with,
    format_precision, format_precision_with, RoundingMode,
};
pub use value::format_value;
