//! Locale tables and the process-wide active-locale slot.
//!
//! A locale is registered once under an identifier and activated for the
//! process; formatting calls read the active table per call. Registration
//! is a full-table replace, not a merge, and is not atomic per field —
//! callers re-registering mid-flight synchronize externally.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Magnitude suffixes for big-number abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviations {
    pub thousand: String,
    pub million: String,
    pub billion: String,
    pub trillion: String,
}

impl Abbreviations {
    fn kmbt() -> Self {
        Self {
            thousand: "K".into(),
            million: "M".into(),
            billion: "B".into(),
            trillion: "T".into(),
        }
    }
}

/// Delimiters, abbreviation suffixes, and currency symbol for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub thousands: String,
    pub decimal: String,
    pub abbreviations: Abbreviations,
    pub currency: String,
}

impl Locale {
    /// "1,234.56" style.
    pub fn en() -> Self {
        Self {
            thousands: ",".into(),
            decimal: ".".into(),
            abbreviations: Abbreviations::kmbt(),
            currency: "$".into(),
        }
    }

    /// "1.234,56" style (Indonesian).
    pub fn id() -> Self {
        Self {
            thousands: ".".into(),
            decimal: ",".into(),
            abbreviations: Abbreviations::kmbt(),
            currency: "Rp".into(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("unknown locale: {0}")]
    Unknown(String),
}

struct Registry {
    tables: HashMap<String, Locale>,
    active: String,
}

fn registry() -> &'static RwLock<Registry> {
    static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut tables = HashMap::new();
        tables.insert("en".to_string(), Locale::en());
        tables.insert("id".to_string(), Locale::id());
        RwLock::new(Registry {
            tables,
            active: "en".to_string(),
        })
    })
}

/// Register (or fully replace) a locale table under an identifier.
pub fn register_locale(id: impl Into<String>, locale: Locale) {
    let mut reg = registry().write().unwrap_or_else(PoisonError::into_inner);
    reg.tables.insert(id.into(), locale);
}

/// Activate a registered locale for the whole process.
pub fn set_locale(id: &str) -> Result<(), LocaleError> {
    let mut reg = registry().write().unwrap_or_else(PoisonError::into_inner);
    if !reg.tables.contains_key(id) {
        return Err(LocaleError::Unknown(id.to_string()));
    }
    reg.active = id.to_string();
    Ok(())
}

/// A copy of the currently active locale table.
pub fn active_locale() -> Locale {
    let reg = registry().read().unwrap_or_else(PoisonError::into_inner);
    reg.tables
        .get(&reg.active)
        .cloned()
        .unwrap_or_default()
}
