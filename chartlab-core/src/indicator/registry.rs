//! Registry — maps indicator identifiers to fresh computation units.
//!
//! The catalog is fixed: there is no user-defined indicator mechanism.
//! Hosts look up a unit by identifier, optionally override its parameters
//! (editable units only), then hand it the candle series.

use crate::indicator::{IndicatorCalculator, IndicatorError, Macd, MovingAverage, Rsi, Volume};

/// Known indicator identifiers, as accepted by `create_indicator`.
pub const CATALOG: &[&str] = &["ma", "macd", "rsi", "vol"];

/// Create a unit with default parameters for the given identifier
/// (case-insensitive).
pub fn create_indicator(id: &str) -> Result<Box<dyn IndicatorCalculator>, IndicatorError> {
    match id.to_ascii_lowercase().as_str() {
        "ma" => Ok(Box::new(MovingAverage::new())),
        "macd" => Ok(Box::new(Macd::new())),
        "rsi" => Ok(Box::new(Rsi::new())),
        "vol" => Ok(Box::new(Volume::new())),
        other => Err(IndicatorError::UnknownIndicator(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_the_catalog() {
        for id in CATALOG {
            let unit = create_indicator(id).unwrap();
            assert_eq!(unit.name(), *id);
            assert!(!unit.output_specs().is_empty());
            assert!(!unit.params().is_empty());
        }
    }

    #[test]
    fn registry_is_case_insensitive() {
        assert_eq!(create_indicator("MACD").unwrap().name(), "macd");
    }

    #[test]
    fn registry_rejects_unknown_identifier() {
        let err = create_indicator("kdj").unwrap_err();
        assert!(matches!(err, IndicatorError::UnknownIndicator(id) if id == "kdj"));
    }
}
