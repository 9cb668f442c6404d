//! Candle — the fundamental market data unit.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One indicator's results for a single candle, keyed by output-series key
/// (e.g. `diff`, `dea`, `macd`). Keys absent during an indicator's warm-up.
pub type OutputMap = BTreeMap<String, f64>;

/// OHLCV candle for a single period, plus attached indicator outputs.
///
/// Candles arrive from the data source in non-decreasing timestamp order and
/// are mutated in place by computation units: each unit inserts one
/// `OutputMap` under its own name, so independent indicators never collide.
/// Recomputing an indicator replaces its previous entry wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Epoch milliseconds, period open.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Indicator outputs, namespaced by indicator name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub outputs: HashMap<String, OutputMap>,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            outputs: HashMap::new(),
        }
    }

    /// Basic OHLCV sanity check: finite close, high >= low, high/low bracket
    /// open and close, non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.close.is_finite()
            && self.open.is_finite()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }

    /// All outputs a named indicator wrote onto this candle.
    pub fn output(&self, indicator: &str) -> Option<&OutputMap> {
        self.outputs.get(indicator)
    }

    /// A single output-series value, e.g. `output_value("macd", "diff")`.
    pub fn output_value(&self, indicator: &str, key: &str) -> Option<f64> {
        self.outputs.get(indicator).and_then(|m| m.get(key)).copied()
    }

    /// Attach (or replace) one indicator's results.
    pub fn set_output(&mut self, indicator: impl Into<String>, values: OutputMap) {
        self.outputs.insert(indicator.into(), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle::new(1_700_000_000_000, 100.0, 105.0, 98.0, 103.0, 50_000.0)
    }

    #[test]
    fn candle_is_sane() {
        assert!(sample_candle().is_sane());
    }

    #[test]
    fn candle_detects_insane_high_low() {
        let mut candle = sample_candle();
        candle.high = 97.0; // below low
        assert!(!candle.is_sane());
    }

    #[test]
    fn candle_detects_non_finite_close() {
        let mut candle = sample_candle();
        candle.close = f64::NAN;
        assert!(!candle.is_sane());
    }

    #[test]
    fn outputs_are_namespaced_per_indicator() {
        let mut candle = sample_candle();
        let mut macd = OutputMap::new();
        macd.insert("diff".into(), 1.5);
        let mut ma = OutputMap::new();
        ma.insert("ma5".into(), 101.0);
        candle.set_output("macd", macd);
        candle.set_output("ma", ma);

        assert_eq!(candle.output_value("macd", "diff"), Some(1.5));
        assert_eq!(candle.output_value("ma", "ma5"), Some(101.0));
        assert_eq!(candle.output_value("macd", "ma5"), None);
    }

    #[test]
    fn set_output_replaces_previous_entry() {
        let mut candle = sample_candle();
        let mut first = OutputMap::new();
        first.insert("diff".into(), 1.0);
        first.insert("stale".into(), 9.0);
        candle.set_output("macd", first);

        let mut second = OutputMap::new();
        second.insert("diff".into(), 2.0);
        candle.set_output("macd", second);

        assert_eq!(candle.output_value("macd", "diff"), Some(2.0));
        assert_eq!(candle.output_value("macd", "stale"), None);
    }

    #[test]
    fn candle_serialization_roundtrip() {
        let mut candle = sample_candle();
        let mut out = OutputMap::new();
        out.insert("diff".into(), 0.25);
        candle.set_output("macd", out);

        let json = serde_json::to_string(&candle).unwrap();
        let deser: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle.timestamp, deser.timestamp);
        assert_eq!(candle.close, deser.close);
        assert_eq!(deser.output_value("macd", "diff"), Some(0.25));
    }

    #[test]
    fn empty_outputs_are_skipped_in_json() {
        let json = serde_json::to_string(&sample_candle()).unwrap();
        assert!(!json.contains("outputs"));
    }
}
