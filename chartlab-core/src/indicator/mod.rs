//! Indicator contract and the fixed catalog of computation units.
//!
//! Every unit implements `IndicatorCalculator`: a name, a tunable parameter
//! vector, declared output series, and a single-pass `compute` over the
//! candle series. There is no base class — the registry in `registry` maps
//! identifiers to boxed trait objects, and the trait is the whole contract.
//!
//! Multi-series units (MA, RSI, VOL) expose one output key per parameter;
//! MACD's three keys are fixed.

pub mod ma;
pub mod macd;
pub mod registry;
pub mod rsi;
pub mod vol;

pub use ma::MovingAverage;
pub use macd::Macd;
pub use registry::{create_indicator, CATALOG};
pub use rsi::Rsi;
pub use vol::Volume;

use crate::domain::Candle;
use serde::{Deserialize, Serialize};

/// How the renderer should draw one output series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderHint {
    Line,
    Bar,
}

/// Fixed metadata for one output series: the key a unit writes under, and
/// the render hint. The renderer reads these without inspecting values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub key: String,
    pub hint: RenderHint,
}

impl OutputSpec {
    pub fn line(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            hint: RenderHint::Line,
        }
    }

    pub fn bar(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            hint: RenderHint::Bar,
        }
    }
}

/// Errors from the indicator engine.
#[derive(Debug, thiserror::Error)]
pub enum IndicatorError {
    #[error("{indicator}: parameter vector too short (expected {expected}, got {got})")]
    InvalidParameters {
        indicator: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{0}: parameters are not user-editable")]
    NotEditable(&'static str),
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
}

/// The computation contract every indicator honors.
///
/// `compute` consumes the full series oldest-to-newest and writes an
/// `OutputMap` onto every candle under the unit's own name. It must be
/// idempotent: all recurrence state is local to one invocation, so
/// recomputing with the same parameters yields bit-identical results.
///
/// # Causality
/// The output at index i is a pure function of candles at indices <= i and
/// the parameter vector. No lookahead, ever.
pub trait IndicatorCalculator: std::fmt::Debug + Send + Sync {
    /// Identifier, also the namespacing key on candles (e.g. "macd").
    fn name(&self) -> &str;

    /// Current parameter vector, initialized to the unit's defaults.
    fn params(&self) -> &[f64];

    /// Replace the parameter vector before computation.
    ///
    /// Errors with `NotEditable` on fixed units and `InvalidParameters`
    /// when the vector is shorter than the unit's declared count. Trailing
    /// values beyond the declared count are ignored — a unit never reads
    /// past its declared parameter count.
    fn set_params(&mut self, params: Vec<f64>) -> Result<(), IndicatorError>;

    /// Ordered output-series metadata. Fixed per unit for a given parameter
    /// vector; parameter-derived keys (e.g. `ma5`) regenerate on override.
    fn output_specs(&self) -> &[OutputSpec];

    /// Warm-up periods before output is considered fully meaningful.
    /// Keys may be absent from candles inside the warm-up window.
    fn lookback(&self) -> usize;

    /// Fractional digit count for display formatting.
    fn precision(&self) -> usize;

    /// Whether the host may override parameters for this unit.
    fn editable(&self) -> bool {
        true
    }

    /// Single forward pass over the series; empty series is a no-op.
    ///
    /// Parameters are validated before any candle is touched, so failure
    /// is all-or-nothing: a series never ends up partially written.
    fn compute(&self, series: &mut [Candle]) -> Result<(), IndicatorError>;
}

/// Create synthetic candles from close prices for testing.
///
/// Open = previous close (or close for the first candle), high/low bracket
/// open and close by 1.0, volume ramps so volume-based units see variation.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Candle::new(
                1_700_000_000_000 + i as i64 * 60_000,
                open,
                high,
                low,
                close,
                1_000.0 + i as f64 * 10.0,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
