//! Moving Average Convergence Divergence (MACD).
//!
//! Params: [short, long, signal], defaults [12, 26, 9].
//! diff = EMA(short) - EMA(long) of close
//! dea  = EMA(signal) of diff
//! macd = (diff - dea) * 2
//!
//! The price EMAs seed at close[0]; dea seeds from 0, so
//! dea[0] = diff[0] * 2 / (signal + 1) rather than diff[0]. That asymmetry
//! matches the recurrence charting tools ship with and is kept as-is.

use crate::domain::{Candle, OutputMap};
use crate::indicator::{IndicatorCalculator, IndicatorError, OutputSpec};

const NAME: &str = "macd";
const PARAM_COUNT: usize = 3;
const DEFAULT_PARAMS: [f64; PARAM_COUNT] = [12.0, 26.0, 9.0];

/// MACD computation unit. Lookback 0: every candle gets all three outputs.
#[derive(Debug, Clone)]
pub struct Macd {
    params: Vec<f64>,
    specs: Vec<OutputSpec>,
}

impl Macd {
    pub fn new() -> Self {
        Self {
            params: DEFAULT_PARAMS.to_vec(),
            specs: vec![
                OutputSpec::line("diff"),
                OutputSpec::line("dea"),
                OutputSpec::bar("macd"),
            ],
        }
    }

    #[cfg(test)]
    fn with_raw_params(params: Vec<f64>) -> Self {
        let mut unit = Self::new();
        unit.params = params;
        unit
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        NAME
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn set_params(&mut self, params: Vec<f64>) -> Result<(), IndicatorError> {
        if params.len() < PARAM_COUNT {
            return Err(IndicatorError::InvalidParameters {
                indicator: NAME,
                expected: PARAM_COUNT,
                got: params.len(),
            });
        }
        self.params = params[..PARAM_COUNT].to_vec();
        Ok(())
    }

    fn output_specs(&self) -> &[OutputSpec] {
        &self.specs
    }

    fn lookback(&self) -> usize {
        0 // seeds from the first close
    }

    fn precision(&self) -> usize {
        4
    }

    fn compute(&self, series: &mut [Candle]) -> Result<(), IndicatorError> {
        if self.params.len() < PARAM_COUNT {
            return Err(IndicatorError::InvalidParameters {
                indicator: NAME,
                expected: PARAM_COUNT,
                got: self.params.len(),
            });
        }
        let short = self.params[0];
        let long = self.params[1];
        let signal = self.params[2];

        let mut prev_ema_short = 0.0;
        let mut prev_ema_long = 0.0;
        let mut prev_dea = 0.0;

        for (i, candle) in series.iter_mut().enumerate() {
            let close = candle.close;
            let (ema_short, ema_long) = if i == 0 {
                (close, close)
            } else {
                (
                    (2.0 * close + (short - 1.0) * prev_ema_short) / (short + 1.0),
                    (2.0 * close + (long - 1.0) * prev_ema_long) / (long + 1.0),
                )
            };

            let diff = ema_short - ema_long;
            let dea = (diff * 2.0 + prev_dea * (signal - 1.0)) / (signal + 1.0);
            let macd = (diff - dea) * 2.0;

            prev_ema_short = ema_short;
            prev_ema_long = ema_long;
            prev_dea = dea;

            let mut out = OutputMap::new();
            out.insert("diff".into(), diff);
            out.insert("dea".into(), dea);
            out.insert("macd".into(), macd);
            candle.set_output(NAME, out);
        }

        Ok(())
    }
}
