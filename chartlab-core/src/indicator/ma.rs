//! Moving Average (MA).
//!
//! One rolling close-price mean per parameter. Params default to
//! [5, 10, 30, 60], one `ma{p}` line output each. A window's key is absent
//! until that window has filled.

use crate::domain::{Candle, OutputMap};
use crate::indicator::{IndicatorCalculator, IndicatorError, OutputSpec};

const NAME: &str = "ma";
const MIN_PARAMS: usize = 1;
const DEFAULT_PARAMS: [f64; 4] = [5.0, 10.0, 30.0, 60.0];

/// Multi-line moving average unit. Takes a variable number of window
/// parameters (at least one); the output keys regenerate on override.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    params: Vec<f64>,
    specs: Vec<OutputSpec>,
}

/// Window length for one parameter value. Fractional and zero parameters
/// are clamped to a whole window of at least one period.
pub(crate) fn window_of(param: f64) -> usize {
    (param as usize).max(1)
}

fn specs_for(params: &[f64]) -> Vec<OutputSpec> {
    params
        .iter()
        .map(|&p| OutputSpec::line(format!("ma{}", window_of(p))))
        .collect()
}

impl MovingAverage {
    pub fn new() -> Self {
        Self {
            params: DEFAULT_PARAMS.to_vec(),
            specs: specs_for(&DEFAULT_PARAMS),
        }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorCalculator for MovingAverage {
    fn name(&self) -> &str {
        NAME
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn set_params(&mut self, params: Vec<f64>) -> Result<(), IndicatorError> {
        if params.len() < MIN_PARAMS {
            return Err(IndicatorError::InvalidParameters {
                indicator: NAME,
                expected: MIN_PARAMS,
                got: params.len(),
            });
        }
        self.specs = specs_for(&params);
        self.params = params;
        Ok(())
    }

    fn output_specs(&self) -> &[OutputSpec] {
        &self.specs
    }

    fn lookback(&self) -> usize {
        self.params
            .iter()
            .map(|&p| window_of(p))
            .max()
            .unwrap_or(1)
            - 1
    }

    fn precision(&self) -> usize {
        2
    }

    fn compute(&self, series: &mut [Candle]) -> Result<(), IndicatorError> {
        if self.params.len() < MIN_PARAMS {
            return Err(IndicatorError::InvalidParameters {
                indicator: NAME,
                expected: MIN_PARAMS,
                got: self.params.len(),
            });
        }
        let windows: Vec<usize> = self.params.iter().map(|&p| window_of(p)).collect();
        let mut sums = vec![0.0; windows.len()];

        for i in 0..series.len() {
            let close = series[i].close;
            let mut out = OutputMap::new();
            for (w, &win) in windows.iter().enumerate() {
                sums[w] += close;
                if i >= win {
                    sums[w] -= series[i - win].close;
                }
                if i + 1 >= win {
                    out.insert(self.specs[w].key.clone(), sums[w] / win as f64);
                }
            }
            series[i].set_output(NAME, out);
        }

        Ok(())
    }
}
