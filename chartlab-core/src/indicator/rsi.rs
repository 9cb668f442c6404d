//! Relative Strength Index (RSI), window-average form.
//!
//! RSI{p} = 100 * avg_gain / (avg_gain + avg_loss) over the last p changes.
//! Params default to [6, 12, 24], one `rsi{p}` line output each.
//! Edge cases: all gains → 100, all losses → 0, flat window → 50.

use crate::domain::{Candle, OutputMap};
use crate::indicator::ma::window_of;
use crate::indicator::{IndicatorCalculator, IndicatorError, OutputSpec};

const NAME: &str = "rsi";
const MIN_PARAMS: usize = 1;
const DEFAULT_PARAMS: [f64; 3] = [6.0, 12.0, 24.0];

#[derive(Debug, Clone)]
pub struct Rsi {
    params: Vec<f64>,
    specs: Vec<OutputSpec>,
}

fn specs_for(params: &[f64]) -> Vec<OutputSpec> {
    params
        .iter()
        .map(|&p| OutputSpec::line(format!("rsi{}", window_of(p))))
        .collect()
}

fn rsi_of(gain_sum: f64, loss_sum: f64) -> f64 {
    let total = gain_sum + loss_sum;
    if total == 0.0 {
        50.0 // no movement in the window
    } else {
        100.0 * gain_sum / total
    }
}

impl Rsi {
    pub fn new() -> Self {
        Self {
            params: DEFAULT_PARAMS.to_vec(),
            specs: specs_for(&DEFAULT_PARAMS),
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorCalculator for Rsi {
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
        self.params.iter().map(|&p| window_of(p)).max().unwrap_or(1)
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
        let mut gain_sums = vec![0.0; windows.len()];
        let mut loss_sums = vec![0.0; windows.len()];

        for i in 0..series.len() {
            let change = if i == 0 {
                0.0
            } else {
                series[i].close - series[i - 1].close
            };
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);

            let mut out = OutputMap::new();
            for (w, &win) in windows.iter().enumerate() {
                gain_sums[w] += gain;
                loss_sums[w] += loss;
                // A window needs `win` changes, i.e. candles 1..=win.
                if i > win {
                    let leaving = series[i - win].close - series[i - win - 1].close;
                    gain_sums[w] -= leaving.max(0.0);
                    loss_sums[w] -= (-leaving).max(0.0);
                }
                if i >= win {
                    out.insert(self.specs[w].key.clone(), rsi_of(gain_sums[w], loss_sums[w]));
                }
            }
            series[i].set_output(NAME, out);
        }

        Ok(())
    }
}
