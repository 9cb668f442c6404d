//! Volume (VOL).
//!
//! `num` bar output carries the raw per-period volume from index 0; one
//! `ma{p}` line per parameter holds the rolling volume mean. Params default
//! to [5, 10, 20].

use crate::domain::{Candle, OutputMap};
use crate::indicator::ma::window_of;
use crate::indicator::{IndicatorCalculator, IndicatorError, OutputSpec};

const NAME: &str = "vol";
const MIN_PARAMS: usize = 1;
const DEFAULT_PARAMS: [f64; 3] = [5.0, 10.0, 20.0];

#[derive(Debug, Clone)]
pub struct Volume {
    params: Vec<f64>,
    specs: Vec<OutputSpec>,
}

fn specs_for(params: &[f64]) -> Vec<OutputSpec> {
    let mut specs: Vec<OutputSpec> = params
        .iter()
        .map(|&p| OutputSpec::line(format!("ma{}", window_of(p))))
        .collect();
    specs.push(OutputSpec::bar("num"));
    specs
}

impl Volume {
    pub fn new() -> Self {
        Self {
            params: DEFAULT_PARAMS.to_vec(),
            specs: specs_for(&DEFAULT_PARAMS),
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorCalculator for Volume {
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
        0
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
            let volume = series[i].volume;
            let mut out = OutputMap::new();
            out.insert("num".into(), volume);
            for (w, &win) in windows.iter().enumerate() {
                sums[w] += volume;
                if i >= win {
                    sums[w] -= series[i - win].volume;
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
