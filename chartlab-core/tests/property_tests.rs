//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism — recomputing over an independent copy is bit-identical
//! 2. MACD algebraic identities — diff and the bar column
//! 3. Causality — a prefix of a longer series gets identical results
//! 4. Eager parameter validation — failure never leaves partial writes

use chartlab_core::{create_indicator, Candle, CATALOG};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                1_600_000_000_000 + i as i64 * 60_000,
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000.0 + (i % 7) as f64 * 250.0,
            )
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..10_000.0_f64, 1..200)
}

// ── 1. Determinism / idempotence ─────────────────────────────────────

proptest! {
    /// Computing twice over independent copies yields identical bits for
    /// every unit in the catalog.
    #[test]
    fn compute_is_deterministic(closes in arb_closes()) {
        for id in CATALOG {
            let unit = create_indicator(id).unwrap();
            let mut a = candles_from_closes(&closes);
            let mut b = candles_from_closes(&closes);
            unit.compute(&mut a).unwrap();
            unit.compute(&mut b).unwrap();
            for (ca, cb) in a.iter().zip(&b) {
                prop_assert_eq!(ca.output(id), cb.output(id));
            }
        }
    }

    /// Recomputing in place over already-written candles changes nothing:
    /// no state leaks across `compute` calls.
    #[test]
    fn recompute_in_place_is_idempotent(closes in arb_closes()) {
        let unit = create_indicator("macd").unwrap();
        let mut series = candles_from_closes(&closes);
        unit.compute(&mut series).unwrap();
        let first: Vec<_> = series.iter().map(|c| c.output("macd").cloned()).collect();
        unit.compute(&mut series).unwrap();
        for (candle, before) in series.iter().zip(&first) {
            prop_assert_eq!(candle.output("macd"), before.as_ref());
        }
    }
}

// ── 2. MACD identities ───────────────────────────────────────────────

proptest! {
    /// diff[i] = emaShort[i] - emaLong[i] exactly, with both EMAs seeded at
    /// close[0] and following the rearranged recurrence.
    #[test]
    fn macd_diff_is_ema_difference(closes in arb_closes()) {
        let unit = create_indicator("macd").unwrap();
        let mut series = candles_from_closes(&closes);
        unit.compute(&mut series).unwrap();

        let (short, long) = (12.0_f64, 26.0_f64);
        let mut ema_short = closes[0];
        let mut ema_long = closes[0];
        for (i, candle) in series.iter().enumerate() {
            if i > 0 {
                ema_short = (2.0 * closes[i] + (short - 1.0) * ema_short) / (short + 1.0);
                ema_long = (2.0 * closes[i] + (long - 1.0) * ema_long) / (long + 1.0);
            }
            prop_assert_eq!(
                candle.output_value("macd", "diff").unwrap(),
                ema_short - ema_long
            );
        }
    }

    /// macd[i] = 2 * (diff[i] - dea[i]) exactly, at every index.
    #[test]
    fn macd_bar_identity(closes in arb_closes()) {
        let unit = create_indicator("macd").unwrap();
        let mut series = candles_from_closes(&closes);
        unit.compute(&mut series).unwrap();
        for candle in &series {
            let out = candle.output("macd").unwrap();
            prop_assert_eq!(out["macd"], (out["diff"] - out["dea"]) * 2.0);
        }
    }

    /// Constant-price series: both EMAs equal the price, so diff and the
    /// bar column are zero everywhere.
    #[test]
    fn macd_constant_series_is_flat(price in 1.0..5_000.0_f64, len in 1..100_usize) {
        let unit = create_indicator("macd").unwrap();
        let mut series = candles_from_closes(&vec![price; len]);
        unit.compute(&mut series).unwrap();
        for candle in &series {
            prop_assert_eq!(candle.output_value("macd", "diff"), Some(0.0));
            prop_assert_eq!(candle.output_value("macd", "macd"), Some(0.0));
        }
    }
}

// ── 3. Causality ─────────────────────────────────────────────────────

proptest! {
    /// No lookahead: results over a prefix match the same indices of the
    /// full series, for every unit in the catalog.
    #[test]
    fn prefix_results_match_full_series(closes in arb_closes(), cut in 1..200_usize) {
        let cut = cut.min(closes.len());
        for id in CATALOG {
            let unit = create_indicator(id).unwrap();
            let mut full = candles_from_closes(&closes);
            let mut prefix = candles_from_closes(&closes[..cut]);
            unit.compute(&mut full).unwrap();
            unit.compute(&mut prefix).unwrap();
            for (ca, cb) in prefix.iter().zip(full.iter().take(cut)) {
                prop_assert_eq!(ca.output(id), cb.output(id));
            }
        }
    }
}

// ── 4. Eager validation ──────────────────────────────────────────────

proptest! {
    /// A rejected parameter override leaves the unit's old vector intact,
    /// and the subsequent compute still writes complete results.
    #[test]
    fn rejected_override_leaves_unit_usable(closes in arb_closes()) {
        let mut unit = create_indicator("macd").unwrap();
        assert!(unit.set_params(vec![5.0]).is_err());
        let mut series = candles_from_closes(&closes);
        unit.compute(&mut series).unwrap();
        for candle in &series {
            prop_assert!(candle.output("macd").is_some());
        }
    }
}

// ── End-to-end scenario ──────────────────────────────────────────────

/// 30 closes rising linearly from 100 to 129, default [12, 26, 9]: the
/// short EMA tracks the rise faster, so it ends above the long EMA and
/// diff ends positive.
#[test]
fn rising_series_short_ema_leads() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let unit = create_indicator("macd").unwrap();
    let mut series = candles_from_closes(&closes);
    unit.compute(&mut series).unwrap();

    let mut ema_short = closes[0];
    let mut ema_long = closes[0];
    for &close in &closes[1..] {
        ema_short = (2.0 * close + 11.0 * ema_short) / 13.0;
        ema_long = (2.0 * close + 25.0 * ema_long) / 27.0;
    }
    assert!(ema_short > ema_long);
    assert!(series[29].output_value("macd", "diff").unwrap() > 0.0);
}

/// An empty series is a no-op for every unit, not an error.
#[test]
fn empty_series_is_a_noop() {
    for id in CATALOG {
        let unit = create_indicator(id).unwrap();
        let mut series: Vec<Candle> = Vec::new();
        assert!(unit.compute(&mut series).is_ok());
    }
}

/// Two units attach to the same candles without clobbering each other.
#[test]
fn independent_indicators_do_not_collide() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
    let mut series = candles_from_closes(&closes);
    for id in CATALOG {
        create_indicator(id).unwrap().compute(&mut series).unwrap();
    }
    let last = series.last().unwrap();
    for id in CATALOG {
        assert!(last.output(id).is_some(), "missing outputs for {id}");
    }
    assert!(last.output_value("macd", "diff").is_some());
    assert!(last.output_value("ma", "ma60").is_some());
}
