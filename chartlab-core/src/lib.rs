//! ChartLab Core — candle domain types and the indicator computation engine.
//!
//! This crate contains the heart of the charting backend:
//! - Domain types (candles and their attached output maps)
//! - The `IndicatorCalculator` trait every computation unit implements
//! - The fixed catalog of computation units (MACD, MA, RSI, VOL)
//! - A registry mapping indicator identifiers to boxed trait objects
//!
//! Computation is synchronous and single-pass: each unit scans the series
//! oldest-to-newest, carries a handful of scalars between steps, and writes
//! its results onto the candles it read. Display formatting lives in
//! `chartlab-format`.

pub mod domain;
pub mod indicator;

pub use domain::{Candle, OutputMap};
pub use indicator::{
    create_indicator, IndicatorCalculator, IndicatorError, OutputSpec, RenderHint, CATALOG,
};
