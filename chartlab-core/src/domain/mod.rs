//! Domain types: the candle and its attached indicator outputs.

pub mod candle;

pub use candle::{Candle, OutputMap};
