//! ChartLab CLI — catalog and compute commands.
//!
//! Commands:
//! - `catalog` — list indicator identifiers, default parameters, output series
//! - `compute` — load candles from CSV, compute one indicator, print a
//!   locale-formatted table (or raw JSON with `--json`)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chartlab_core::{create_indicator, Candle, CATALOG};
use chartlab_format::{
    format_big_number, format_date, format_precision, set_locale, ChronoDateTimeFormatter,
    DEFAULT_DATE_PATTERN, PLACEHOLDER,
};

#[derive(Parser)]
#[command(
    name = "chartlab",
    about = "ChartLab CLI — compute chart indicators over CSV candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the indicator catalog with defaults and output series.
    Catalog,
    /// Compute an indicator over a CSV candle file and print a table.
    Compute {
        /// CSV file with a timestamp,open,high,low,close,volume header
        /// (timestamp in epoch milliseconds, ascending).
        #[arg(long)]
        input: PathBuf,

        /// Indicator identifier (see `catalog`).
        #[arg(long)]
        indicator: String,

        /// Comma-separated parameter override, e.g. 12,26,9.
        /// Wins over --config for the chosen indicator.
        #[arg(long)]
        params: Option<String>,

        /// TOML file with per-indicator parameter overrides.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Display locale: en, id, or anything registered by the host.
        #[arg(long, default_value = "en")]
        locale: String,

        /// Date pattern built from YYYY, MM, DD, hh:mm tokens.
        #[arg(long, default_value = DEFAULT_DATE_PATTERN)]
        pattern: String,

        /// Print only the last N rows.
        #[arg(long)]
        limit: Option<usize>,

        /// Emit the computed series as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Per-indicator parameter overrides, keyed by indicator identifier.
///
/// ```toml
/// [indicators.macd]
/// params = [5, 13, 4]
/// ```
#[derive(Debug, Default, Deserialize)]
struct OverrideConfig {
    #[serde(default)]
    indicators: HashMap<String, IndicatorOverride>,
}

#[derive(Debug, Deserialize)]
struct IndicatorOverride {
    params: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CsvCandle {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Catalog => run_catalog(),
        Commands::Compute {
            input,
            indicator,
            params,
            config,
            locale,
            pattern,
            limit,
            json,
        } => run_compute(
            &input, &indicator, params, config, &locale, &pattern, limit, json,
        ),
    }
}

fn run_catalog() -> Result<()> {
    for id in CATALOG {
        let unit = create_indicator(id)?;
        let params = unit
            .params()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<6} params [{params}]  precision {}  lookback {}  {}",
            unit.name(),
            unit.precision(),
            unit.lookback(),
            if unit.editable() { "editable" } else { "fixed" },
        );
        for spec in unit.output_specs() {
            println!("       {:<8} {:?}", spec.key, spec.hint);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_compute(
    input: &Path,
    indicator: &str,
    params: Option<String>,
    config: Option<PathBuf>,
    locale: &str,
    pattern: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    set_locale(locale)?;

    let mut unit = create_indicator(indicator)?;

    if let Some(path) = config {
        let overrides = load_config(&path)?;
        if let Some(entry) = overrides.indicators.get(unit.name()) {
            unit.set_params(entry.params.clone())
                .with_context(|| format!("override from {}", path.display()))?;
        }
    }
    if let Some(raw) = params {
        unit.set_params(parse_params(&raw)?)
            .context("--params override")?;
    }

    let mut series = load_candles(input)?;
    unit.compute(&mut series)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    let date_formatter = ChronoDateTimeFormatter::utc();
    let precision = unit.precision();
    let keys: Vec<String> = unit.output_specs().iter().map(|s| s.key.clone()).collect();

    print!("{:<18} {:>12} {:>10}", "time", "close", "volume");
    for key in &keys {
        print!(" {key:>12}");
    }
    println!();

    let start = series.len().saturating_sub(limit.unwrap_or(series.len()));
    for candle in &series[start..] {
        print!(
            "{:<18} {:>12} {:>10}",
            format_date(&date_formatter, candle.timestamp, pattern),
            format_precision(candle.close, 2),
            format_big_number(candle.volume),
        );
        for key in &keys {
            let cell = match candle.output_value(unit.name(), key) {
                Some(v) if v.is_finite() => format_precision(v, precision),
                _ => PLACEHOLDER.to_string(),
            };
            print!(" {cell:>12}");
        }
        println!();
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<OverrideConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_params(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("bad parameter value: {part:?}"))
        })
        .collect()
}

/// Load candles from CSV, enforcing non-decreasing timestamp order — the
/// engine's recurrences assume causal ordering.
fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening candle file {}", path.display()))?;
    let mut candles = Vec::new();
    let mut prev_timestamp = i64::MIN;

    for (index, row) in reader.deserialize::<CsvCandle>().enumerate() {
        let row = row.with_context(|| format!("candle row {}", index + 1))?;
        if row.timestamp < prev_timestamp {
            bail!(
                "candle row {} out of order: timestamp {} precedes {}",
                index + 1,
                row.timestamp,
                prev_timestamp
            );
        }
        prev_timestamp = row.timestamp;
        candles.push(Candle::new(
            row.timestamp,
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
        ));
    }
    Ok(candles)
}
