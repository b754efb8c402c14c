use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod class_statistics;
pub mod extract;
pub mod query_builder;
pub mod record;

/// Error type used across the crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Non-numeric value in field {field}: {value}")]
    NonNumeric { field: String, value: String },

    #[error("Division by zero: divisor field {0} is zero")]
    DivisionByZero(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Field value of a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer field
    Int(i64),
    /// Float field
    Float(f64),
    /// String field
    Str(String),
}

impl Value {
    /// Numeric reading of the value.
    ///
    /// Strings are read the way a lenient float parser reads them: leading
    /// whitespace is skipped and the longest numeric prefix wins, so `"3.06 "`
    /// and `"3.06mg"` both give `3.06`. Returns `None` when no prefix parses.
    ///
    /// The only non-finite spelling accepted is `Infinity` (case-sensitive,
    /// optionally signed) besides overflowing numerals; `"inf"` and `"nan"`
    /// read as no number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(s) => {
                let trimmed = s.trim_start();
                match fast_float::parse_partial::<f64, _>(trimmed) {
                    Ok((v, consumed)) if consumed > 0 && v.is_finite() => Some(v),
                    Ok((v, _)) if v.is_infinite() && accepts_infinity(trimmed) => Some(v),
                    _ => None,
                }
            }
        }
    }
}

/// `Infinity` spelled out, or a numeral that overflows (`1e400`)
fn accepts_infinity(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.starts_with("Infinity")
        || unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// JavaScript number stringification: shortest round-trip digits, exponent
/// form outside `[1e-6, 1e21)`, and `-0` printed as `0`.
fn write_js_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if v == 0.0 {
        return f.write_str("0");
    }

    let magnitude = v.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", v);
    }

    // `{:e}` gives "1e21" / "1.5e-7"; JS signs positive exponents
    let formatted = format!("{:e}", v);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => f.write_str(&formatted),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// Group-key rendering: integral floats drop the fraction (`14.0` -> `14`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write_js_number(f, *v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Central-tendency measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    /// Arithmetic average
    Mean,
    /// Middle value of the sorted list
    Median,
    /// Most frequent value, first seen wins ties
    Mode,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Mean, Measure::Median, Measure::Mode];
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Measure::Mean => "Mean",
            Measure::Median => "Median",
            Measure::Mode => "Mode",
        };
        f.pad(name)
    }
}

/// How per-record values of a group are gathered before reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Every extracted value is kept
    #[default]
    Collect,
    /// Only the last extracted value of each group is kept
    LastSeen,
    /// A single value holding the sum of the group's values
    RunningSum,
}

/// Highest precision accepted by [`StatsConfig::validate`]; f64 carries ~15
/// significant decimal digits.
pub const MAX_PRECISION: u32 = 15;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Decimal places every statistic is rounded to
    pub precision: u32,
    pub accumulation: Accumulation,
}

impl StatsConfig {
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.precision > MAX_PRECISION {
            return Err(StatsError::Config(format!(
                "precision {} exceeds maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }
        Ok(())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            precision: 3,
            accumulation: Accumulation::Collect,
        }
    }
}

/// Mean, median and mode of one group.
///
/// `mean` is `NaN` and `median`/`mode` are `None` when the group had no
/// usable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of values that went into the reduction
    pub count: usize,
    pub mean: f64,
    pub median: Option<f64>,
    pub mode: Option<f64>,
}

impl Statistics {
    /// Reading of a single measure; an empty mean reads as `None`.
    pub fn get(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Mean => Some(self.mean).filter(|m| !m.is_nan()),
            Measure::Median => self.median,
            Measure::Mode => self.mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Group key -> statistics, in first-seen group order
pub type StatisticsResult = IndexMap<String, Statistics>;

/// Measure-major view of a result: one row per measure, one column per group.
pub fn transpose(result: &StatisticsResult) -> Vec<(Measure, Vec<(&str, Option<f64>)>)> {
    Measure::ALL
        .iter()
        .map(|&measure| {
            let row = result
                .iter()
                .map(|(key, stats)| (key.as_str(), stats.get(measure)))
                .collect();
            (measure, row)
        })
        .collect()
}
