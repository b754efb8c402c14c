//! # ClassStatistics
//!
//! `class_statistics` computes descriptive statistics of in-memory records,
//! grouped by a class field. It supports:
//!
//! - Grouping in first-seen order (no sorting of group keys)
//! - Field values and derived ratios (`(a * b) / c`, e.g. the wine "gamma")
//! - Mean, median and mode rounded to a configurable number of decimals
//! - Lenient numeric parsing of string fields; unusable values are skipped
//!
//! # Features
//!
//! - **Engine**: [`StatisticsEngine`] runs the group → extract → reduce pipeline
//! - **Query builder**: [`StatsQuery`] for the common field/ratio queries
//! - **Reducers**: [`round_to`], [`mean`], [`median`], [`mode`] usable on their own
//! - **Accumulation modes**: every value, last value only, or a running sum
//!
//! # Example
//!
//! ```rust
//! use class_statistics::{Record, StatsQuery};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records: Vec<Record> = serde_json::from_str(
//!         r#"[
//!             {"Alcohol": 1, "Flavanoids": 3.06, "Ash": 2.43, "Hue": 1.04, "Magnesium": 127},
//!             {"Alcohol": 1, "Flavanoids": "2.76", "Ash": 2.14, "Hue": 1.05, "Magnesium": 100},
//!             {"Alcohol": 2, "Flavanoids": 0.57, "Ash": 2.36, "Hue": 0.86, "Magnesium": 101}
//!         ]"#,
//!     )?;
//!
//!     let flavanoids = StatsQuery::new(&records)
//!         .group_by("Alcohol")
//!         .field("Flavanoids")
//!         .execute()?;
//!     for (class, stats) in &flavanoids {
//!         println!("Class {} => {:?}", class, stats);
//!     }
//!
//!     let gamma = StatsQuery::new(&records).group_by("Alcohol").gamma().execute()?;
//!     assert_eq!(gamma.len(), 2);
//!
//!     Ok(())
//! }
//! ```

mod helpers;
pub mod stats;

pub use helpers::reducers::{mean, median, mode, round_to};
pub use stats::{
    Accumulation, MAX_PRECISION, Measure, Statistics, StatisticsResult, StatsConfig, StatsError,
    Value,
    class_statistics::{StatisticsEngine, compute_class_statistics, group, summarize, try_group},
    extract::{DivisionPolicy, Field, FieldKey, KeyExtractor, Ratio, ValueExtractor},
    query_builder::{StatsQuery, ValueSpec},
    record::Record,
    transpose,
};
