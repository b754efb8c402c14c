use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    helpers::reducers::{mean, median, mode},
    stats::{
        Accumulation, Statistics, StatisticsResult, StatsConfig, StatsError,
        extract::{KeyExtractor, ValueExtractor},
        record::Record,
    },
};

/// Buckets `records` by `key_fn`, in order of first occurrence.
///
/// Every record lands in exactly one bucket; an empty input gives an empty map.
pub fn group<'a, T, F>(records: &'a [T], mut key_fn: F) -> IndexMap<String, Vec<&'a T>>
where
    F: FnMut(&T) -> String,
{
    let mut groups: IndexMap<String, Vec<&'a T>> = IndexMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record);
    }
    groups
}

/// [`group`] with a fallible key function; the first error aborts grouping.
pub fn try_group<'a, T, F, E>(
    records: &'a [T],
    mut key_fn: F,
) -> Result<IndexMap<String, Vec<&'a T>>, E>
where
    F: FnMut(&T) -> Result<String, E>,
{
    let mut groups: IndexMap<String, Vec<&'a T>> = IndexMap::new();
    for record in records {
        groups.entry(key_fn(record)?).or_default().push(record);
    }
    Ok(groups)
}

/// Reduces a value list to its [`Statistics`] at the given precision
pub fn summarize(values: &[f64], precision: u32) -> Statistics {
    Statistics {
        count: values.len(),
        mean: mean(values, precision),
        median: median(values, precision),
        mode: mode(values, precision),
    }
}

/// Per-class statistics over in-memory records
///
/// # Examples
///
/// ```rust
/// # use class_statistics::{StatisticsEngine, Record, FieldKey, Field};
/// let records = vec![
///     Record::new().with("Alcohol", 1).with("Flavanoids", 3.06),
///     Record::new().with("Alcohol", 1).with("Flavanoids", 2.76),
/// ];
/// let engine = StatisticsEngine::new();
/// let stats = engine
///     .compute(&records, &FieldKey::new("Alcohol"), &Field::new("Flavanoids"))
///     .unwrap();
/// assert_eq!(stats["1"].mean, 2.91);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatisticsEngine {
    config: StatsConfig,
}

impl StatisticsEngine {
    /// Engine with the default config (3 decimals, every value collected)
    pub fn new() -> Self {
        StatisticsEngine {
            config: StatsConfig::default(),
        }
    }

    /// # Errors
    /// [`StatsError::Config`] if the config does not validate.
    pub fn with_config(config: StatsConfig) -> Result<Self, StatsError> {
        config.validate()?;
        Ok(StatisticsEngine { config })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Groups `records` by `key` and reduces each group's values to mean,
    /// median and mode.
    ///
    /// Records whose value cannot be extracted (or extracts to `NaN`) are left
    /// out of their group's values; the group itself is still reported.
    ///
    /// # Errors
    /// Returns the key extractor's error for the first record without a usable
    /// group key.
    pub fn compute<K, V>(
        &self,
        records: &[Record],
        key: &K,
        value: &V,
    ) -> Result<StatisticsResult, StatsError>
    where
        K: KeyExtractor + ?Sized,
        V: ValueExtractor + ?Sized,
    {
        let groups = try_group(records, |r| key.key(r))?;

        let mut excluded = 0usize;
        let mut result = StatisticsResult::with_capacity(groups.len());

        for (group_key, members) in groups {
            let mut values = Vec::with_capacity(members.len());
            for record in members {
                match value.extract(record) {
                    Ok(v) if !v.is_nan() => values.push(v),
                    Ok(_) => {
                        trace!("group {}: value is NaN, excluded", group_key);
                        excluded += 1;
                    }
                    Err(e) => {
                        trace!("group {}: {}, excluded", group_key, e);
                        excluded += 1;
                    }
                }
            }

            let values = self.accumulate(values);
            result.insert(group_key, summarize(&values, self.config.precision));
        }

        debug!(
            "computed statistics for {} groups over {} records ({} excluded, {:?})",
            result.len(),
            records.len(),
            excluded,
            self.config.accumulation
        );

        Ok(result)
    }

    fn accumulate(&self, values: Vec<f64>) -> Vec<f64> {
        match self.config.accumulation {
            Accumulation::Collect => values,
            Accumulation::LastSeen => values.last().copied().into_iter().collect(),
            Accumulation::RunningSum => {
                if values.is_empty() {
                    values
                } else {
                    vec![values.iter().sum()]
                }
            }
        }
    }
}

/// [`StatisticsEngine::compute`] with the default config
pub fn compute_class_statistics<K, V>(
    records: &[Record],
    key: &K,
    value: &V,
) -> Result<StatisticsResult, StatsError>
where
    K: KeyExtractor + ?Sized,
    V: ValueExtractor + ?Sized,
{
    StatisticsEngine::new().compute(records, key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::extract::{Field, FieldKey, Ratio};

    fn scenario() -> Vec<Record> {
        vec![
            Record::new().with("Alcohol", 14).with("Flavanoids", 3.06),
            Record::new().with("Alcohol", 14).with("Flavanoids", 2.76),
            Record::new().with("Alcohol", 13).with("Flavanoids", 2.65),
        ]
    }

    fn engine(accumulation: Accumulation) -> StatisticsEngine {
        StatisticsEngine::with_config(StatsConfig {
            precision: 3,
            accumulation,
        })
        .unwrap()
    }

    #[test]
    fn test_group_first_seen_order() {
        let items = ["b1", "a1", "b2", "c1", "a2"];
        let groups = group(&items, |s| s[..1].to_string());
        let keys: Vec<&str> = groups.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups["a"], vec![&"a1", &"a2"]);
    }

    #[test]
    fn test_group_empty() {
        let items: [i32; 0] = [];
        assert!(group(&items, |v| v.to_string()).is_empty());
    }

    #[test]
    fn test_collect_averages_all_values() {
        let stats = engine(Accumulation::Collect)
            .compute(&scenario(), &FieldKey::new("Alcohol"), &Field::new("Flavanoids"))
            .unwrap();

        let keys: Vec<&String> = stats.keys().collect();
        assert_eq!(keys, vec!["14", "13"]);
        assert_eq!(stats["14"].mean, 2.91);
        assert_eq!(stats["14"].median, Some(2.91));
        assert_eq!(stats["14"].mode, Some(3.06));
        assert_eq!(stats["14"].count, 2);
        assert_eq!(stats["13"].mean, 2.65);
    }

    #[test]
    fn test_last_seen_keeps_last_record() {
        let stats = engine(Accumulation::LastSeen)
            .compute(&scenario(), &FieldKey::new("Alcohol"), &Field::new("Flavanoids"))
            .unwrap();

        assert_eq!(stats["14"].mean, 2.76);
        assert_eq!(stats["14"].median, Some(2.76));
        assert_eq!(stats["14"].mode, Some(2.76));
        assert_eq!(stats["14"].count, 1);
        assert_eq!(stats["13"].mode, Some(2.65));
    }

    #[test]
    fn test_running_sum_single_value() {
        let stats = engine(Accumulation::RunningSum)
            .compute(&scenario(), &FieldKey::new("Alcohol"), &Field::new("Flavanoids"))
            .unwrap();

        assert_eq!(stats["14"].mean, 5.82);
        assert_eq!(stats["14"].median, Some(5.82));
        assert_eq!(stats["14"].count, 1);
    }

    #[test]
    fn test_unparseable_values_excluded_group_kept() {
        let records = vec![
            Record::new().with("Alcohol", 1).with("Flavanoids", "n/a"),
            Record::new().with("Alcohol", 2).with("Flavanoids", "1.5"),
            Record::new().with("Alcohol", 2),
        ];
        let stats = compute_class_statistics(
            &records,
            &FieldKey::new("Alcohol"),
            &Field::new("Flavanoids"),
        )
        .unwrap();

        assert_eq!(stats.len(), 2);
        assert!(stats["1"].is_empty());
        assert!(stats["1"].mean.is_nan());
        assert_eq!(stats["1"].median, None);
        assert_eq!(stats["1"].mode, None);
        assert_eq!(stats["2"].count, 1);
        assert_eq!(stats["2"].mean, 1.5);
    }

    #[test]
    fn test_lowercase_inf_excluded_from_group() {
        let records = vec![
            Record::new().with("Alcohol", 1).with("Flavanoids", "inf"),
            Record::new().with("Alcohol", 1).with("Flavanoids", 2.0),
        ];
        let stats = compute_class_statistics(
            &records,
            &FieldKey::new("Alcohol"),
            &Field::new("Flavanoids"),
        )
        .unwrap();

        assert_eq!(stats["1"].count, 1);
        assert_eq!(stats["1"].mean, 2.0);
        assert_eq!(stats["1"].mode, Some(2.0));
    }

    #[test]
    fn test_signed_zero_keys_share_a_group() {
        let records = vec![
            Record::new().with("Alcohol", 0.0).with("Flavanoids", 1.0),
            Record::new().with("Alcohol", -0.0).with("Flavanoids", 3.0),
        ];
        let stats = compute_class_statistics(
            &records,
            &FieldKey::new("Alcohol"),
            &Field::new("Flavanoids"),
        )
        .unwrap();

        let keys: Vec<&String> = stats.keys().collect();
        assert_eq!(keys, vec!["0"]);
        assert_eq!(stats["0"].count, 2);
        assert_eq!(stats["0"].mean, 2.0);
    }

    #[test]
    fn test_missing_group_key_is_error() {
        let records = vec![Record::new().with("Flavanoids", 1.0)];
        let err = compute_class_statistics(
            &records,
            &FieldKey::new("Alcohol"),
            &Field::new("Flavanoids"),
        )
        .unwrap_err();
        assert_eq!(err, StatsError::MissingField("Alcohol".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let stats =
            compute_class_statistics(&[], &FieldKey::new("Alcohol"), &Field::new("Flavanoids"))
                .unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_zero_divisor_infinity_reaches_reducers() {
        let records = vec![
            Record::new()
                .with("Alcohol", 1)
                .with("Ash", 2.0)
                .with("Hue", 1.0)
                .with("Magnesium", 0),
            Record::new()
                .with("Alcohol", 1)
                .with("Ash", 0.0)
                .with("Hue", 1.0)
                .with("Magnesium", 0),
        ];
        let stats =
            compute_class_statistics(&records, &FieldKey::new("Alcohol"), &Ratio::gamma()).unwrap();

        // 0/0 is NaN and dropped, 2/0 stays as Infinity
        assert_eq!(stats["1"].count, 1);
        assert_eq!(stats["1"].mean, f64::INFINITY);
        assert_eq!(stats["1"].mode, Some(f64::INFINITY));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = StatsConfig {
            precision: 99,
            ..StatsConfig::default()
        };
        assert!(StatisticsEngine::with_config(cfg).is_err());
    }
}
