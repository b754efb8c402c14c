use crate::stats::{
    Accumulation, StatisticsResult, StatsConfig, StatsError,
    class_statistics::StatisticsEngine,
    extract::{DivisionPolicy, Field, FieldKey, Ratio, ValueExtractor},
    record::Record,
};

/// Which value a query summarises
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    Field(Field),
    Ratio(Ratio),
}

impl ValueExtractor for ValueSpec {
    fn extract(&self, record: &Record) -> Result<f64, StatsError> {
        match self {
            ValueSpec::Field(f) => f.extract(record),
            ValueSpec::Ratio(r) => r.extract(record),
        }
    }
}

/// Fluent builder for a per-class statistics query
///
/// ```rust
/// # use class_statistics::{Record, StatsQuery};
/// let records = vec![Record::new().with("Alcohol", 1).with("Flavanoids", "2.5")];
/// let stats = StatsQuery::new(&records)
///     .group_by("Alcohol")
///     .field("Flavanoids")
///     .execute()
///     .unwrap();
/// assert_eq!(stats["1"].median, Some(2.5));
/// ```
#[derive(Debug, Clone)]
pub struct StatsQuery<'a> {
    records: &'a [Record],
    group_by: Option<String>,
    value: Option<ValueSpec>,
    config: StatsConfig,
    division: DivisionPolicy,
}

impl<'a> StatsQuery<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            group_by: None,
            value: None,
            config: StatsConfig::default(),
            division: DivisionPolicy::Propagate,
        }
    }

    /// Set the grouping field
    pub fn group_by(mut self, column: &str) -> Self {
        self.group_by = Some(column.to_string());
        self
    }

    /// Summarise a single numeric field
    pub fn field(mut self, column: &str) -> Self {
        self.value = Some(ValueSpec::Field(Field::new(column)));
        self
    }

    /// Summarise `(a * b) / c`
    pub fn ratio(mut self, a: &str, b: &str, c: &str) -> Self {
        self.value = Some(ValueSpec::Ratio(Ratio::new(a, b, c)));
        self
    }

    /// Summarise the wine gamma ratio
    pub fn gamma(mut self) -> Self {
        self.value = Some(ValueSpec::Ratio(Ratio::gamma()));
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.config.precision = precision;
        self
    }

    pub fn accumulation(mut self, accumulation: Accumulation) -> Self {
        self.config.accumulation = accumulation;
        self
    }

    pub fn config(mut self, config: StatsConfig) -> Self {
        self.config = config;
        self
    }

    /// Treat a zero ratio divisor as an error (record excluded) instead of
    /// letting `Infinity` through
    pub fn reject_zero_divisor(mut self) -> Self {
        self.division = DivisionPolicy::Reject;
        self
    }

    /// Run the query
    ///
    /// # Errors
    /// [`StatsError::InvalidQuery`] if no group field or value was chosen,
    /// [`StatsError::Config`] for an invalid precision, or the group-key error
    /// of the first record missing the group field.
    pub fn execute(self) -> Result<StatisticsResult, StatsError> {
        let group_col = self
            .group_by
            .ok_or_else(|| StatsError::InvalidQuery("no group_by field".into()))?;
        let value = match self.value {
            Some(ValueSpec::Ratio(r)) => ValueSpec::Ratio(r.with_policy(self.division)),
            Some(spec) => spec,
            None => return Err(StatsError::InvalidQuery("no value selected".into())),
        };

        let engine = StatisticsEngine::with_config(self.config)?;
        engine.compute(self.records, &FieldKey::new(&group_col), &value)
    }
}
