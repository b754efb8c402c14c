use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::stats::{StatsError, Value};

/// One observation: named fields, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: HashMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field lookup that reports a missing field as an error
    pub fn field(&self, name: &str) -> Result<&Value, StatsError> {
        self.get(name)
            .ok_or_else(|| StatsError::MissingField(name.to_string()))
    }

    /// Numeric reading of a field
    ///
    /// # Errors
    /// [`StatsError::MissingField`] if the field is absent,
    /// [`StatsError::NonNumeric`] if it does not read as a number or reads
    /// as `NaN`.
    pub fn numeric(&self, name: &str) -> Result<f64, StatsError> {
        let value = self.field(name)?;
        value
            .as_f64()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| StatsError::NonNumeric {
                field: name.to_string(),
                value: value.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
