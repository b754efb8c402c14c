//! Key and value extractors.
//!
//! A [`KeyExtractor`] picks the group a record belongs to, a
//! [`ValueExtractor`] derives the number that gets summarised. Both are
//! implemented for plain closures so ad-hoc extractors need no new type.

use serde::{Deserialize, Serialize};

use crate::stats::{StatsError, record::Record};

pub trait KeyExtractor {
    fn key(&self, record: &Record) -> Result<String, StatsError>;
}

pub trait ValueExtractor {
    fn extract(&self, record: &Record) -> Result<f64, StatsError>;
}

impl<F> KeyExtractor for F
where
    F: Fn(&Record) -> Result<String, StatsError>,
{
    fn key(&self, record: &Record) -> Result<String, StatsError> {
        self(record)
    }
}

impl<F> ValueExtractor for F
where
    F: Fn(&Record) -> Result<f64, StatsError>,
{
    fn extract(&self, record: &Record) -> Result<f64, StatsError> {
        self(record)
    }
}

/// Groups by the stringified value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKey {
    name: String,
}

impl FieldKey {
    pub fn new(name: &str) -> Self {
        FieldKey {
            name: name.to_string(),
        }
    }
}

impl KeyExtractor for FieldKey {
    fn key(&self, record: &Record) -> Result<String, StatsError> {
        Ok(record.field(&self.name)?.to_string())
    }
}

/// Reads one field as a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: &str) -> Self {
        Field {
            name: name.to_string(),
        }
    }
}

impl ValueExtractor for Field {
    fn extract(&self, record: &Record) -> Result<f64, StatsError> {
        record.numeric(&self.name)
    }
}

/// What a [`Ratio`] does with a zero divisor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionPolicy {
    /// IEEE semantics: `x / 0` is `±Infinity`, `0 / 0` is `NaN`
    #[default]
    Propagate,
    /// A zero divisor is a [`StatsError::DivisionByZero`]
    Reject,
}

/// Derived value `(a * b) / c` over three numeric fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratio {
    a: String,
    b: String,
    c: String,
    policy: DivisionPolicy,
}

impl Ratio {
    pub fn new(a: &str, b: &str, c: &str) -> Self {
        Ratio {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            policy: DivisionPolicy::Propagate,
        }
    }

    /// Wine "gamma": `(Ash * Hue) / Magnesium`
    pub fn gamma() -> Self {
        Ratio::new("Ash", "Hue", "Magnesium")
    }

    pub fn with_policy(mut self, policy: DivisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DivisionPolicy {
        self.policy
    }
}

impl ValueExtractor for Ratio {
    fn extract(&self, record: &Record) -> Result<f64, StatsError> {
        let a = record.numeric(&self.a)?;
        let b = record.numeric(&self.b)?;
        let c = record.numeric(&self.c)?;

        if c == 0.0 && self.policy == DivisionPolicy::Reject {
            return Err(StatsError::DivisionByZero(self.c.clone()));
        }

        Ok((a * b) / c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wine(ash: f64, hue: f64, magnesium: i64) -> Record {
        Record::new()
            .with("Alcohol", 1)
            .with("Ash", ash)
            .with("Hue", hue)
            .with("Magnesium", magnesium)
    }

    #[test]
    fn test_field_key_stringifies() {
        let r = Record::new().with("Alcohol", 14.0);
        assert_eq!(FieldKey::new("Alcohol").key(&r), Ok("14".to_string()));
        assert_eq!(
            FieldKey::new("Class").key(&r),
            Err(StatsError::MissingField("Class".to_string()))
        );
    }

    #[test]
    fn test_field_rejects_nan_spelling() {
        let r = Record::new().with("Flavanoids", "nan");
        assert_eq!(
            Field::new("Flavanoids").extract(&r),
            Err(StatsError::NonNumeric {
                field: "Flavanoids".to_string(),
                value: "nan".to_string(),
            })
        );
    }

    #[test]
    fn test_gamma_ratio() {
        let v = Ratio::gamma().extract(&wine(2.43, 1.04, 127)).unwrap();
        assert!((v - 2.43 * 1.04 / 127.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_divisor_propagates_by_default() {
        let v = Ratio::gamma().extract(&wine(2.0, 1.0, 0)).unwrap();
        assert_eq!(v, f64::INFINITY);

        let v = Ratio::gamma().extract(&wine(0.0, 1.0, 0)).unwrap();
        assert!(v.is_nan());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let gamma = Ratio::gamma().with_policy(DivisionPolicy::Reject);
        assert_eq!(
            gamma.extract(&wine(2.0, 1.0, 0)),
            Err(StatsError::DivisionByZero("Magnesium".to_string()))
        );
    }

    #[test]
    fn test_ratio_missing_operand() {
        let r = Record::new().with("Ash", 2.0).with("Magnesium", 100);
        assert_eq!(
            Ratio::gamma().extract(&r),
            Err(StatsError::MissingField("Hue".to_string()))
        );
    }

    #[test]
    fn test_closure_extractors() {
        let double = |r: &Record| r.numeric("Ash").map(|v| v * 2.0);
        assert_eq!(double.extract(&wine(1.5, 1.0, 1)), Ok(3.0));

        let constant = |_: &Record| Ok::<_, StatsError>("all".to_string());
        assert_eq!(constant.key(&Record::new()), Ok("all".to_string()));
    }
}
