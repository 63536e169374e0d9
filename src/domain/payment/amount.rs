//! Money amounts in minor currency units and their gateway wire formats.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Positive amount in minor currency units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Creates an amount, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::not_positive("amount", value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Major units with exactly two decimals: `1000` -> `"10.00"`.
    ///
    /// Used for the `amount` field when a session is created.
    pub fn to_fixed_decimal(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }

    /// Major units in shortest decimal form: `500` -> `"5"`, `550` -> `"5.5"`.
    ///
    /// Used for the `amount` field of refunds.
    pub fn to_plain_decimal(&self) -> String {
        let fixed = self.to_fixed_decimal();
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

impl TryFrom<i64> for MinorUnits {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinorUnits> for i64 {
    fn from(amount: MinorUnits) -> Self {
        amount.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive() {
        assert!(MinorUnits::new(0).is_err());
        assert!(MinorUnits::new(-100).is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let amount = MinorUnits::new(1250).unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), serde_json::json!(1250));
        let restored: MinorUnits = serde_json::from_str("1250").unwrap();
        assert_eq!(restored, amount);
    }

    #[test]
    fn deserialization_rejects_non_positive() {
        assert!(serde_json::from_str::<MinorUnits>("0").is_err());
        assert!(serde_json::from_str::<MinorUnits>("-550").is_err());
    }

    #[test]
    fn fixed_decimal_always_has_two_places() {
        assert_eq!(MinorUnits::new(1000).unwrap().to_fixed_decimal(), "10.00");
        assert_eq!(MinorUnits::new(1999).unwrap().to_fixed_decimal(), "19.99");
        assert_eq!(MinorUnits::new(5).unwrap().to_fixed_decimal(), "0.05");
    }

    #[test]
    fn plain_decimal_drops_trailing_zeros() {
        assert_eq!(MinorUnits::new(500).unwrap().to_plain_decimal(), "5");
        assert_eq!(MinorUnits::new(550).unwrap().to_plain_decimal(), "5.5");
        assert_eq!(MinorUnits::new(1).unwrap().to_plain_decimal(), "0.01");
        assert_eq!(MinorUnits::new(1000).unwrap().to_plain_decimal(), "10");
        assert_eq!(MinorUnits::new(1010).unwrap().to_plain_decimal(), "10.1");
    }
}
