use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "BRL";

//--------------------------------------       Money        ----------------------------------------------------------
/// A monetary amount in integer cents. Marketplace payloads carry prices as floats; convert them once at the boundary
/// with [`Money::from_float`] and do all arithmetic in cents.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a money amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MoneyConversionError(format!("{value} is not a finite number")));
        }
        let cents = value * 100.0;
        if cents.abs() > i64::MAX as f64 {
            return Err(MoneyConversionError(format!("{value} is too large to convert to cents")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(cents.round() as i64))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a float amount in major units to cents, rounding half away from zero. Out-of-range and non-finite
    /// inputs collapse to zero; marketplace payloads are the only source of floats and those never carry such values.
    pub fn from_float(value: f64) -> Self {
        Self::try_from(value).unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn float_conversion_rounds_to_cents() {
        assert_eq!(Money::from_float(100.0).value(), 10_000);
        assert_eq!(Money::from_float(80.555).value(), 8_056);
        assert_eq!(Money::from_float(0.004).value(), 0);
        assert_eq!(Money::from_float(-12.345).value(), -1_235);
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(Money::try_from(f64::NAN).is_err());
        assert!(Money::try_from(f64::INFINITY).is_err());
        assert_eq!(Money::from_float(f64::NAN).value(), 0);
    }

    #[test]
    fn display_in_major_units() {
        assert_eq!(Money::from_cents(10_000).to_string(), "100.00");
        assert_eq!(Money::from_cents(805).to_string(), "8.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_cents(1_000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).value(), 1_250);
        assert_eq!((a - b).value(), 750);
        assert_eq!((-b).value(), -250);
        assert_eq!((b * 4).value(), 1_000);
        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.value(), 1_500);
    }
}
