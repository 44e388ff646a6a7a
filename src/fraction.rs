use std::{fmt, str::FromStr};

use num::{BigInt, BigRational};
use thiserror::Error;

use crate::parser;

/// A rational number kept in lowest terms with the sign on the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
  numerator: i64,
  denominator: i64,
}

impl Fraction {
  pub const ZERO: Fraction = Fraction {
    numerator: 0,
    denominator: 1,
  };

  /// Builds a fraction and reduces it to canonical form.
  ///
  /// Fails with `InvalidArgument` for a zero denominator and with `Overflow`
  /// when the canonical pair doesn't fit into an `i64`, e.g. `new(i64::MIN, -1)`.
  pub fn new(numerator: i64, denominator: i64) -> Result<Fraction, FractionError> {
    if denominator == 0 {
      return Err(FractionError::InvalidArgument(
        "denominator must not be 0".to_string(),
      ));
    }
    // Reduce on magnitudes first, so |i64::MIN| never has to be negated
    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs());
    let numerator_magnitude = numerator.unsigned_abs() / divisor;
    let denominator_magnitude = denominator.unsigned_abs() / divisor;
    let negative = (numerator < 0) != (denominator < 0);

    let overflow = || {
      FractionError::Overflow(format!(
        "{}/{} can't be represented in lowest terms",
        numerator, denominator
      ))
    };
    let signed_numerator = if negative {
      -(numerator_magnitude as i128)
    } else {
      numerator_magnitude as i128
    };
    let numerator = i64::try_from(signed_numerator).map_err(|_| overflow())?;
    let denominator = i64::try_from(denominator_magnitude).map_err(|_| overflow())?;

    Ok(Fraction {
      numerator,
      denominator,
    })
  }

  /// Builds a fraction from a mixed number like `-2 3/8`.
  /// The sign is carried by `whole` alone, `-0 1/2` is `1/2`.
  pub fn from_mixed(whole: i64, numerator: i64, denominator: i64) -> Result<Fraction, FractionError> {
    if denominator <= 0 {
      return Err(FractionError::InvalidArgument(format!(
        "denominator of a mixed number must be > 0, found {}",
        denominator
      )));
    }
    if numerator < 0 {
      return Err(FractionError::InvalidArgument(format!(
        "numerator of a mixed number must not be negative, found {}",
        numerator
      )));
    }
    let improper = whole
      .checked_abs()
      .and_then(|whole| whole.checked_mul(denominator))
      .and_then(|scaled| scaled.checked_add(numerator))
      .ok_or_else(|| {
        FractionError::Overflow(format!(
          "{} {}/{} doesn't fit into 64 bits",
          whole, numerator, denominator
        ))
      })?;
    let improper = if whole < 0 { -improper } else { improper };
    Fraction::new(improper, denominator)
  }

  pub fn numerator(&self) -> i64 {
    self.numerator
  }

  pub fn denominator(&self) -> i64 {
    self.denominator
  }

  /// Exact sum of two fractions, failing with `Overflow` as soon as any
  /// intermediate product or sum leaves the `i64` range.
  pub fn checked_add(self, other: Fraction) -> Result<Fraction, FractionError> {
    let overflow = || FractionError::Overflow(format!("{} + {} overflows 64 bits", self, other));
    // Both denominators are positive, so the common divisor fits back into an i64
    let divisor = gcd(self.denominator as u64, other.denominator as u64) as i64;
    let self_factor = other.denominator / divisor;
    let other_factor = self.denominator / divisor;

    let left = self.numerator.checked_mul(self_factor).ok_or_else(overflow)?;
    let right = other.numerator.checked_mul(other_factor).ok_or_else(overflow)?;
    let numerator = left.checked_add(right).ok_or_else(overflow)?;
    let denominator = self.denominator.checked_mul(self_factor).ok_or_else(overflow)?;

    log::debug!(
      "{:?} + {:?} => {}/{} before reduction",
      self,
      other,
      numerator,
      denominator
    );
    Fraction::new(numerator, denominator)
  }

  /// Adds up every fraction, starting from zero.
  pub fn sum<I>(fractions: I) -> Result<Fraction, FractionError>
  where
    I: IntoIterator<Item = Fraction>,
  {
    fractions
      .into_iter()
      .try_fold(Fraction::ZERO, Fraction::checked_add)
  }

  pub fn to_big_rational(&self) -> BigRational {
    BigRational::new(BigInt::from(self.numerator), BigInt::from(self.denominator))
  }
}

impl Default for Fraction {
  fn default() -> Self {
    Fraction::ZERO
  }
}

impl From<i64> for Fraction {
  fn from(whole: i64) -> Self {
    Fraction {
      numerator: whole,
      denominator: 1,
    }
  }
}

impl FromStr for Fraction {
  type Err = FractionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parser::parse(s)
  }
}

impl fmt::Display for Fraction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.numerator == 0 {
      return write!(f, "0");
    }
    let sign = if self.numerator < 0 { "-" } else { "" };
    let magnitude = self.numerator.unsigned_abs();
    let denominator = self.denominator as u64;
    let whole = magnitude / denominator;
    let remainder = magnitude % denominator;

    if remainder == 0 {
      write!(f, "{}{}", sign, whole)
    } else if whole == 0 {
      write!(f, "{}{}/{}", sign, remainder, denominator)
    } else {
      write!(f, "{}{} {}/{}", sign, whole, remainder, denominator)
    }
  }
}

/// Euclidean gcd. `gcd(0, 0)` is 1 so that reducing zero never divides by zero.
pub fn gcd(a: u64, b: u64) -> u64 {
  let (mut a, mut b) = (a, b);
  while b != 0 {
    (a, b) = (b, a % b);
  }
  if a == 0 {
    1
  } else {
    a
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
  #[error("invalid format: {0}")]
  Format(String),
  #[error("overflow: {0}")]
  Overflow(String),
}
