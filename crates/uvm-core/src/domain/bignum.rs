//! # Exact Arithmetic
//!
//! Arbitrary-precision signed integers for ledger balances.
//!
//! Balances cross the storage boundary as canonical decimal strings: they are
//! lifted with [`BigNum::parse`], computed on, and lowered with `to_string`.
//! Nothing is ever narrowed to a machine integer on the way; [`BigNum::to_int`]
//! exists for display and interop only.
//!
//! ## Semantics
//!
//! | Operation | Rule |
//! |-----------|------|
//! | `div` | truncates toward zero |
//! | `rem` | sign follows the dividend |
//! | `pow` | `self ^ exp`, `exp` in `0..=u32::MAX` |
//! | `min` / `max` | return one operand; ties return the second |

use crate::errors::ArithmeticError;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Immutable arbitrary-precision integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigNum(BigInt);

impl BigNum {
    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Lifts a decimal string: optional `+`/`-`, then one or more digits.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Parse` for anything else, including empty
    /// input, whitespace, underscores and radix prefixes.
    pub fn parse(input: &str) -> Result<Self, ArithmeticError> {
        let malformed = || ArithmeticError::Parse {
            input: input.to_owned(),
        };
        let (negative, digits) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(malformed)?;
        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// True for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True for values greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// True for values less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Exact sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    /// Exact difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self(&self.0 - &other.0)
    }

    /// Exact product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    /// Quotient truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `DivideByZero` when `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self, ArithmeticError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }
        Ok(Self(&self.0 / &other.0))
    }

    /// Remainder whose sign follows the dividend.
    ///
    /// # Errors
    ///
    /// Returns `DivideByZero` when `other` is zero.
    pub fn rem(&self, other: &Self) -> Result<Self, ArithmeticError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }
        Ok(Self(&self.0 % &other.0))
    }

    /// `self` raised to `exp`.
    ///
    /// # Errors
    ///
    /// Returns `NegativeExponent` for `exp < 0` and `ExponentTooLarge` when
    /// `exp` does not fit in a `u32`.
    pub fn pow(&self, exp: &Self) -> Result<Self, ArithmeticError> {
        if exp.is_negative() {
            return Err(ArithmeticError::NegativeExponent(exp.to_string()));
        }
        let exp = exp
            .0
            .to_u32()
            .ok_or_else(|| ArithmeticError::ExponentTooLarge(exp.to_string()))?;
        Ok(Self(self.0.pow(exp)))
    }

    /// The smaller operand; `b` on a tie.
    ///
    /// An associated function so it is never confused with `Ord::min`.
    #[must_use]
    pub fn min<'a>(a: &'a Self, b: &'a Self) -> &'a Self {
        if a < b {
            a
        } else {
            b
        }
    }

    /// The larger operand; `b` on a tie.
    #[must_use]
    pub fn max<'a>(a: &'a Self, b: &'a Self) -> &'a Self {
        if a > b {
            a
        } else {
            b
        }
    }

    /// Lowercase hexadecimal, `-` prefixed when negative, no `0x`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_str_radix(16)
    }

    /// Low 64 bits of the two's-complement form, read as `i64`.
    ///
    /// Display and interop only; never feed the result back into arithmetic.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_int(&self) -> i64 {
        let low = &self.0 & &BigInt::from(u64::MAX);
        low.to_u64().map_or(0, |bits| bits as i64)
    }

    /// Borrow the inner integer.
    #[must_use]
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }
}

impl FromStr for BigNum {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical decimal: no leading zeros, `-0` never produced.
impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BigNum {
    fn from(n: i64) -> Self {
        Self(BigInt::from(n))
    }
}

impl From<u64> for BigNum {
    fn from(n: u64) -> Self {
        Self(BigInt::from(n))
    }
}

impl From<BigInt> for BigNum {
    fn from(n: BigInt) -> Self {
        Self(n)
    }
}

impl From<BigNum> for BigInt {
    fn from(n: BigNum) -> Self {
        n.0
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl Add for &BigNum {
    type Output = BigNum;

    fn add(self, rhs: Self) -> BigNum {
        BigNum(&self.0 + &rhs.0)
    }
}

impl Sub for &BigNum {
    type Output = BigNum;

    fn sub(self, rhs: Self) -> BigNum {
        BigNum(&self.0 - &rhs.0)
    }
}

impl Mul for &BigNum {
    type Output = BigNum;

    fn mul(self, rhs: Self) -> BigNum {
        BigNum(&self.0 * &rhs.0)
    }
}

impl Neg for BigNum {
    type Output = BigNum;

    fn neg(self) -> BigNum {
        BigNum(-self.0)
    }
}

// =============================================================================
// SERDE (canonical decimal strings)
// =============================================================================

impl Serialize for BigNum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigNum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
