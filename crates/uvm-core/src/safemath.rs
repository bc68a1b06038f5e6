//! # `safemath` Module
//!
//! Function-style facade over [`BigNum`], named after the VM's `safemath`
//! builtin so contract code reads the same on both sides.

use crate::domain::bignum::BigNum;
use crate::errors::ArithmeticError;

/// Lifts a decimal string.
///
/// # Errors
///
/// Returns `ArithmeticError::Parse` for malformed input.
pub fn bigint(text: &str) -> Result<BigNum, ArithmeticError> {
    BigNum::parse(text)
}

/// Lifts a native integer.
#[must_use]
pub fn bigint_from(n: i64) -> BigNum {
    BigNum::from(n)
}

/// `a + b`.
#[must_use]
pub fn add(a: &BigNum, b: &BigNum) -> BigNum {
    a.add(b)
}

/// `a - b`.
#[must_use]
pub fn sub(a: &BigNum, b: &BigNum) -> BigNum {
    a.sub(b)
}

/// `a * b`.
#[must_use]
pub fn mul(a: &BigNum, b: &BigNum) -> BigNum {
    a.mul(b)
}

/// `a / b`, truncated toward zero.
///
/// # Errors
///
/// Returns `DivideByZero` when `b` is zero.
pub fn div(a: &BigNum, b: &BigNum) -> Result<BigNum, ArithmeticError> {
    a.div(b)
}

/// Remainder of `a / b`, with the sign of `a`.
///
/// # Errors
///
/// Returns `DivideByZero` when `b` is zero.
pub fn rem(a: &BigNum, b: &BigNum) -> Result<BigNum, ArithmeticError> {
    a.rem(b)
}

/// `a` raised to `b`.
///
/// # Errors
///
/// Returns `NegativeExponent` or `ExponentTooLarge` for an unusable `b`.
pub fn pow(a: &BigNum, b: &BigNum) -> Result<BigNum, ArithmeticError> {
    a.pow(b)
}

/// `a > b`.
#[must_use]
pub fn gt(a: &BigNum, b: &BigNum) -> bool {
    a > b
}

/// `a >= b`.
#[must_use]
pub fn ge(a: &BigNum, b: &BigNum) -> bool {
    a >= b
}

/// `a < b`.
#[must_use]
pub fn lt(a: &BigNum, b: &BigNum) -> bool {
    a < b
}

/// `a <= b`.
#[must_use]
pub fn le(a: &BigNum, b: &BigNum) -> bool {
    a <= b
}

/// `a == b`.
#[must_use]
pub fn eq(a: &BigNum, b: &BigNum) -> bool {
    a == b
}

/// `a != b`.
#[must_use]
pub fn ne(a: &BigNum, b: &BigNum) -> bool {
    a != b
}

/// The smaller operand; `b` on a tie.
#[must_use]
pub fn min<'a>(a: &'a BigNum, b: &'a BigNum) -> &'a BigNum {
    BigNum::min(a, b)
}

/// The larger operand; `b` on a tie.
#[must_use]
pub fn max<'a>(a: &'a BigNum, b: &'a BigNum) -> &'a BigNum {
    BigNum::max(a, b)
}

/// Canonical decimal text.
#[must_use]
pub fn tostring(a: &BigNum) -> String {
    a.to_string()
}

/// Lowercase hex without `0x`.
#[must_use]
pub fn tohex(a: &BigNum) -> String {
    a.to_hex()
}

/// Low 64 bits as a signed integer.
#[must_use]
pub fn toint(a: &BigNum) -> i64 {
    a.to_int()
}

// =============================================================================
// TESTS
// =============================================================================
