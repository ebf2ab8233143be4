//! 64x61 fixed-point arithmetic
//!
//! Values are reals scaled by 2^61 and stored as field elements on chain. A
//! value is valid only when its residue lies in [0, BOUND) or (P - BOUND, P);
//! every constructor and operation here enforces that, so an out-of-range
//! result surfaces as [`PerpxMathError::Overflow`] instead of wrapping.

use crate::constants::{bound, prime_int, FRACT_PART, FRACT_PART_SQRT, LIQUIDITY_PRECISION};
use crate::error::{MathResult, PerpxMathError};
use crate::felt::Felt;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::Neg;
use tracing::debug;

/// 64.61 fixed-point number (signed, 61 fractional bits)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed64x61 {
    raw: BigInt,
}

/// Range check shared by every operation
///
/// Negative integers are valid only above -BOUND. Non-negative integers are
/// valid below BOUND, or as field-encoded negatives in (P - BOUND, P).
pub fn is_in_range(raw: &BigInt) -> bool {
    if raw.is_negative() {
        return raw.magnitude() < bound().magnitude();
    }
    raw < bound() || (raw < prime_int() && raw > &(prime_int() - bound()))
}

impl Fixed64x61 {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = 61;

    pub fn zero() -> Self {
        Self { raw: BigInt::zero() }
    }

    /// The number 1.0
    pub fn one() -> Self {
        Self {
            raw: BigInt::from(FRACT_PART),
        }
    }

    /// Create from a raw scaled integer
    ///
    /// Field-encoded negatives (residues above P - BOUND) are normalised to
    /// their signed value.
    pub fn from_raw(raw: BigInt) -> MathResult<Self> {
        if !is_in_range(&raw) {
            debug!(%raw, "64x61 range check failed");
            return Err(PerpxMathError::Overflow);
        }
        let raw = if raw >= *bound() { raw - prime_int() } else { raw };
        Ok(Self { raw })
    }

    /// Create from an integer; any i64 fits below BOUND
    pub fn from_num(num: i64) -> Self {
        Self {
            raw: BigInt::from(num) << Self::FRACTION_BITS,
        }
    }

    /// Create from an arbitrary-precision integer
    pub fn from_int(num: &BigInt) -> MathResult<Self> {
        Self::from_raw(num << Self::FRACTION_BITS)
    }

    /// Create from a float, truncating toward zero
    pub fn from_f64(value: f64) -> MathResult<Self> {
        if !value.is_finite() {
            debug!(value, "non-finite input to 64x61 conversion");
            return Err(PerpxMathError::InvalidInput);
        }
        let raw = BigInt::from_f64(value * FRACT_PART as f64).ok_or(PerpxMathError::Overflow)?;
        Self::from_raw(raw)
    }

    /// Create from numerator and denominator (floor division)
    pub fn from_fraction(numerator: i64, denominator: i64) -> MathResult<Self> {
        if denominator == 0 {
            return Err(PerpxMathError::DivisionByZero);
        }
        let raw = (BigInt::from(numerator) << Self::FRACTION_BITS).div_floor(&BigInt::from(denominator));
        Self::from_raw(raw)
    }

    /// Decode a contract output
    pub fn from_felt(felt: &Felt) -> MathResult<Self> {
        Self::from_raw(BigInt::from(felt.value().clone()))
    }

    /// Encode as a field element
    pub fn to_felt(&self) -> Felt {
        Felt::from_signed(&self.raw)
    }

    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    pub fn into_raw(self) -> BigInt {
        self.raw
    }

    pub fn is_negative(&self) -> bool {
        self.raw.is_negative()
    }

    pub fn to_f64(&self) -> f64 {
        self.raw.to_f64().unwrap_or(f64::NAN) / FRACT_PART as f64
    }

    /// Integer part, rounded toward negative infinity
    pub fn floor(&self) -> BigInt {
        self.raw.div_floor(&BigInt::from(FRACT_PART))
    }

    /// Fractional part in [0, 1)
    pub fn frac(&self) -> Fixed64x61 {
        Self {
            raw: self.raw.mod_floor(&BigInt::from(FRACT_PART)),
        }
    }

    pub fn checked_add(&self, other: &Fixed64x61) -> MathResult<Fixed64x61> {
        Self::from_raw(&self.raw + &other.raw)
    }

    pub fn checked_sub(&self, other: &Fixed64x61) -> MathResult<Fixed64x61> {
        Self::from_raw(&self.raw - &other.raw)
    }

    /// Multiply and rescale by floor division
    ///
    /// The full product carries 122 fractional bits and may exceed BOUND;
    /// only the rescaled result is range checked.
    pub fn checked_mul(&self, other: &Fixed64x61) -> MathResult<Fixed64x61> {
        let product = &self.raw * &other.raw;
        Self::from_raw(product.div_floor(&BigInt::from(FRACT_PART)))
    }

    /// Square root of a non-negative value
    ///
    /// isqrt of the raw value carries only half the fractional bits, so the
    /// result is rescaled by FRACT_PART / isqrt(FRACT_PART).
    pub fn sqrt(&self) -> MathResult<Fixed64x61> {
        if self.raw.is_negative() {
            debug!(raw = %self.raw, "square root of a negative 64x61 value");
            return Err(PerpxMathError::InvalidInput);
        }
        let root = self.raw.sqrt();
        Self::from_raw(root * FRACT_PART / FRACT_PART_SQRT)
    }

    /// Rescale to the 10^6 liquidity precision, truncating
    pub fn to_liquidity_precision(&self) -> BigInt {
        self.raw.div_floor(&BigInt::from(FRACT_PART / LIQUIDITY_PRECISION))
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.raw == BigInt::from(FRACT_PART)
    }
}

impl Neg for Fixed64x61 {
    type Output = Fixed64x61;

    fn neg(self) -> Self::Output {
        Self { raw: -self.raw }
    }
}

impl fmt::Display for Fixed64x61 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Default for Fixed64x61 {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::prime_int;
    use num_bigint::BigUint;
    use num_traits::One;

    #[test]
    fn test_from_num() {
        assert_eq!(Fixed64x61::from_num(1), Fixed64x61::one());
        assert_eq!(Fixed64x61::from_num(3).raw(), &BigInt::from(3u64 * FRACT_PART));
        assert!(Fixed64x61::from_num(-2).is_negative());
        assert_eq!(Fixed64x61::from_num(i64::MAX).floor(), BigInt::from(i64::MAX));
    }

    #[test]
    fn test_from_f64_truncates() {
        let x = Fixed64x61::from_f64(1.5).unwrap();
        assert_eq!(x.raw(), &BigInt::from(3u64 * (FRACT_PART / 2)));
        let tiny = Fixed64x61::from_f64(1e-30).unwrap();
        assert!(tiny.is_zero());
        let neg = Fixed64x61::from_f64(-0.25).unwrap();
        assert_eq!(neg.raw(), &-BigInt::from(FRACT_PART / 4));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(Fixed64x61::from_f64(f64::NAN), Err(PerpxMathError::InvalidInput));
        assert_eq!(Fixed64x61::from_f64(f64::INFINITY), Err(PerpxMathError::InvalidInput));
    }

    #[test]
    fn test_range_boundaries() {
        let b = bound().clone();
        assert!(Fixed64x61::from_raw(&b - 1u32).is_ok());
        assert_eq!(Fixed64x61::from_raw(b.clone()), Err(PerpxMathError::Overflow));
        assert!(Fixed64x61::from_raw(-(&b - 1u32)).is_ok());
        assert_eq!(Fixed64x61::from_raw(-b.clone()), Err(PerpxMathError::Overflow));

        // field-encoded negatives
        let p = prime_int().clone();
        let minus_one = Fixed64x61::from_raw(&p - 1u32).unwrap();
        assert_eq!(minus_one.raw(), &BigInt::from(-1));
        assert_eq!(Fixed64x61::from_raw(&p - &b), Err(PerpxMathError::Overflow));
        assert!(Fixed64x61::from_raw(&p - &b + 1u32).is_ok());

        // never a field element
        assert_eq!(Fixed64x61::from_raw(p.clone()), Err(PerpxMathError::Overflow));
        assert_eq!(Fixed64x61::from_raw(&p + 5u32), Err(PerpxMathError::Overflow));
    }

    #[test]
    fn test_negative_integers_do_not_wrap() {
        let p = prime_int().clone();
        // -(P - 1) is congruent to 1 but is a plain negative integer
        assert_eq!(Fixed64x61::from_raw(-(&p - 1u32)), Err(PerpxMathError::Overflow));
        assert_eq!(
            Fixed64x61::from_int(&-p.div_floor(&BigInt::from(FRACT_PART))),
            Err(PerpxMathError::Overflow)
        );
        assert_eq!(Fixed64x61::from_raw(-(&p - bound() + 1u32)), Err(PerpxMathError::Overflow));
        assert!(!is_in_range(&-(BigInt::from(1) << 200u32)));

        let minus_bound = Fixed64x61::from_raw(-(bound() - 1u32)).unwrap();
        assert_eq!(
            minus_bound.checked_sub(&Fixed64x61::from_raw(BigInt::from(1)).unwrap()),
            Err(PerpxMathError::Overflow)
        );
    }

    #[test]
    fn test_into_raw() {
        let x = Fixed64x61::from_raw(prime_int() - 3u32).unwrap();
        assert_eq!(x.into_raw(), BigInt::from(-3));
    }

    #[test]
    fn test_felt_round_trip() {
        let x = Fixed64x61::from_f64(-3.75).unwrap();
        let felt = x.to_felt();
        assert!(felt.is_negative());
        assert_eq!(Fixed64x61::from_felt(&felt).unwrap(), x);

        let huge = Felt::new(BigUint::one() << 200u32).unwrap();
        assert_eq!(Fixed64x61::from_felt(&huge), Err(PerpxMathError::Overflow));
    }

    #[test]
    fn test_mul() {
        let two = Fixed64x61::from_num(2);
        let three = Fixed64x61::from_num(3);
        assert_eq!(two.checked_mul(&three).unwrap(), Fixed64x61::from_num(6));

        let half = Fixed64x61::from_fraction(1, 2).unwrap();
        let minus_three = Fixed64x61::from_num(-3);
        assert_eq!(
            half.checked_mul(&minus_three).unwrap(),
            Fixed64x61::from_fraction(-3, 2).unwrap()
        );
    }

    #[test]
    fn test_mul_floors_toward_negative_infinity() {
        // -1 raw unit times 0.5 is -0.5 raw units, floored to -1
        let smallest_negative = Fixed64x61::from_raw(BigInt::from(-1)).unwrap();
        let half = Fixed64x61::from_fraction(1, 2).unwrap();
        assert_eq!(smallest_negative.checked_mul(&half).unwrap().raw(), &BigInt::from(-1));

        let smallest_positive = Fixed64x61::from_raw(BigInt::one()).unwrap();
        assert!(smallest_positive.checked_mul(&half).unwrap().is_zero());
    }

    #[test]
    fn test_mul_overflow() {
        let big = Fixed64x61::from_num(1 << 40);
        assert_eq!(big.checked_mul(&big), Err(PerpxMathError::Overflow));
    }

    #[test]
    fn test_add_sub() {
        let a = Fixed64x61::from_num(10);
        let b = Fixed64x61::from_num(3);
        assert_eq!(a.checked_add(&b).unwrap(), Fixed64x61::from_num(13));
        assert_eq!(b.checked_sub(&a).unwrap(), Fixed64x61::from_num(-7));

        let near_bound = Fixed64x61::from_raw(bound() - 1u32).unwrap();
        assert_eq!(near_bound.checked_add(&Fixed64x61::one()), Err(PerpxMathError::Overflow));
    }

    #[test]
    fn test_sqrt() {
        let four = Fixed64x61::from_num(4);
        let two = four.sqrt().unwrap();
        assert_eq!(two.floor(), BigInt::from(2));
        assert!((two.to_f64() - 2.0).abs() < 1e-9);

        assert!(Fixed64x61::zero().sqrt().unwrap().is_zero());
        assert_eq!(
            Fixed64x61::from_num(-4).sqrt(),
            Err(PerpxMathError::InvalidInput)
        );
    }

    #[test]
    fn test_floor_and_frac() {
        let x = Fixed64x61::from_f64(-1.25).unwrap();
        assert_eq!(x.floor(), BigInt::from(-2));
        assert_eq!(x.frac(), Fixed64x61::from_fraction(3, 4).unwrap());
    }

    #[test]
    fn test_liquidity_precision() {
        let x = Fixed64x61::from_f64(1.5).unwrap();
        assert_eq!(x.to_liquidity_precision(), BigInt::from(1_500_000));
        assert_eq!(Fixed64x61::zero().to_liquidity_precision(), BigInt::zero());
    }
}
