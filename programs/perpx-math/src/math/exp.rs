//! Exponential approximation for 64x61 values
//!
//! e^x is evaluated as 2^(x * log2 e). The binary exponent is split into an
//! integer part and a fractional part in [0, 1):
//!
//! - the integer part goes through [`coarse_int_scale`], a single
//!   floating-point evaluation of e^n (not 2^n) that the on-chain formula
//!   uses as its coarse step;
//! - the fractional part goes through [`exp2_fraction`], a degree 6
//!   polynomial for 2^f with a maximum error of 1.069e-7.
//!
//! The two are combined with a 64x61 multiply. For x in [0, ln 2) the
//! integer part is zero and the result tracks e^x within the polynomial
//! error; outside that interval the coarse step dominates.

use crate::constants::{EXP2_COEFFS, FRACT_PART, LOG2_E};
use crate::error::{MathResult, PerpxMathError};
use crate::math::fixed_point::Fixed64x61;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use tracing::{debug, trace};

/// e^x for a 64x61 natural exponent
pub fn interp_exp(x: &Fixed64x61) -> MathResult<Fixed64x61> {
    let log2_e = Fixed64x61::from_raw(BigInt::from(LOG2_E))?;
    let bin_exp = x.checked_mul(&log2_e)?;
    trace!(%x, %bin_exp, "natural exponent converted to base 2");
    interp_exp2(&bin_exp)
}

/// Exponential of a 64x61 binary exponent
///
/// Combines [`coarse_int_scale`] on the integer part with
/// [`exp2_fraction`] on the fractional part.
pub fn interp_exp2(x: &Fixed64x61) -> MathResult<Fixed64x61> {
    let int_scale = coarse_int_scale(&x.floor())?;
    let fract_part = exp2_fraction(&x.frac())?;
    trace!(%int_scale, %fract_part, "exp2 stages");
    int_scale.checked_mul(&fract_part)
}

/// Coarse floating-point step: e^n as a 64x61 value, truncated
///
/// This is the only floating-point evaluation in the pipeline.
pub fn coarse_int_scale(int_part: &BigInt) -> MathResult<Fixed64x61> {
    let n = int_part.to_f64().ok_or(PerpxMathError::Overflow)?;
    let scaled = n.exp() * FRACT_PART as f64;
    if !scaled.is_finite() {
        debug!(%int_part, "coarse exponent scale is not representable");
        return Err(PerpxMathError::Overflow);
    }
    let raw = BigInt::from_f64(scaled).ok_or(PerpxMathError::Overflow)?;
    Fixed64x61::from_raw(raw)
}

/// 2^f for f in [0, 1), Horner evaluation of the a6..a1 polynomial
pub fn exp2_fraction(fract: &Fixed64x61) -> MathResult<Fixed64x61> {
    let [a1, a2, a3, a4, a5, a6] = EXP2_COEFFS.map(|c| Fixed64x61::from_raw(BigInt::from(c)));
    let mut acc = a6?.checked_mul(fract)?;
    for coeff in [a5, a4, a3, a2] {
        acc = acc.checked_add(&coeff?)?.checked_mul(fract)?;
    }
    acc.checked_add(&a1?)
}
