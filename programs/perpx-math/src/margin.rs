//! Margin requirement of a portfolio
//!
//! requirement = sum(size_i * max(exp(sqrt(volatility_i) * k) - 1, 0.01))
//!
//! [`margin_requirement`] is the floating-point reference; the 64x61 variant
//! composes the same formula from the fixed-point primitives, which is what
//! the contract computes.

use crate::constants::MIN_MARGIN_FACTOR;
use crate::error::{MathResult, PerpxMathError};
use crate::math::{interp_exp, Fixed64x61};
use tracing::debug;

fn check_lengths(volatility: usize, size: usize) -> MathResult<()> {
    if volatility != size {
        debug!(volatility, size, "margin inputs have different lengths");
        return Err(PerpxMathError::LengthMismatch);
    }
    Ok(())
}

/// Floating-point margin requirement
pub fn margin_requirement(volatility: &[f64], k: f64, size: &[f64]) -> MathResult<f64> {
    check_lengths(volatility.len(), size.len())?;
    if !k.is_finite() {
        return Err(PerpxMathError::InvalidInput);
    }

    let mut total = 0.0;
    for (&vol, &size) in volatility.iter().zip(size) {
        if !vol.is_finite() || vol < 0.0 || !size.is_finite() {
            debug!(vol, size, "invalid margin input");
            return Err(PerpxMathError::InvalidInput);
        }
        let factor = ((vol.sqrt() * k).exp() - 1.0).max(MIN_MARGIN_FACTOR);
        total += size * factor;
    }
    Ok(total)
}

/// 64x61 margin requirement
pub fn margin_requirement_64x61(
    volatility: &[Fixed64x61],
    k: &Fixed64x61,
    size: &[Fixed64x61],
) -> MathResult<Fixed64x61> {
    check_lengths(volatility.len(), size.len())?;
    let one = Fixed64x61::one();
    let min_factor = Fixed64x61::from_f64(MIN_MARGIN_FACTOR)?;

    volatility
        .iter()
        .zip(size)
        .try_fold(Fixed64x61::zero(), |total, (vol, size)| {
            let growth = interp_exp(&vol.sqrt()?.checked_mul(k)?)?;
            let factor = growth.checked_sub(&one)?.max(min_factor.clone());
            total.checked_add(&size.checked_mul(&factor)?)
        })
}
