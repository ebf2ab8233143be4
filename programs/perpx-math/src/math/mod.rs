//! Math module for the perpx helpers
//!
//! 64x61 fixed-point arithmetic and the exponential built on it

pub mod exp;
pub mod fixed_point;

// Re-export commonly used items
pub use exp::{coarse_int_scale, exp2_fraction, interp_exp, interp_exp2};
pub use fixed_point::{is_in_range, Fixed64x61};

use crate::error::MathResult;

/// toFixedPoint: scale a real number into 64x61
pub fn to_fixed_point(x: f64) -> MathResult<Fixed64x61> {
    Fixed64x61::from_f64(x)
}

/// Multiply two 64x61 values, failing on overflow
pub fn mul(x: &Fixed64x61, y: &Fixed64x61) -> MathResult<Fixed64x61> {
    x.checked_mul(y)
}

pub fn sqrt(x: &Fixed64x61) -> MathResult<Fixed64x61> {
    x.sqrt()
}

/// Rescale a 64x61 value to 10^6 precision
pub fn to_liquidity_precision(x: &Fixed64x61) -> num_bigint::BigInt {
    x.to_liquidity_precision()
}
