//! Global constants for the perpx math helpers
//!
//! Central location for field, fixed-point and fee constants

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::sync::OnceLock;

/// Number of fractional bits of a 64x61 value
pub const FRACT_BITS: u32 = 61;

/// Scale factor of a 64x61 value (2^61)
pub const FRACT_PART: u64 = 1 << FRACT_BITS;

/// isqrt(FRACT_PART), used to rescale square roots
pub const FRACT_PART_SQRT: u64 = 1_518_500_249;

/// 64x61 values must have magnitude below 2^125
pub const BOUND_BITS: u32 = 125;

/// Field modulus 2^251 + 17 * 2^192 + 1, little-endian 64-bit limbs
pub const PRIME_LIMBS: [u64; 4] = [1, 0, 0, 0x0800_0000_0000_0011];

/// Liquidity values are reported with 6 decimals
pub const LIQUIDITY_PRECISION: u64 = 1_000_000;

/// log2(e) as a 64x61 value
pub const LOG2_E: u64 = 3_326_628_274_461_080_623;

/// Coefficients a1..a6 of the 2^x polynomial on [0, 1), 64x61 encoded
pub const EXP2_COEFFS: [u64; 6] = [
    2_305_842_762_765_193_127,
    1_598_306_039_479_152_907,
    553_724_477_747_739_017,
    128_818_789_015_678_071,
    20_620_759_886_412_153,
    4_372_943_086_487_302,
];

/// Maximum absolute error of the 2^x polynomial
pub const EXP2_MAX_ERROR: f64 = 1.069e-7;

/// Lower clamp of the per-market margin factor
pub const MIN_MARGIN_FACTOR: f64 = 0.01;

/// Prices carry 6 decimals
pub const PRICE_PRECISION: u64 = 1_000_000;

/// Divisor removing the price^2 scale from imbalance fees
pub const IMBALANCE_FEE_SCALE: u64 = PRICE_PRECISION * PRICE_PRECISION;

/// Fee rates are expressed over this precision
pub const FEE_PRECISION: u64 = 1_000_000;

/// Default volatility fee rate (10%)
pub const DEFAULT_VOLATILITY_FEE_RATE: u64 = 100_000;

/// Fee input limits
pub const MAX_PRICE: u64 = 10_000_000_000_000; // 10^13
pub const MAX_AMOUNT: u64 = 1 << 19;
pub const MAX_LIQUIDITY_BITS: u32 = 122;

/// The field modulus as an unsigned big integer
pub fn prime() -> &'static BigUint {
    static PRIME: OnceLock<BigUint> = OnceLock::new();
    PRIME.get_or_init(|| {
        PRIME_LIMBS
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &limb| (acc << 64u32) + limb)
    })
}

/// The field modulus as a signed big integer
pub fn prime_int() -> &'static BigInt {
    static PRIME_INT: OnceLock<BigInt> = OnceLock::new();
    PRIME_INT.get_or_init(|| BigInt::from(prime().clone()))
}

/// BOUND = 2^125
pub fn bound() -> &'static BigInt {
    static BOUND: OnceLock<BigInt> = OnceLock::new();
    BOUND.get_or_init(|| BigInt::one() << BOUND_BITS)
}
