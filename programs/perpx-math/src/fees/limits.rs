//! Input limits for fee computations
//!
//! Mirrors the range checks the exchange contract applies before computing
//! fees, so out-of-range inputs fail here instead of producing a value the
//! contract would never return.

use crate::constants::{MAX_AMOUNT, MAX_LIQUIDITY_BITS, MAX_PRICE};
use crate::error::{MathResult, PerpxMathError};
use crate::fees::FeeInputs;
use num_bigint::BigInt;
use num_traits::{One, Zero};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeLimits {
    /// Exclusive
    pub max_price: BigInt,
    /// Inclusive, both signs
    pub max_amount: BigInt,
    /// Exclusive
    pub max_liquidity: BigInt,
}

impl Default for FeeLimits {
    fn default() -> Self {
        Self {
            max_price: BigInt::from(MAX_PRICE),
            max_amount: BigInt::from(MAX_AMOUNT),
            max_liquidity: BigInt::one() << MAX_LIQUIDITY_BITS,
        }
    }
}

impl FeeLimits {
    /// Largest open interest on one side: (max_price - 1) * (max_amount - 1)
    pub fn max_open_interest(&self) -> BigInt {
        (&self.max_price - 1u32) * (&self.max_amount - 1u32)
    }

    pub fn check(&self, inputs: &FeeInputs) -> MathResult<()> {
        let one = BigInt::one();
        let zero = BigInt::zero();
        let max_open_interest = self.max_open_interest();

        check_field("price", &inputs.price, &one, &(&self.max_price - 1u32))?;
        check_field("amount", &inputs.amount, &-&self.max_amount, &self.max_amount)?;
        check_field("liquidity", &inputs.liquidity, &one, &(&self.max_liquidity - 1u32))?;
        check_field("longs", &inputs.longs, &zero, &max_open_interest)?;
        check_field("shorts", &inputs.shorts, &zero, &max_open_interest)?;
        Ok(())
    }
}

/// Inclusive range check
fn check_field(name: &str, value: &BigInt, min: &BigInt, max: &BigInt) -> MathResult<()> {
    if value < min || value > max {
        debug!(field = name, %value, %min, %max, "fee input out of range");
        return Err(PerpxMathError::OutOfRange);
    }
    Ok(())
}
