//! Fee formulas of the perpx exchange
//!
//! Imbalance fees reward trades that rebalance open interest and charge
//! trades that skew it. A volatility fee proportional to the absolute
//! imbalance fee is added on top.

pub mod imbalance;
pub mod limits;

pub use imbalance::{exit_fees, imbalance_fees, trade_fees};
pub use limits::FeeLimits;

use crate::constants::{DEFAULT_VOLATILITY_FEE_RATE, FEE_PRECISION};
use crate::error::{MathResult, PerpxMathError};
use num_bigint::BigInt;
use num_traits::Zero;

/// Volatility fee configuration: fee = |imbalance fee| * fee_rate / fee_precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    fee_rate: BigInt,
    fee_precision: BigInt,
}

impl FeeSchedule {
    pub fn new(fee_rate: impl Into<BigInt>, fee_precision: impl Into<BigInt>) -> MathResult<Self> {
        let fee_precision = fee_precision.into();
        if fee_precision.is_zero() {
            return Err(PerpxMathError::DivisionByZero);
        }
        Ok(Self {
            fee_rate: fee_rate.into(),
            fee_precision,
        })
    }

    pub fn fee_rate(&self) -> &BigInt {
        &self.fee_rate
    }

    pub fn fee_precision(&self) -> &BigInt {
        &self.fee_precision
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            fee_rate: BigInt::from(DEFAULT_VOLATILITY_FEE_RATE),
            fee_precision: BigInt::from(FEE_PRECISION),
        }
    }
}

/// Market state and trade size feeding a fee computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeInputs {
    pub price: BigInt,
    pub amount: BigInt,
    pub longs: BigInt,
    pub shorts: BigInt,
    pub liquidity: BigInt,
}

impl FeeInputs {
    pub fn new(
        price: impl Into<BigInt>,
        amount: impl Into<BigInt>,
        longs: impl Into<BigInt>,
        shorts: impl Into<BigInt>,
        liquidity: impl Into<BigInt>,
    ) -> Self {
        Self {
            price: price.into(),
            amount: amount.into(),
            longs: longs.into(),
            shorts: shorts.into(),
            liquidity: liquidity.into(),
        }
    }

    /// Same market, opposite trade direction
    pub fn reversed(&self) -> Self {
        Self {
            amount: -&self.amount,
            ..self.clone()
        }
    }
}
