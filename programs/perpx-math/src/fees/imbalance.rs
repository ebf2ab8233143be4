//! Imbalance, trade and exit fees
//!
//! All divisions floor toward negative infinity.

use crate::constants::IMBALANCE_FEE_SCALE;
use crate::error::{MathResult, PerpxMathError};
use crate::fees::{FeeInputs, FeeSchedule};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use tracing::{debug, trace};

/// Imbalance fee of a trade
///
/// price * amount * (2 * longs * price + price * amount - 2 * shorts * price)
/// / 10^12 / (2 * liquidity)
pub fn imbalance_fees(inputs: &FeeInputs) -> MathResult<BigInt> {
    let FeeInputs {
        price,
        amount,
        longs,
        shorts,
        liquidity,
    } = inputs;
    if liquidity.is_zero() {
        debug!("imbalance fee requested for a market without liquidity");
        return Err(PerpxMathError::DivisionByZero);
    }

    let notional = price * amount;
    let skew = BigInt::from(2) * longs * price + &notional - BigInt::from(2) * shorts * price;
    let fee = (notional * skew)
        .div_floor(&BigInt::from(IMBALANCE_FEE_SCALE))
        .div_floor(&(BigInt::from(2) * liquidity));
    trace!(%fee, "imbalance fee");
    Ok(fee)
}

fn volatility_fee(imbalance: &BigInt, schedule: &FeeSchedule) -> BigInt {
    (imbalance.abs() * schedule.fee_rate()).div_floor(schedule.fee_precision())
}

/// Imbalance fee plus the volatility fee on its absolute value
pub fn trade_fees(inputs: &FeeInputs, schedule: &FeeSchedule) -> MathResult<BigInt> {
    let change = imbalance_fees(inputs)?;
    let volatility = volatility_fee(&change, schedule);
    Ok(change + volatility)
}

/// Fees for closing a set of positions
///
/// Each leg holds the position size as `amount`; closing trades the
/// opposite amount.
pub fn exit_fees(legs: &[FeeInputs], schedule: &FeeSchedule) -> MathResult<BigInt> {
    let imbalances = legs
        .iter()
        .map(|leg| imbalance_fees(&leg.reversed()))
        .collect::<MathResult<Vec<_>>>()?;

    let imbalance_total: BigInt = imbalances.iter().sum();
    let volatility_total: BigInt = imbalances
        .iter()
        .map(|fee| volatility_fee(fee, schedule))
        .sum();
    Ok(imbalance_total + volatility_total)
}
