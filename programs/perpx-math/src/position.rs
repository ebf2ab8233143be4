//! Position bookkeeping helpers
//!
//! Open interest and collateral changes caused by a trade on an existing
//! position. Zero counts as positive when comparing signs.

use crate::constants::PRICE_PRECISION;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Change of (longs, shorts) open interest when `amount` is traded against
/// a position of `size`
pub fn longs_shorts_change(amount: &BigInt, size: &BigInt) -> (BigInt, BigInt) {
    let zero = BigInt::zero();
    let amount_positive = !amount.is_negative();
    let size_positive = !size.is_negative();

    if amount_positive == size_positive {
        // increasing the position
        if amount > &zero {
            (amount.clone(), zero)
        } else {
            (zero, amount.abs())
        }
    } else if amount > &zero {
        // buying back a short
        if amount < &size.abs() {
            (zero, -amount)
        } else {
            (amount + size, size.clone())
        }
    } else if &amount.abs() < size {
        // selling down a long
        (amount.clone(), zero)
    } else {
        (-size, (size + amount).abs())
    }
}

/// Collateral change: -(price * -size / 10^6 + cost) - fees, floored
pub fn collateral_change(price: &BigInt, size: &BigInt, cost: &BigInt, fees: &BigInt) -> BigInt {
    let value = (price * -size).div_floor(&BigInt::from(PRICE_PRECISION));
    -(value + cost) - fees
}
