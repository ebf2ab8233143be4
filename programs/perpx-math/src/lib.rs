// Perpx math helpers
// 64x61 fixed-point arithmetic over the Starknet prime field, plus the fee,
// margin and position formulas checked against contract outputs

pub mod constants;
pub mod error;
pub mod felt;
pub mod fees;
pub mod margin;
pub mod math;
pub mod position;

pub use error::{MathResult, PerpxMathError};
pub use felt::{signed_int, Felt};
pub use fees::{exit_fees, imbalance_fees, trade_fees, FeeInputs, FeeLimits, FeeSchedule};
pub use margin::{margin_requirement, margin_requirement_64x61};
pub use math::{interp_exp, interp_exp2, to_fixed_point, to_liquidity_precision, Fixed64x61};
pub use position::{collateral_change, longs_shorts_change};
