//! Field elements of the Starknet prime field
//!
//! Contract outputs arrive as unsigned residues modulo P. Values above P / 2
//! encode negative integers, the same way the Cairo VM prints them.

use crate::constants::{prime, prime_int};
use crate::error::{MathResult, PerpxMathError};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Num, Zero};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// A canonical field element, always in [0, P)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Felt(BigUint);

/// Largest residue that still decodes as non-negative: (P - 1) / 2
///
/// This is the exact integer threshold. Comparing against P / 2 as a float
/// rounds it to 2^250, which would decode residues in (2^250, (P - 1) / 2]
/// as negative.
fn half_prime() -> &'static BigUint {
    static HALF: OnceLock<BigUint> = OnceLock::new();
    HALF.get_or_init(|| prime() >> 1u32)
}

impl Felt {
    pub fn zero() -> Self {
        Felt(BigUint::zero())
    }

    /// Wrap a residue, rejecting anything not below P
    pub fn new(value: BigUint) -> MathResult<Self> {
        if &value >= prime() {
            debug!(%value, "field element is not canonical");
            return Err(PerpxMathError::NonCanonicalFelt);
        }
        Ok(Felt(value))
    }

    /// Encode a signed integer as its residue modulo P
    pub fn from_signed(value: &BigInt) -> Self {
        let (_, magnitude) = value.mod_floor(prime_int()).into_parts();
        Felt(magnitude)
    }

    /// Decode the residue into a signed integer
    pub fn to_signed(&self) -> BigInt {
        if self.is_negative() {
            BigInt::from(self.0.clone()) - prime_int()
        } else {
            BigInt::from(self.0.clone())
        }
    }

    pub fn is_negative(&self) -> bool {
        &self.0 > half_prime()
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

/// Interpret a contract output as a signed integer
pub fn signed_int(value: &Felt) -> BigInt {
    value.to_signed()
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Felt(BigUint::from(value))
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Felt {
    type Err = PerpxMathError;

    /// Accepts decimal or `0x`-prefixed hex
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => BigUint::from_str_radix(hex, 16),
            None => BigUint::from_str_radix(s, 10),
        };
        let value = parsed.map_err(|_| {
            debug!(literal = s, "invalid field element literal");
            PerpxMathError::InvalidFeltLiteral
        })?;
        Felt::new(value)
    }
}
