//! Error types for the perpx math helpers
//!
//! Every fallible helper returns [`MathResult`]. Codes are stable so a failed
//! assertion can be matched against the code reported by a contract run.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use thiserror::Error;

/// Custom error type for fixed-point, field and fee computations
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum PerpxMathError {
    /// A 64x61 value fell outside [0, BOUND) ∪ (P - BOUND, P)
    #[error("64x61 value out of range")]
    Overflow = 6000,

    #[error("Division by zero")]
    DivisionByZero = 6001,

    #[error("Field element is not canonical")]
    NonCanonicalFelt = 6002,

    #[error("Invalid field element literal")]
    InvalidFeltLiteral = 6003,

    #[error("Input lengths do not match")]
    LengthMismatch = 6004,

    #[error("Invalid input")]
    InvalidInput = 6005,

    #[error("Value is out of range")]
    OutOfRange = 6006,
}

impl PerpxMathError {
    /// Numeric code of this error
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Decode an error from its numeric code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }
}

pub type MathResult<T> = Result<T, PerpxMathError>;
