//! 128-bit fixed-point decimal arithmetic kernel
//!
//! This library provides the arithmetic and conversion engine behind a
//! columnar DECIMAL(precision, scale) type: a two's-complement 128-bit
//! integer interpreted as `unscaled_value * 10^-scale`, where precision and
//! scale are tracked by the caller and passed into every scale-sensitive
//! operation.
//!
//! - **Exact decimal math**: no floating-point rounding errors; add, subtract
//!   and multiply wrap like fixed-width integers, division produces quotient
//!   and remainder with C-style truncation toward zero
//! - **Full 38-digit range**: multi-word long division (Knuth Algorithm D)
//!   over 32-bit limbs covers divisors up to the full 128 bits
//! - **SQL-style type derivation**: precision/scale promotion rules for
//!   `+`, `-`, `*`, `/`, `%`
//! - **Lossless conversions**: decimal strings (fixed-point and scientific
//!   notation), `f32`/`f64` with documented error bounds, `i64` and raw bytes
//!
//! ## Example
//!
//! ```rust
//! use dec128::Decimal128;
//!
//! let parsed = Decimal128::parse("-12345678901234.9876543").unwrap();
//! assert_eq!(parsed.precision, 21);
//! assert_eq!(parsed.scale, 7);
//!
//! let (quotient, remainder) = Decimal128::from_i64(-12345678)
//!     .divide(Decimal128::from_i64(5))
//!     .unwrap();
//! assert_eq!(quotient, Decimal128::from_i64(-2469135));
//! assert_eq!(remainder, Decimal128::from_i64(-3));
//! ```
//!
//! Every operation is a pure function over value copies; there is no shared
//! mutable state and all lookup tables are compile-time constants, so values
//! may be used freely across threads.

mod decimal;
mod divide;
mod real;
mod scale;
mod text;

pub use decimal::Decimal128;
pub use scale::{
    add_sub_precision_scale, div_precision_scale, mod_precision_scale, mul_precision_scale,
};
pub use text::ParsedDecimal;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    #[error("overflow: value too large to represent")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("rescale would cause data loss")]
    RescaleDataLoss,

    #[error("invalid input format")]
    InvalidInput,
}

pub type Result<T> = core::result::Result<T, DecimalError>;
