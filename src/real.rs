//! Conversions between decimals and IEEE binary floats.
//!
//! `to_*` splits the value into whole and fractional parts so the result is
//! exact for integers, within 1 ULP when the fractional digit count fits the
//! mantissa's decimal capacity (8 digits for `f32`, 16 for `f64`) and within
//! `2^-(mantissa_bits - 1)` otherwise. `from_*` decomposes the float exactly
//! into `mantissa * 2^k` and reassociates the power of ten in bounded steps,
//! rounding half to even whenever bits are shifted out.

use core::ops::{Add, Mul, Neg};

use crate::decimal::Decimal128;
use crate::{DecimalError, Result};

const TWO_TO_64_F64: f64 = 18446744073709551616.0;

// ceil(log2(10^k)) for k in 0..=76
const CEIL_LOG2_POWERS_OF_TEN: [i32; 77] = [
    0, 4, 7, 10, 14, 17, 20, 24, 27, 30, 34, 37, 40, 44, 47, 50, 54, 57, 60, 64, 67, 70, 74, 77,
    80, 84, 87, 90, 94, 97, 100, 103, 107, 110, 113, 117, 120, 123, 127, 130, 133, 137, 140, 143,
    147, 150, 153, 157, 160, 163, 167, 170, 173, 177, 180, 183, 187, 190, 193, 196, 200, 203, 206,
    210, 213, 216, 220, 223, 226, 230, 233, 236, 240, 243, 246, 250, 253,
];

// Power-of-ten tables indexed by exponent + 76. Spelled out as literals so
// every entry is the correctly rounded constant; a computed table would
// accumulate multiplication error.
const PRECOMPUTED_POWERS_OF_TEN: i32 = 76;

#[rustfmt::skip]
const FLOAT_POWERS_OF_TEN: [f32; 153] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0,
    1e-45, 1e-44, 1e-43, 1e-42, 1e-41, 1e-40, 1e-39, 1e-38, 1e-37, 1e-36,
    1e-35, 1e-34, 1e-33, 1e-32, 1e-31, 1e-30, 1e-29, 1e-28, 1e-27, 1e-26,
    1e-25, 1e-24, 1e-23, 1e-22, 1e-21, 1e-20, 1e-19, 1e-18, 1e-17, 1e-16,
    1e-15, 1e-14, 1e-13, 1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 1e-7, 1e-6,
    1e-5, 1e-4, 1e-3, 1e-2, 1e-1, 1e0, 1e1, 1e2, 1e3, 1e4,
    1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14,
    1e15, 1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23, 1e24,
    1e25, 1e26, 1e27, 1e28, 1e29, 1e30, 1e31, 1e32, 1e33, 1e34,
    1e35, 1e36, 1e37, 1e38,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY, f32::INFINITY,
    f32::INFINITY, f32::INFINITY, f32::INFINITY,
];

#[rustfmt::skip]
const DOUBLE_POWERS_OF_TEN: [f64; 153] = [
    1e-76, 1e-75, 1e-74, 1e-73, 1e-72, 1e-71, 1e-70, 1e-69, 1e-68, 1e-67,
    1e-66, 1e-65, 1e-64, 1e-63, 1e-62, 1e-61, 1e-60, 1e-59, 1e-58, 1e-57,
    1e-56, 1e-55, 1e-54, 1e-53, 1e-52, 1e-51, 1e-50, 1e-49, 1e-48, 1e-47,
    1e-46, 1e-45, 1e-44, 1e-43, 1e-42, 1e-41, 1e-40, 1e-39, 1e-38, 1e-37,
    1e-36, 1e-35, 1e-34, 1e-33, 1e-32, 1e-31, 1e-30, 1e-29, 1e-28, 1e-27,
    1e-26, 1e-25, 1e-24, 1e-23, 1e-22, 1e-21, 1e-20, 1e-19, 1e-18, 1e-17,
    1e-16, 1e-15, 1e-14, 1e-13, 1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 1e-7,
    1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1, 1e0, 1e1, 1e2, 1e3,
    1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13,
    1e14, 1e15, 1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23,
    1e24, 1e25, 1e26, 1e27, 1e28, 1e29, 1e30, 1e31, 1e32, 1e33,
    1e34, 1e35, 1e36, 1e37, 1e38, 1e39, 1e40, 1e41, 1e42, 1e43,
    1e44, 1e45, 1e46, 1e47, 1e48, 1e49, 1e50, 1e51, 1e52, 1e53,
    1e54, 1e55, 1e56, 1e57, 1e58, 1e59, 1e60, 1e61, 1e62, 1e63,
    1e64, 1e65, 1e66, 1e67, 1e68, 1e69, 1e70, 1e71, 1e72, 1e73,
    1e74, 1e75, 1e76,
];

/// Capabilities an IEEE binary float must expose for exact decimal
/// conversion: mantissa geometry, a power-of-ten table and the pieces of
/// `frexp`/`ldexp` std does not provide.
pub(crate) trait RealNumber:
    Copy + PartialOrd + Add<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    const MANTISSA_BITS: i32;
    /// ceil(log10(2^MANTISSA_BITS))
    const MANTISSA_DIGITS: i32;
    /// Integers up to this bound are exactly representable.
    const MAX_PRECISE_INTEGER: u64;
    const TWO_TO_64: Self;
    const ZERO: Self;

    fn is_finite(self) -> bool;
    /// 10^exp by table lookup, `exp` in `[-76, 76]`.
    fn power_of_ten(exp: i32) -> Self;
    /// Splits into `(mantissa, exponent)` with the mantissa in `[0.5, 1)`.
    fn frexp(self) -> (Self, i32);
    /// Multiplies by 2^exp exactly.
    fn ldexp(self, exp: i32) -> Self;
    fn truncate_to_u64(self) -> u64;
    fn from_i64(value: i64) -> Self;
    fn from_u64(value: u64) -> Self;
    fn into_f64(self) -> f64;
}

impl RealNumber for f32 {
    const MANTISSA_BITS: i32 = 24;
    const MANTISSA_DIGITS: i32 = 8;
    const MAX_PRECISE_INTEGER: u64 = (1 << 24) - 1;
    const TWO_TO_64: Self = 1.8446744e19;
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn is_finite(self) -> bool {
        self.is_finite()
    }

    #[inline(always)]
    fn power_of_ten(exp: i32) -> Self {
        debug_assert!(exp.abs() <= PRECOMPUTED_POWERS_OF_TEN);
        FLOAT_POWERS_OF_TEN[(exp + PRECOMPUTED_POWERS_OF_TEN) as usize]
    }

    fn frexp(self) -> (Self, i32) {
        const EXP_MASK: u32 = 0x7f80_0000;
        if self == 0.0 {
            return (self, 0);
        }
        let bits = self.to_bits();
        if bits & EXP_MASK == 0 {
            // subnormal: renormalize through an exact power-of-two blowup
            let (mantissa, exponent) = (self * Self::TWO_TO_64).frexp();
            return (mantissa, exponent - 64);
        }
        let exponent = ((bits & EXP_MASK) >> 23) as i32 - 126;
        let mantissa = f32::from_bits((bits & !EXP_MASK) | (126 << 23));
        (mantissa, exponent)
    }

    #[inline(always)]
    fn ldexp(self, exp: i32) -> Self {
        debug_assert!((-126..=127).contains(&exp));
        self * f32::from_bits(((127 + exp) as u32) << 23)
    }

    #[inline(always)]
    fn truncate_to_u64(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_i64(value: i64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl RealNumber for f64 {
    const MANTISSA_BITS: i32 = 53;
    const MANTISSA_DIGITS: i32 = 16;
    const MAX_PRECISE_INTEGER: u64 = (1 << 53) - 1;
    const TWO_TO_64: Self = 1.8446744073709552e19;
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn is_finite(self) -> bool {
        self.is_finite()
    }

    #[inline(always)]
    fn power_of_ten(exp: i32) -> Self {
        debug_assert!(exp.abs() <= PRECOMPUTED_POWERS_OF_TEN);
        DOUBLE_POWERS_OF_TEN[(exp + PRECOMPUTED_POWERS_OF_TEN) as usize]
    }

    fn frexp(self) -> (Self, i32) {
        const EXP_MASK: u64 = 0x7ff0_0000_0000_0000;
        if self == 0.0 {
            return (self, 0);
        }
        let bits = self.to_bits();
        if bits & EXP_MASK == 0 {
            let (mantissa, exponent) = (self * Self::TWO_TO_64).frexp();
            return (mantissa, exponent - 64);
        }
        let exponent = ((bits & EXP_MASK) >> 52) as i32 - 1022;
        let mantissa = f64::from_bits((bits & !EXP_MASK) | (1022 << 52));
        (mantissa, exponent)
    }

    #[inline(always)]
    fn ldexp(self, exp: i32) -> Self {
        debug_assert!((-1022..=1023).contains(&exp));
        self * f64::from_bits(((1023 + exp) as u64) << 52)
    }

    #[inline(always)]
    fn truncate_to_u64(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_i64(value: i64) -> Self {
        value as f64
    }

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        value as f64
    }

    #[inline(always)]
    fn into_f64(self) -> f64 {
        self
    }
}

/// Right shift of a positive value, rounding half to even. A sticky word
/// keeps track of every bit shifted out so an exact half is distinguishable
/// from slightly more or less than half.
pub(crate) fn rounded_right_shift(x: Decimal128, mut bits: i32) -> Decimal128 {
    if bits == 0 {
        return x;
    }
    let mut result_hi = x.high_bits();
    let mut result_lo = x.low_bits();
    let mut shifted: u64 = 0;
    while bits >= 64 {
        shifted = result_lo | (shifted > 0) as u64;
        result_lo = result_hi as u64;
        result_hi >>= 63; // sign fill
        bits -= 64;
    }
    if bits > 0 {
        shifted = (result_lo << (64 - bits)) | (shifted > 0) as u64;
        result_lo >>= bits;
        result_lo |= (result_hi as u64) << (64 - bits);
        result_hi >>= bits;
    }

    const HALF: u64 = 0x8000_0000_0000_0000;
    if shifted > HALF {
        // strictly more than half: round up
        result_lo = result_lo.wrapping_add(1);
        result_hi = result_hi.wrapping_add((result_lo == 0) as i64);
    } else if shifted == HALF {
        // exactly half: round to even
        if result_lo & 1 != 0 {
            result_lo = result_lo.wrapping_add(1);
            result_hi = result_hi.wrapping_add((result_lo == 0) as i64);
        }
    }
    Decimal128::from_hilo(result_hi, result_lo)
}

/// Approximate fallback that operates in the FP domain, subject to double
/// precision loss. Used when the exact algorithm does not apply.
fn from_positive_real_approx<R: RealNumber>(
    real: R,
    precision: i32,
    scale: i32,
) -> Result<Decimal128> {
    let x = (real * R::power_of_ten(scale)).into_f64().round_ties_even();
    let max_abs = R::power_of_ten(precision).into_f64();
    if x <= -max_abs || x >= max_abs {
        return Err(DecimalError::Overflow);
    }

    // split into high and low 64-bit halves
    let high = (x / TWO_TO_64_F64).floor();
    let low = x - high * TWO_TO_64_F64;
    debug_assert!(high >= 0.0 && high < 9.223372036854776e18); // 2^63
    debug_assert!(low >= 0.0 && low < TWO_TO_64_F64);
    Ok(Decimal128::from_hilo(high as i64, low as u64))
}

/// Constructs the decimal closest to `real * 10^scale` for positive finite
/// input.
fn from_positive_real<R: RealNumber>(real: R, precision: i32, scale: i32) -> Result<Decimal128> {
    if scale < 0 {
        // negative scales are not handled below
        return from_positive_real_approx(real, precision, scale);
    }

    // 1. Check that `real` is within acceptable bounds. The limit itself is
    //    allowed: rounding can make it smaller than the theoretical bound
    //    (1.0e23 < 10^23, for example).
    let limit = R::power_of_ten(precision - scale);
    if real > limit {
        return Err(DecimalError::Overflow);
    }

    // 2. Losslessly decompose `real` into `mant * 2^k`.
    let (real_mant, binary_exp) = real.frexp();
    let mant = real_mant.ldexp(R::MANTISSA_BITS).truncate_to_u64();
    let k = binary_exp - R::MANTISSA_BITS;

    // 3. Start from `mant` and work toward `mant * 2^k * 10^scale`.
    let mut x = Decimal128::from_i64(mant as i64);

    if k < 0 {
        // Right-shift by -k bits while multiplying by 10^scale, without
        // losing bits on either end.
        let mut right_shift_by = -k;
        let mut mul_by_ten_to = scale;

        // `x` has MANTISSA_DIGITS significant digits but room for
        // MAX_PRECISION, so this much can be multiplied in at once.
        let safe_mul_by_ten_to = Decimal128::MAX_PRECISION - R::MANTISSA_DIGITS;

        if mul_by_ten_to <= safe_mul_by_ten_to {
            x = x.wrapping_mul(Decimal128::scale_multiplier(mul_by_ten_to));
            x = rounded_right_shift(x, right_shift_by);
        } else {
            // The scale is too large to multiply in at once. Alternate
            // between shifting right to make room and multiplying by a
            // bounded power of ten.
            x = x.wrapping_mul(Decimal128::scale_multiplier(safe_mul_by_ten_to));
            mul_by_ten_to -= safe_mul_by_ten_to;

            // Only `precision` digits survive at the end, so bits beyond it
            // can be shifted away between steps. With `precision` at or near
            // the maximum this costs up to one digit of accuracy.
            let mul_step = 1.max(Decimal128::MAX_PRECISION - precision);

            let mut total_exp = 0;
            let mut total_shift = 0;
            while mul_by_ten_to > 0 && right_shift_by > 0 {
                let exp = mul_by_ten_to.min(mul_step);
                total_exp += exp;
                // the extra right shift needed so x * 10^total_exp still fits
                let bits =
                    right_shift_by.min(CEIL_LOG2_POWERS_OF_TEN[total_exp as usize] - total_shift);
                total_shift += bits;
                x = rounded_right_shift(x, bits);
                right_shift_by -= bits;
                x = x.wrapping_mul(Decimal128::scale_multiplier(exp));
                mul_by_ten_to -= exp;
            }
            if mul_by_ten_to > 0 {
                x = x.wrapping_mul(Decimal128::scale_multiplier(mul_by_ten_to));
            }
            if right_shift_by > 0 {
                x = rounded_right_shift(x, right_shift_by);
            }
        }
    } else {
        // k >= 0: multiply and shift left, in either order. The bound check
        // above guarantees no overflow and no fractional bits are lost.
        x = x.wrapping_mul(Decimal128::scale_multiplier(scale));
        x = x.shift_left(k as u32);
    }

    // Rounding might have pushed `x` just above the precision.
    if !x.fits_in_precision(precision) {
        return Err(DecimalError::Overflow);
    }
    Ok(x)
}

fn from_real<R: RealNumber>(x: R, precision: i32, scale: i32) -> Result<Decimal128> {
    debug_assert!(precision > 0 && precision <= Decimal128::MAX_PRECISION);
    debug_assert!(scale.abs() <= Decimal128::MAX_SCALE);

    if !x.is_finite() {
        return Err(DecimalError::InvalidInput);
    }
    if x < R::ZERO {
        Ok(from_positive_real(-x, precision, scale)?.wrapping_neg())
    } else {
        from_positive_real(x, precision, scale)
    }
}

fn to_real_positive_no_split<R: RealNumber>(decimal: Decimal128, scale: i32) -> R {
    let x = R::from_i64(decimal.high_bits()) * R::TWO_TO_64 + R::from_u64(decimal.low_bits());
    x * R::power_of_ten(-scale)
}

fn to_real_positive<R: RealNumber>(decimal: Decimal128, scale: i32) -> R {
    if scale <= 0
        || (decimal.high_bits() == 0 && decimal.low_bits() <= R::MAX_PRECISE_INTEGER)
    {
        // already an integer, or precisely representable as is
        return to_real_positive_no_split(decimal, scale);
    }

    // Split into whole and fractional parts so neither loses precision to
    // the other's magnitude.
    let (whole, fraction) = decimal.whole_and_fraction(scale);
    let whole_real: R = to_real_positive_no_split(whole, 0);
    let fraction_real: R = to_real_positive_no_split(fraction, scale);
    whole_real + fraction_real
}

fn to_real<R: RealNumber>(decimal: Decimal128, scale: i32) -> R {
    debug_assert!(scale.abs() <= Decimal128::MAX_SCALE);
    if decimal.is_negative() {
        // convert the absolute value to avoid precision loss
        -to_real_positive::<R>(decimal.wrapping_neg(), scale)
    } else {
        to_real_positive(decimal, scale)
    }
}

// ============================================================================
// Public Conversions
// ============================================================================

impl Decimal128 {
    /// Converts a finite `f32` to the decimal closest to
    /// `value * 10^scale`, bound-checked against `precision`.
    pub fn from_f32(value: f32, precision: i32, scale: i32) -> Result<Self> {
        from_real(value, precision, scale)
    }

    /// Converts a finite `f64` to the decimal closest to
    /// `value * 10^scale`, bound-checked against `precision`.
    pub fn from_f64(value: f64, precision: i32, scale: i32) -> Result<Self> {
        from_real(value, precision, scale)
    }

    /// Converts to `f32`. Exact for integers; within 1 ULP when the value
    /// has at most 8 fractional digits.
    pub fn to_f32(self, scale: i32) -> f32 {
        to_real(self, scale)
    }

    /// Converts to `f64`. Exact for integers; within 1 ULP when the value
    /// has at most 16 fractional digits.
    pub fn to_f64(self, scale: i32) -> f64 {
        to_real(self, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp() {
        let (mant, exp) = 1.0f64.frexp();
        assert_eq!((mant, exp), (0.5, 1));
        let (mant, exp) = 123.456f64.frexp();
        assert_eq!(mant.ldexp(exp), 123.456);
        assert!((0.5..1.0).contains(&mant));
        let (mant, exp) = 0.0f64.frexp();
        assert_eq!((mant, exp), (0.0, 0));

        // subnormal: 3 * 2^-1074 decomposes as 0.75 * 2^-1072
        let tiny = f64::from_bits(3);
        assert_eq!(tiny.frexp(), (0.75, -1072));

        let (mant, exp) = 123.456f32.frexp();
        assert_eq!(mant.ldexp(exp), 123.456f32);
    }

    #[test]
    fn test_power_of_ten_tables() {
        assert_eq!(f64::power_of_ten(0), 1.0);
        assert_eq!(f64::power_of_ten(38), 1e38);
        assert_eq!(f64::power_of_ten(-38), 1e-38);
        assert_eq!(f64::power_of_ten(76), 1e76);
        assert_eq!(f32::power_of_ten(38), 1e38f32);
        assert_eq!(f32::power_of_ten(39), f32::INFINITY);
        assert_eq!(f32::power_of_ten(-50), 0.0);
    }

    #[test]
    fn test_rounded_right_shift() {
        let shift = |v: i128, bits| rounded_right_shift(Decimal128::from_i128(v), bits).to_i128();
        assert_eq!(shift(6, 0), 6);
        assert_eq!(shift(1, 1), 0); // 0.5 rounds to even 0
        assert_eq!(shift(3, 1), 2); // 1.5 rounds to even 2
        assert_eq!(shift(5, 1), 2); // 2.5 rounds to even 2
        assert_eq!(shift(7, 1), 4); // 3.5 rounds to even 4
        assert_eq!(shift(5, 2), 1); // 1.25 rounds down
        assert_eq!(shift(7, 2), 2); // 1.75 rounds up

        // shifts spanning the limb boundary keep the sticky bits
        assert_eq!(shift(3i128 << 70, 71), 2); // 1.5 rounds to even 2
        assert_eq!(shift((3i128 << 70) + 1, 71), 2); // just above 1.5
        assert_eq!(shift((1i128 << 69) + 1, 70), 1); // just above half
        assert_eq!(shift(1i128 << 69, 70), 0); // exact half to even 0
        assert_eq!(shift(1i128 << 100, 36), 1i128 << 64);
    }

    #[test]
    fn test_from_f64_exact() {
        let v = Decimal128::from_f64(12345678.456789, 16, 6).unwrap();
        assert_eq!(v.to_i128(), 12345678456789);

        let v = Decimal128::from_f64(1.5, 5, 1).unwrap();
        assert_eq!(v.to_i128(), 15);

        let v = Decimal128::from_f64(-1.5, 5, 1).unwrap();
        assert_eq!(v.to_i128(), -15);

        let v = Decimal128::from_f64(0.0, 5, 2).unwrap();
        assert_eq!(v, Decimal128::ZERO);
    }

    #[test]
    fn test_from_f32_exact() {
        let v = Decimal128::from_f32(123.456, 10, 4).unwrap();
        assert_eq!(v.to_i128(), 1234560); // nearest f32 is 123.456001...

        let v = Decimal128::from_f32(-0.5, 5, 2).unwrap();
        assert_eq!(v.to_i128(), -50);
    }

    #[test]
    fn test_from_real_rejects_non_finite() {
        assert_eq!(
            Decimal128::from_f64(f64::NAN, 10, 2),
            Err(DecimalError::InvalidInput)
        );
        assert_eq!(
            Decimal128::from_f64(f64::INFINITY, 10, 2),
            Err(DecimalError::InvalidInput)
        );
        assert_eq!(
            Decimal128::from_f32(f32::NEG_INFINITY, 10, 2),
            Err(DecimalError::InvalidInput)
        );
    }

    #[test]
    fn test_from_real_overflow() {
        assert_eq!(
            Decimal128::from_f64(1e10, 5, 0),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            Decimal128::from_f64(99999.99, 5, 2),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_from_real_negative_scale_approx() {
        // scale -2: the value is expressed in hundreds
        let v = Decimal128::from_f64(12345.0, 10, -2).unwrap();
        assert_eq!(v.to_i128(), 123);

        let v = Decimal128::from_f64(-12345.0, 10, -2).unwrap();
        assert_eq!(v.to_i128(), -123);
    }

    #[test]
    fn test_from_real_large_scale_iterative() {
        // scale beyond MAX_PRECISION - MANTISSA_DIGITS forces the iterative
        // shift-and-multiply loop; both operands are powers of two so every
        // intermediate shift is exact
        let v = Decimal128::from_f64(0.5, 37, 30).unwrap();
        assert_eq!(v.to_i128(), 5 * 10i128.pow(29));

        let v = Decimal128::from_f64(1.0, 37, 36).unwrap();
        assert_eq!(v.to_i128(), 10i128.pow(36));
    }

    #[test]
    fn test_integer_round_trip_f64() {
        for x in [0u64, 1, 2, 999, 1 << 30, (1 << 53) - 1] {
            let v = Decimal128::from_f64(x as f64, 20, 0).unwrap();
            assert_eq!(v.to_i128(), x as i128);
            assert_eq!(v.to_f64(0), x as f64);
        }
    }

    #[test]
    fn test_integer_round_trip_f32() {
        for x in [0u64, 1, 7, 1 << 20, (1 << 24) - 1] {
            let v = Decimal128::from_f32(x as f32, 20, 0).unwrap();
            assert_eq!(v.to_i128(), x as i128);
            assert_eq!(v.to_f32(0), x as f32);
        }
    }

    #[test]
    fn test_to_real() {
        assert_eq!(Decimal128::from_i64(-15).to_f64(1), -1.5);
        assert_eq!(Decimal128::from_i64(15).to_f32(1), 1.5);

        // whole/fraction split path
        let v = Decimal128::from_i128(12345678456789);
        let x = v.to_f64(6);
        assert!((x - 12345678.456789).abs() < 1e-6);

        // negative scale multiplies the value up
        assert_eq!(Decimal128::from_i64(123).to_f64(-2), 12300.0);
    }

    #[test]
    fn test_real_round_trip_fractional() {
        let v = Decimal128::from_f64(12345678.456789, 16, 6).unwrap();
        let back = v.to_f64(6);
        // the documented bound is 1 ULP, about 1.9e-9 at this magnitude
        assert!((back - 12345678.456789).abs() < 1e-8);
    }
}
