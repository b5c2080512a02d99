use core::ops::{
    Add, AddAssign, BitAnd, BitOr, Div, DivAssign, Mul, MulAssign, Neg, Rem, Shl, Shr, Sub,
    SubAssign,
};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use ethnum::U256;

use crate::scale::pow10_i128;

/// A 128-bit two's-complement integer used as the unscaled value of a
/// DECIMAL(precision, scale) type.
///
/// The value alone carries no scale or precision; both are external metadata
/// the caller tracks and passes into every scale-sensitive operation. The
/// integer is stored as two 64-bit limbs, a signed high word and an unsigned
/// low word.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal128 {
    // Field order matters: the derived comparisons order by `hi` first,
    // which is exactly the signed 128-bit two's-complement order.
    hi: i64,
    lo: u64,
}

// ============================================================================
// Constants
// ============================================================================

impl Decimal128 {
    /// Zero.
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    /// One.
    pub const ONE: Self = Self { hi: 0, lo: 1 };

    /// The largest value that fits the maximum precision: 10^38 - 1.
    pub const MAX: Self = Self::from_i128(pow10_i128(38) - 1);

    /// Maximum number of significant decimal digits.
    pub const MAX_PRECISION: i32 = 38;

    /// Maximum number of fractional digits.
    pub const MAX_SCALE: i32 = 38;

    /// The size of this type in bytes.
    pub const BYTES: usize = 16;
}

// ============================================================================
// Constructors and Raw Access
// ============================================================================

impl Decimal128 {
    /// Creates a value from a signed 64-bit integer, sign-extending into the
    /// high limb.
    #[inline(always)]
    pub const fn from_i64(value: i64) -> Self {
        Self {
            hi: value >> 63,
            lo: value as u64,
        }
    }

    /// Creates a value from an explicit (high, low) limb pair.
    #[inline(always)]
    pub const fn from_hilo(hi: i64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Creates a value from a native `i128` with the same bit pattern.
    #[inline(always)]
    pub const fn from_i128(value: i128) -> Self {
        Self {
            hi: (value >> 64) as i64,
            lo: value as u64,
        }
    }

    /// Returns the value as a native `i128` with the same bit pattern.
    #[inline(always)]
    pub const fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | self.lo as i128
    }

    #[inline(always)]
    pub(crate) const fn from_u128(value: u128) -> Self {
        Self {
            hi: (value >> 64) as i64,
            lo: value as u64,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_u128(self) -> u128 {
        ((self.hi as u64 as u128) << 64) | self.lo as u128
    }

    /// The signed high limb.
    #[inline(always)]
    pub const fn high_bits(self) -> i64 {
        self.hi
    }

    /// The unsigned low limb.
    #[inline(always)]
    pub const fn low_bits(self) -> u64 {
        self.lo
    }

    /// Creates a value from its memory representation as a byte array in
    /// native byte order.
    #[inline(always)]
    pub const fn from_ne_bytes(bytes: [u8; 16]) -> Self {
        Self::from_i128(i128::from_ne_bytes(bytes))
    }

    /// Creates a value from its representation as a byte array in little
    /// endian.
    #[inline(always)]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self::from_i128(i128::from_le_bytes(bytes))
    }

    /// Creates a value from its representation as a byte array in big endian.
    #[inline(always)]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self::from_i128(i128::from_be_bytes(bytes))
    }

    /// Returns the memory representation as a byte array in native byte
    /// order.
    #[inline(always)]
    pub const fn to_ne_bytes(self) -> [u8; 16] {
        self.to_i128().to_ne_bytes()
    }

    /// Returns the memory representation as a byte array in little-endian
    /// byte order.
    #[inline(always)]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.to_i128().to_le_bytes()
    }

    /// Returns the memory representation as a byte array in big-endian byte
    /// order.
    #[inline(always)]
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.to_i128().to_be_bytes()
    }
}

// ============================================================================
// Sign Operations
// ============================================================================

impl Decimal128 {
    /// Returns `+1` if the value is zero or positive, `-1` if it is strictly
    /// negative.
    ///
    /// Zero maps to `+1`, not `0`; the tie step of
    /// [`reduce_scale_by`](Self::reduce_scale_by) depends on this.
    #[inline(always)]
    pub const fn sign(self) -> i64 {
        1 | (self.hi >> 63)
    }

    /// Returns `true` if the value is strictly negative.
    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.hi < 0
    }

    /// Returns `true` if the value is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Counts the leading binary zeros of a non-negative value.
    #[inline(always)]
    pub const fn leading_zeros(self) -> u32 {
        debug_assert!(!self.is_negative());
        if self.hi == 0 {
            self.lo.leading_zeros() + 64
        } else {
            (self.hi as u64).leading_zeros()
        }
    }
}

// ============================================================================
// Arithmetic Core
// ============================================================================

impl Decimal128 {
    /// Two's-complement negation. Defined for every bit pattern, including
    /// the minimum value, which wraps to itself.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_neg(self) -> Self {
        let lo = (!self.lo).wrapping_add(1);
        let mut hi = !self.hi;
        if lo == 0 {
            hi = hi.wrapping_add(1);
        }
        Self { hi, lo }
    }

    /// Absolute value. The minimum value wraps to itself.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn abs(self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }

    /// Limb-wise addition with carry propagation into the high limb. Wraps
    /// silently on 128-bit overflow; callers that declared a precision check
    /// the result with [`fits_in_precision`](Self::fits_in_precision).
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        let lo = self.lo.wrapping_add(rhs.lo);
        let hi = self
            .hi
            .wrapping_add(rhs.hi)
            .wrapping_add((lo < self.lo) as i64);
        Self { hi, lo }
    }

    /// Limb-wise subtraction with borrow propagation into the high limb.
    /// Wraps silently on 128-bit overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        let lo = self.lo.wrapping_sub(rhs.lo);
        let hi = self
            .hi
            .wrapping_sub(rhs.hi)
            .wrapping_sub((lo > self.lo) as i64);
        Self { hi, lo }
    }

    /// Multiplication: the absolute values are multiplied through a widened
    /// 256-bit intermediate, the product is truncated to the low 128 bits and
    /// the combined sign is reapplied. Truncates silently on overflow,
    /// matching the add/subtract policy.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let negate = self.sign() != rhs.sign();
        let x = U256::from(self.abs().as_u128());
        let y = U256::from(rhs.abs().as_u128());
        let (_, low) = (x * y).into_words();
        let result = Self::from_u128(low);
        if negate {
            result.wrapping_neg()
        } else {
            result
        }
    }
}

// ============================================================================
// Bitwise Operations
// ============================================================================

impl Decimal128 {
    /// Logical shift left. Shifts of 128 bits or more produce zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn shift_left(self, bits: u32) -> Self {
        if bits == 0 {
            self
        } else if bits < 64 {
            let hi = ((self.hi as u64) << bits) | (self.lo >> (64 - bits));
            Self {
                hi: hi as i64,
                lo: self.lo << bits,
            }
        } else if bits < 128 {
            Self {
                hi: (self.lo << (bits - 64)) as i64,
                lo: 0,
            }
        } else {
            Self::ZERO
        }
    }

    /// Arithmetic (sign-propagating) shift right. Shifts of 128 bits or more
    /// fill with the sign.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn shift_right(self, bits: u32) -> Self {
        if bits == 0 {
            self
        } else if bits < 64 {
            let lo = (self.lo >> bits) | ((self.hi as u64) << (64 - bits));
            Self {
                hi: self.hi >> bits,
                lo,
            }
        } else if bits < 128 {
            Self {
                hi: self.hi >> 63,
                lo: (self.hi >> (bits - 64)) as u64,
            }
        } else {
            let hi = self.hi >> 63;
            Self { hi, lo: hi as u64 }
        }
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl Add for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl Sub for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.wrapping_sub(rhs)
    }
}

impl Mul for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.wrapping_mul(rhs)
    }
}

impl Neg for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.wrapping_neg()
    }
}

impl Div for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs).expect("attempt to divide by zero").0
    }
}

impl Rem for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn rem(self, rhs: Self) -> Self::Output {
        self.divide(rhs).expect("attempt to divide by zero").1
    }
}

impl AddAssign for Decimal128 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Decimal128 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Decimal128 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Decimal128 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl BitAnd for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            hi: self.hi & rhs.hi,
            lo: self.lo & rhs.lo,
        }
    }
}

impl BitOr for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            hi: self.hi | rhs.hi,
            lo: self.lo | rhs.lo,
        }
    }
}

impl Shl<u32> for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn shl(self, bits: u32) -> Self::Output {
        self.shift_left(bits)
    }
}

impl Shr<u32> for Decimal128 {
    type Output = Self;

    #[inline(always)]
    fn shr(self, bits: u32) -> Self::Output {
        self.shift_right(bits)
    }
}

// ============================================================================
// Standard Library Trait Implementations
// ============================================================================

impl From<i64> for Decimal128 {
    #[inline(always)]
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Decimal128 {
    #[inline(always)]
    fn from(value: i32) -> Self {
        Self::from_i64(value as i64)
    }
}

impl From<i128> for Decimal128 {
    #[inline(always)]
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Decimal128 {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - use the integer string representation
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - serialize the raw i128
            self.to_i128().serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Decimal128 {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            let value = i128::deserialize(deserializer)?;
            Ok(Self::from_i128(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Decimal128::ZERO.to_i128(), 0);
        assert_eq!(Decimal128::ONE.to_i128(), 1);
        assert_eq!(
            Decimal128::MAX.to_i128(),
            99_999_999_999_999_999_999_999_999_999_999_999_999i128
        );
    }

    #[test]
    fn test_from_i64_sign_extension() {
        let positive = Decimal128::from_i64(42);
        assert_eq!(positive.high_bits(), 0);
        assert_eq!(positive.low_bits(), 42);

        let negative = Decimal128::from_i64(-42);
        assert_eq!(negative.high_bits(), -1);
        assert_eq!(negative.low_bits(), (-42i64) as u64);
        assert_eq!(negative.to_i128(), -42);
    }

    #[test]
    fn test_from_hilo() {
        let v = Decimal128::from_hilo(1, 2);
        assert_eq!(v.to_i128(), (1i128 << 64) + 2);

        let v = Decimal128::from_hilo(-1, u64::MAX);
        assert_eq!(v.to_i128(), -1);
    }

    #[test]
    fn test_byte_round_trip() {
        let v = Decimal128::from_hilo(-123456, 9876543210);
        assert_eq!(Decimal128::from_ne_bytes(v.to_ne_bytes()), v);
        assert_eq!(Decimal128::from_le_bytes(v.to_le_bytes()), v);
        assert_eq!(Decimal128::from_be_bytes(v.to_be_bytes()), v);

        let raw: i128 = (-123456778i128 << 64) - 6789;
        assert_eq!(
            Decimal128::from_ne_bytes(raw.to_ne_bytes()).to_i128(),
            raw
        );
    }

    #[test]
    fn test_sign_of_zero_is_positive() {
        assert_eq!(Decimal128::ZERO.sign(), 1);
        assert_eq!(Decimal128::from_i64(7).sign(), 1);
        assert_eq!(Decimal128::from_i64(-7).sign(), -1);
        assert_eq!(Decimal128::from_hilo(i64::MIN, 0).sign(), -1);
    }

    #[test]
    fn test_negate() {
        let v = Decimal128::from_i64(123);
        assert_eq!(v.wrapping_neg().to_i128(), -123);
        assert_eq!(v.wrapping_neg().wrapping_neg(), v);
        assert_eq!(Decimal128::ZERO.wrapping_neg(), Decimal128::ZERO);

        // carry across the limb boundary
        let v = Decimal128::from_hilo(0, u64::MAX);
        assert_eq!(v.wrapping_neg().to_i128(), -(u64::MAX as i128));

        // the minimum value wraps to itself
        let min = Decimal128::from_hilo(i64::MIN, 0);
        assert_eq!(min.wrapping_neg(), min);
    }

    #[test]
    fn test_abs() {
        assert_eq!(Decimal128::from_i64(-5).abs(), Decimal128::from_i64(5));
        assert_eq!(Decimal128::from_i64(5).abs(), Decimal128::from_i64(5));
        assert_eq!(Decimal128::ZERO.abs(), Decimal128::ZERO);
    }

    #[test]
    fn test_add_carry_propagation() {
        let a = Decimal128::from_hilo(0, u64::MAX);
        let b = Decimal128::ONE;
        assert_eq!(a.wrapping_add(b), Decimal128::from_hilo(1, 0));

        let sum = Decimal128::from_i64(-12345678)
            .wrapping_add(Decimal128::from_hilo(-123456, (-22345678i64) as u64));
        assert_eq!(sum.to_i128(), -12345678i128 + ((-123456i128) << 64) + (-22345678i64) as u64 as i128);
    }

    #[test]
    fn test_sub_borrow_propagation() {
        let a = Decimal128::from_hilo(1, 0);
        let b = Decimal128::ONE;
        assert_eq!(a.wrapping_sub(b), Decimal128::from_hilo(0, u64::MAX));
        assert_eq!(
            Decimal128::from_i64(5).wrapping_sub(Decimal128::from_i64(7)),
            Decimal128::from_i64(-2)
        );
    }

    #[test]
    fn test_add_wraps_on_overflow() {
        let max = Decimal128::from_i128(i128::MAX);
        assert_eq!(max.wrapping_add(Decimal128::ONE).to_i128(), i128::MIN);
    }

    #[test]
    fn test_multiply() {
        let a = Decimal128::from_i64(-123456);
        let b = Decimal128::from_i64(789);
        assert_eq!(a.wrapping_mul(b).to_i128(), -123456i128 * 789);

        let big = Decimal128::from_i128(10i128.pow(20));
        assert_eq!(
            big.wrapping_mul(Decimal128::from_i64(-7)).to_i128(),
            -7 * 10i128.pow(20)
        );
    }

    #[test]
    fn test_multiply_truncates() {
        // 2^100 * 2^100 = 2^200, truncated to the low 128 bits = 0
        let v = Decimal128::ONE.shift_left(100);
        assert_eq!(v.wrapping_mul(v), Decimal128::ZERO);

        // (2^64 + 1)^2 = 2^128 + 2^65 + 1, truncated to 2^65 + 1
        let v = Decimal128::from_hilo(1, 1);
        assert_eq!(v.wrapping_mul(v).to_i128(), (1i128 << 65) + 1);
    }

    #[test]
    fn test_shift_left_ranges() {
        let v = Decimal128::from_hilo(0x0102030405060708, 0x090a0b0c0d0e0f10);
        assert_eq!(v.shift_left(0), v);
        assert_eq!(v.shift_left(8).to_i128(), v.to_i128() << 8);
        assert_eq!(
            Decimal128::ONE.shift_left(64),
            Decimal128::from_hilo(1, 0)
        );
        assert_eq!(
            Decimal128::ONE.shift_left(100).to_i128(),
            1i128 << 100
        );
        assert_eq!(v.shift_left(128), Decimal128::ZERO);
        assert_eq!(v.shift_left(200), Decimal128::ZERO);
    }

    #[test]
    fn test_shift_right_is_arithmetic() {
        let v = Decimal128::from_i128(-(1i128 << 100));
        assert_eq!(v.shift_right(0), v);
        assert_eq!(v.shift_right(36).to_i128(), -(1i128 << 64));
        assert_eq!(v.shift_right(64).to_i128(), -(1i128 << 36));
        assert_eq!(v.shift_right(100).to_i128(), -1);
        assert_eq!(v.shift_right(128).to_i128(), -1);
        assert_eq!(v.shift_right(200).to_i128(), -1);

        let v = Decimal128::from_i128(1i128 << 100);
        assert_eq!(v.shift_right(128), Decimal128::ZERO);
    }

    #[test]
    fn test_ordering_matches_i128() {
        let samples = [
            i128::MIN,
            -(1i128 << 100),
            -1,
            0,
            1,
            u64::MAX as i128,
            1i128 << 100,
            i128::MAX,
        ];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(
                    Decimal128::from_i128(a).cmp(&Decimal128::from_i128(b)),
                    a.cmp(&b),
                    "ordering mismatch for {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(Decimal128::ZERO.leading_zeros(), 128);
        assert_eq!(Decimal128::from_i64(1234567890).leading_zeros(), 97);
        assert_eq!(Decimal128::from_hilo(1, 0).leading_zeros(), 63);
    }

    #[test]
    fn test_bit_ops() {
        let a = Decimal128::from_hilo(0b1100, 0b1010);
        let b = Decimal128::from_hilo(0b1010, 0b1100);
        assert_eq!(a & b, Decimal128::from_hilo(0b1000, 0b1000));
        assert_eq!(a | b, Decimal128::from_hilo(0b1110, 0b1110));
    }

    #[test]
    fn test_operators_wrap() {
        let a = Decimal128::from_i64(100);
        let b = Decimal128::from_i64(3);
        assert_eq!((a + b).to_i128(), 103);
        assert_eq!((a - b).to_i128(), 97);
        assert_eq!((a * b).to_i128(), 300);
        assert_eq!((a / b).to_i128(), 33);
        assert_eq!((a % b).to_i128(), 1);
        assert_eq!((-a).to_i128(), -100);

        let mut c = a;
        c += b;
        c -= Decimal128::ONE;
        c *= Decimal128::from_i64(2);
        assert_eq!(c.to_i128(), 204);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_div_operator_by_zero_panics() {
        let _ = Decimal128::ONE / Decimal128::ZERO;
    }
}
