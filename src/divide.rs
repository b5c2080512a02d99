//! Long division over big-endian 32-bit limb arrays.
//!
//! Operands are decomposed into sign + magnitude limbs; a single-limb divisor
//! takes a schoolbook path, anything wider runs a normalized Knuth
//! Algorithm D. Quotient and remainder follow C-style truncation toward
//! zero: the quotient sign is the XOR of the operand signs and the remainder
//! sign matches the dividend's.

use crate::decimal::Decimal128;
use crate::{DecimalError, Result};

// 128 bits as 32-bit limbs.
const LIMBS: usize = 4;

/// Expands a value into a big-endian array of 32-bit limbs holding its
/// absolute value, with leading zero limbs stripped. Returns the limbs, the
/// number in use and whether the value was negative.
fn fill_in_array(value: Decimal128) -> ([u32; LIMBS], usize, bool) {
    let was_negative = value.is_negative();
    let abs = value.abs();
    let high = abs.high_bits() as u64;
    let low = abs.low_bits();
    let mut array = [0u32; LIMBS];

    if high != 0 {
        if high > u32::MAX as u64 {
            array[0] = (high >> 32) as u32;
            array[1] = high as u32;
            array[2] = (low >> 32) as u32;
            array[3] = low as u32;
            return (array, 4, was_negative);
        }
        array[0] = high as u32;
        array[1] = (low >> 32) as u32;
        array[2] = low as u32;
        return (array, 3, was_negative);
    }

    if low > u32::MAX as u64 {
        array[0] = (low >> 32) as u32;
        array[1] = low as u32;
        return (array, 2, was_negative);
    }

    if low == 0 {
        return (array, 0, was_negative);
    }

    array[0] = low as u32;
    (array, 1, was_negative)
}

/// Shifts the limb array left by `bits` positions, `0 <= bits < 32`.
fn shift_array_left(array: &mut [u32], bits: u32) {
    let length = array.len();
    if length > 0 && bits != 0 {
        for i in 0..length - 1 {
            array[i] = (array[i] << bits) | (array[i + 1] >> (32 - bits));
        }
        array[length - 1] <<= bits;
    }
}

/// Shifts the limb array right by `bits` positions, `0 <= bits < 32`.
fn shift_array_right(array: &mut [u32], bits: u32) {
    let length = array.len();
    if length > 0 && bits != 0 {
        for i in (1..length).rev() {
            array[i] = (array[i] >> bits) | (array[i - 1] << (32 - bits));
        }
        array[0] >>= bits;
    }
}

/// Rebuilds a value from a big-endian limb array. Fails with `Overflow` when
/// limbs beyond the 128-bit window are non-zero.
fn build_from_array(array: &[u32]) -> Result<Decimal128> {
    let length = array.len();
    if length > LIMBS {
        for &limb in &array[..length - LIMBS] {
            if limb != 0 {
                return Err(DecimalError::Overflow);
            }
        }
    }

    // Assemble the trailing limbs into little-endian 64-bit words.
    let mut words = [0u64; 2];
    let mut next = length as isize - 1;
    for word in &mut words {
        if next < 0 {
            break;
        }
        let lower = array[next as usize] as u64;
        next -= 1;
        *word = if next < 0 {
            lower
        } else {
            let upper = array[next as usize] as u64;
            next -= 1;
            (upper << 32) + lower
        };
    }
    Ok(Decimal128::from_hilo(words[1] as i64, words[0]))
}

/// Restores the result and remainder signs from the operand signs.
fn fix_division_signs(
    mut result: Decimal128,
    mut remainder: Decimal128,
    dividend_was_negative: bool,
    divisor_was_negative: bool,
) -> (Decimal128, Decimal128) {
    if dividend_was_negative != divisor_was_negative {
        result = result.wrapping_neg();
    }
    if dividend_was_negative {
        remainder = remainder.wrapping_neg();
    }
    (result, remainder)
}

/// Division where the divisor fits into a single 32-bit limb: limb-by-limb
/// schoolbook division with a 64-bit running remainder.
fn single_divide(
    dividend: &[u32],
    divisor: u32,
    dividend_was_negative: bool,
    divisor_was_negative: bool,
) -> Result<(Decimal128, Decimal128)> {
    let mut remainder: u64 = 0;
    let mut result_array = [0u32; LIMBS + 1];
    for (limb, out) in dividend.iter().zip(result_array.iter_mut()) {
        remainder = (remainder << 32) + *limb as u64;
        *out = (remainder / divisor as u64) as u32;
        remainder %= divisor as u64;
    }
    let result = build_from_array(&result_array[..dividend.len()])?;
    let remainder = Decimal128::from_i64(remainder as i64);
    Ok(fix_division_signs(
        result,
        remainder,
        dividend_was_negative,
        divisor_was_negative,
    ))
}

impl Decimal128 {
    /// Divides `self` by `divisor`, producing `(quotient, remainder)`.
    ///
    /// The quotient truncates toward zero and the remainder carries the
    /// dividend's sign, matching two's-complement hardware division, for
    /// every sign combination and for divisor magnitudes from one limb up to
    /// the full 128 bits.
    pub fn divide(self, divisor: Self) -> Result<(Self, Self)> {
        // Split both operands into limbs; the dividend keeps an extra zero
        // limb in front for the normalizing shift.
        let mut dividend_array = [0u32; LIMBS + 1];
        let (limbs, count, dividend_was_negative) = fill_in_array(self);
        dividend_array[1..1 + count].copy_from_slice(&limbs[..count]);
        let dividend_length = count + 1;

        let (mut divisor_limbs, divisor_length, divisor_was_negative) = fill_in_array(divisor);

        if divisor_length == 0 {
            return Err(DecimalError::DivisionByZero);
        }

        if dividend_length <= divisor_length {
            return Ok((Self::ZERO, self));
        }

        if divisor_length == 1 {
            return single_divide(
                &dividend_array[..dividend_length],
                divisor_limbs[0],
                dividend_was_negative,
                divisor_was_negative,
            );
        }

        let divisor_array = &mut divisor_limbs[..divisor_length];
        let result_length = dividend_length - divisor_length;
        let mut result_array = [0u32; LIMBS];

        // Normalize so the divisor's top limb has its high bit set; the
        // digit guesses below are then at worst two too large.
        let normalize_bits = divisor_array[0].leading_zeros();
        shift_array_left(divisor_array, normalize_bits);
        shift_array_left(&mut dividend_array[..dividend_length], normalize_bits);

        for j in 0..result_length {
            // Guess the next digit from the top two dividend limbs over the
            // divisor's top limb.
            let mut guess = u32::MAX;
            let high_dividend = ((dividend_array[j] as u64) << 32) | dividend_array[j + 1] as u64;
            if dividend_array[j] != divisor_array[0] {
                guess = (high_dividend / divisor_array[0] as u64) as u32;
            }

            // Catch all the cases where the guess is two too large and most
            // of the cases where it is one too large.
            let mut rhat =
                high_dividend.wrapping_sub(guess as u64 * divisor_array[0] as u64) as u32;
            while divisor_array[1] as u64 * guess as u64
                > ((rhat as u64) << 32) + dividend_array[j + 2] as u64
            {
                guess -= 1;
                rhat = rhat.wrapping_add(divisor_array[0]);
                if rhat < divisor_array[0] {
                    break;
                }
            }

            // Subtract guess * divisor from the working dividend window.
            let mut mult: u64 = 0;
            for i in (0..divisor_length).rev() {
                mult += guess as u64 * divisor_array[i] as u64;
                let prev = dividend_array[j + i + 1];
                dividend_array[j + i + 1] = prev.wrapping_sub(mult as u32);
                mult >>= 32;
                if dividend_array[j + i + 1] > prev {
                    mult += 1;
                }
            }
            let prev = dividend_array[j];
            dividend_array[j] = prev.wrapping_sub(mult as u32);

            // The guess was still one too large: add the divisor back.
            if dividend_array[j] > prev {
                guess -= 1;
                let mut carry: u32 = 0;
                for i in (0..divisor_length).rev() {
                    let sum =
                        divisor_array[i] as u64 + dividend_array[j + i + 1] as u64 + carry as u64;
                    dividend_array[j + i + 1] = sum as u32;
                    carry = (sum >> 32) as u32;
                }
                dividend_array[j] = dividend_array[j].wrapping_add(carry);
            }

            result_array[j] = guess;
        }

        // Undo the normalization on the remainder.
        shift_array_right(&mut dividend_array[..dividend_length], normalize_bits);

        let result = build_from_array(&result_array[..result_length])?;
        let remainder = build_from_array(&dividend_array[..dividend_length])?;
        Ok(fix_division_signs(
            result,
            remainder,
            dividend_was_negative,
            divisor_was_negative,
        ))
    }
}
