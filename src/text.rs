//! Decimal string parsing and formatting.
//!
//! The parser accepts `[sign] digits ['.' digits] [('e'|'E') [sign] digits]`
//! and reports the precision and scale the digits imply alongside the value.
//! The formatter renders the magnitude in base 1e9 groups and then places
//! the decimal point, switching to scientific notation below the same
//! adjusted-exponent threshold BigDecimal uses.

use core::fmt::{self, Write};
use core::str::FromStr;

use crate::decimal::Decimal128;
use crate::{DecimalError, Result};

// Bound on a single digit run and on formatter output: 39 digits plus sign,
// decimal point and exponent fit comfortably.
const MAX_STRING_LEN: usize = 48;

// A u64 holds 18 full decimal digits.
const INT64_DECIMAL_DIGITS: usize = 18;

const UINT64_POWERS_OF_TEN: [u64; INT64_DECIMAL_DIGITS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// A parsed decimal string: the value plus the precision and scale its
/// digits imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDecimal {
    pub value: Decimal128,
    pub precision: i32,
    pub scale: i32,
}

// ============================================================================
// Numeral Helpers
// ============================================================================

/// Parses a run of ASCII digits as a u64, rejecting anything else and
/// checking for overflow.
fn parse_u64(digits: &str) -> Option<u64> {
    let mut value: u64 = 0;
    for &b in digits.as_bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }
    Some(value)
}

/// Parses an optionally `-`-signed run of ASCII digits as an i32.
fn parse_i32(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(_) => (false, bytes),
        None => return None,
    };
    if digits.is_empty() {
        return None;
    }
    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as i32)?;
    }
    Some(if negative { -value } else { value })
}

// ============================================================================
// Parsing
// ============================================================================

struct DecimalComponents<'a> {
    sign: Option<u8>,
    whole_digits: &'a str,
    fractional_digits: &'a str,
    exponent: i32,
    has_exponent: bool,
}

/// Scans a run of digits starting at `start`. Runs longer than the string
/// bound are rejected rather than truncated.
fn digits_run(s: &str, start: usize) -> Option<(usize, &str)> {
    let bytes = s.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos - start > MAX_STRING_LEN {
        return None;
    }
    Some((pos, &s[start..pos]))
}

fn parse_components(s: &str) -> Option<DecimalComponents<'_>> {
    let bytes = s.as_bytes();
    let size = bytes.len();
    if size == 0 {
        return None;
    }

    let mut pos = 0;
    let mut sign = None;
    if bytes[pos] == b'-' || bytes[pos] == b'+' {
        sign = Some(bytes[pos]);
        pos += 1;
    }

    // first run of digits
    let (next, whole_digits) = digits_run(s, pos)?;
    pos = next;
    if pos == size {
        if whole_digits.is_empty() {
            return None;
        }
        return Some(DecimalComponents {
            sign,
            whole_digits,
            fractional_digits: "",
            exponent: 0,
            has_exponent: false,
        });
    }

    // optional dot followed by a second run of digits
    let mut fractional_digits = "";
    if bytes[pos] == b'.' {
        pos += 1;
        let (next, frac) = digits_run(s, pos)?;
        pos = next;
        fractional_digits = frac;
    }

    // need at least some digits, whole or fractional
    if whole_digits.is_empty() && fractional_digits.is_empty() {
        return None;
    }
    if pos == size {
        return Some(DecimalComponents {
            sign,
            whole_digits,
            fractional_digits,
            exponent: 0,
            has_exponent: false,
        });
    }

    // optional exponent
    if bytes[pos] == b'e' || bytes[pos] == b'E' {
        pos += 1;
        if pos != size && bytes[pos] == b'+' {
            pos += 1;
        }
        let exponent = parse_i32(&s[pos..])?;
        return Some(DecimalComponents {
            sign,
            whole_digits,
            fractional_digits,
            exponent,
            has_exponent: true,
        });
    }
    None
}

/// Folds a digit run into the two 64-bit limbs: each chunk of up to 18
/// digits is parsed as a u64 and combined with a widening multiply-add that
/// carries through the limbs.
fn shift_and_add(input: &str, out: &mut [u64; 2]) -> Result<()> {
    let len = input.len();
    let mut pos = 0;
    while pos < len {
        let group_size = INT64_DECIMAL_DIGITS.min(len - pos);
        let multiple = UINT64_POWERS_OF_TEN[group_size];
        let chunk = parse_u64(&input[pos..pos + group_size]).ok_or(DecimalError::InvalidInput)?;

        let mut carry = chunk;
        for limb in out.iter_mut() {
            let tmp = *limb as u128 * multiple as u128 + carry as u128;
            *limb = tmp as u64;
            carry = (tmp >> 64) as u64;
        }
        pos += group_size;
    }
    Ok(())
}

impl Decimal128 {
    /// Parses a decimal string, deriving precision and scale from the
    /// digits.
    ///
    /// Significant digits are the fractional digits plus the whole digits
    /// after stripping leading zeros; an exponent shifts the scale. A
    /// negative derived scale is folded back into the value (negative scales
    /// are disallowed for compatibility with external systems), failing with
    /// [`DecimalError::Overflow`] when that pushes past 38 digits.
    pub fn parse(s: &str) -> Result<ParsedDecimal> {
        let dec = parse_components(s).ok_or(DecimalError::InvalidInput)?;

        // significant digits, without leading zeros of the whole part
        let first_non_zero = dec.whole_digits.bytes().position(|b| b != b'0');
        let mut significant_digits = dec.fractional_digits.len();
        if let Some(first) = first_non_zero {
            significant_digits += dec.whole_digits.len() - first;
        }
        let mut precision = significant_digits as i32;

        let mut scale = if dec.has_exponent {
            -dec.exponent + dec.fractional_digits.len() as i32
        } else {
            dec.fractional_digits.len() as i32
        };

        let mut words = [0u64; 2];
        shift_and_add(dec.whole_digits, &mut words)?;
        shift_and_add(dec.fractional_digits, &mut words)?;
        let mut value = Self::from_hilo(words[1] as i64, words[0]);
        if dec.sign == Some(b'-') {
            value = value.wrapping_neg();
        }

        if scale < 0 {
            // force the scale to zero by folding the exponent into the value
            if -scale > Self::MAX_SCALE {
                return Err(DecimalError::Overflow);
            }
            value = value.wrapping_mul(Self::scale_multiplier(-scale));
            precision -= scale;
            scale = 0;
            if precision > Self::MAX_PRECISION {
                return Err(DecimalError::Overflow);
            }
        }

        Ok(ParsedDecimal {
            value,
            precision,
            scale,
        })
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Renders a little-endian 64-bit word array as decimal digits by repeatedly
/// dividing by 1e9 and emitting 9-digit groups.
fn append_array_to_digits(array: [u64; 2], out: &mut String) {
    let mut most = usize::MAX;
    for (i, &word) in array.iter().enumerate() {
        if word != 0 {
            most = i;
        }
    }
    if most == usize::MAX {
        out.push('0');
        return;
    }

    const K1E9: u64 = 1_000_000_000;
    let mut copy = array;
    // ceil(128 bits * log(2) / log(1e9)) segments at most
    let mut segments = [0u32; 5];
    let mut num_segments = 0;
    loop {
        // remainder = copy % 1e9, copy = copy / 1e9, one virtual 96-bit
        // step per word
        let mut remainder: u32 = 0;
        for elem in copy[..=most].iter_mut().rev() {
            let hi = (*elem >> 32) as u32;
            let lo = *elem as u32;
            let dividend_hi = ((remainder as u64) << 32) | hi as u64;
            let quotient_hi = dividend_hi / K1E9;
            remainder = (dividend_hi % K1E9) as u32;
            let dividend_lo = ((remainder as u64) << 32) | lo as u64;
            let quotient_lo = dividend_lo / K1E9;
            remainder = (dividend_lo % K1E9) as u32;
            *elem = (quotient_hi << 32) | quotient_lo;
        }
        segments[num_segments] = remainder;
        num_segments += 1;

        if copy[most] == 0 {
            if most == 0 {
                break;
            }
            most -= 1;
        }
    }

    // leading segment bare, the rest right-padded so 123 prints "000000123"
    let _ = write!(out, "{}", segments[num_segments - 1]);
    for &segment in segments[..num_segments - 1].iter().rev() {
        let _ = write!(out, "{segment:09}");
    }
}

/// Inserts the decimal point into an integer digit string, or switches to
/// scientific notation when the scale is negative or the adjusted exponent
/// drops below -6 (the BigDecimal threshold).
fn adjust_integer_digits(digits: &str, scale: i32) -> String {
    if scale == 0 {
        return digits.to_string();
    }
    debug_assert!(!digits.is_empty());

    let is_negative = digits.starts_with('-');
    let sign_offset = is_negative as usize;
    let num_digits = digits.len() - sign_offset;
    let adjusted_exponent = num_digits as i32 - 1 - scale;

    let mut out = String::with_capacity(MAX_STRING_LEN);
    if scale < 0 || adjusted_exponent < -6 {
        // "123" at scale -2 formats as "1.23E+4"
        let dot = 1 + sign_offset;
        out.push_str(&digits[..dot]);
        out.push('.');
        out.push_str(&digits[dot..]);
        out.push('E');
        if adjusted_exponent >= 0 {
            out.push('+');
        }
        let _ = write!(out, "{adjusted_exponent}");
        return out;
    }

    if num_digits as i32 > scale {
        // "123" at scale 1 formats as "12.3"
        let split = digits.len() - scale as usize;
        out.push_str(&digits[..split]);
        out.push('.');
        out.push_str(&digits[split..]);
        return out;
    }

    // "123" at scale 4 formats as "0.0123"
    if is_negative {
        out.push('-');
    }
    out.push_str("0.");
    for _ in 0..scale - num_digits as i32 {
        out.push('0');
    }
    out.push_str(&digits[sign_offset..]);
    out
}

impl Decimal128 {
    /// The unscaled value as a plain integer string.
    pub fn to_integer_string(self) -> String {
        let mut out = String::with_capacity(MAX_STRING_LEN);
        if self.is_negative() {
            out.push('-');
            let abs = self.wrapping_neg();
            append_array_to_digits([abs.low_bits(), abs.high_bits() as u64], &mut out);
        } else {
            append_array_to_digits([self.low_bits(), self.high_bits() as u64], &mut out);
        }
        out
    }

    /// Formats the value at `scale` fractional digits. Produces at most 48
    /// characters: fixed-point form, or scientific form when the scale is
    /// negative or the adjusted exponent is below -6.
    pub fn to_string_with_scale(self, scale: i32) -> String {
        adjust_integer_digits(&self.to_integer_string(), scale)
    }

    /// Narrows to an i64, failing with [`DecimalError::Overflow`] unless the
    /// high limb is the sign-extension of the low limb.
    pub fn to_i64(self) -> Result<i64> {
        if self.high_bits() != (self.low_bits() as i64) >> 63 {
            return Err(DecimalError::Overflow);
        }
        Ok(self.low_bits() as i64)
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_integer_string())
    }
}

impl fmt::Debug for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal128({self})")
    }
}

impl FromStr for Decimal128 {
    type Err = DecimalError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Self::parse(s)?.value)
    }
}
