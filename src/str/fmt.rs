use crate::{
    binary32::UnpackedFloat,
    codec::Codec,
    constants::{FRACTION_BITS, FRACTION_DIGITS},
    error::Error,
    ops::scaled_mul,
    str::Formatted,
};

use arrayvec::ArrayString;
use log::trace;

// The hidden bit and the fraction field of a normalized working value
const SIGNIFICAND_MASK: u32 = (1 << (FRACTION_BITS + 1)) - 1;

/// Renders `-?[0-9].[0-9]{6}(e-?[0-9]{1,2})?` (the exponent only for formats that have one).
///
/// The fraction is rescaled by the table row for its binary exponent so that it holds the
/// decimal mantissa in the working scale, then each digit is extracted by counting how many
/// times its positional weight can be subtracted.
pub(crate) fn format_unpacked(codec: &Codec, value: &UnpackedFloat) -> Result<Formatted, Error> {
    let format = codec.config();
    let tables = codec.tables();
    let scale = format.scale();
    let suffix = format.exponent_range().is_some();

    let mut text = ArrayString::new();
    if value.negative {
        text.push('-');
    }
    if value.is_zero() {
        text.push_str("0.");
        if suffix {
            text.push_str("e0");
        }
        return Ok(Formatted {
            text,
            exponent: 0,
            bucket: None,
        });
    }

    let bucket = tables
        .binary(value.exponent)
        .ok_or(Error::BinaryExponentOutOfRange(value.exponent))?;
    trace!(
        "2^{} rescaled by row {} ({:#010x} x 10^{})",
        value.exponent,
        bucket.index,
        bucket.fraction,
        -bucket.exponent
    );

    let working = ((value.fraction & SIGNIFICAND_MASK) << scale.guard_bits()) + scale.rounding_bias();
    let mut working = scaled_mul(working, bucket.fraction, scale.fraction_bits());

    if scale.integer_digits() > 0 {
        let weight = u64::from(tables.digit_scale(0));
        text.push(extract_digit(&mut working, weight));
        if working >= weight {
            // Needs a second integer digit
            return Err(Error::BinaryExponentOutOfRange(value.exponent));
        }
    } else {
        if working >> scale.fraction_bits() != 0 {
            return Err(Error::BinaryExponentOutOfRange(value.exponent));
        }
        text.push('0');
    }
    text.push('.');
    for position in 1..=FRACTION_DIGITS {
        text.push(extract_digit(&mut working, u64::from(tables.digit_scale(position))));
    }

    if suffix {
        text.push('e');
        push_exponent(&mut text, bucket.exponent);
    }

    Ok(Formatted {
        text,
        exponent: bucket.exponent,
        bucket: Some(bucket.index),
    })
}

// Counts how many times `weight` fits into `working`, subtracting as it goes. The count stops at
// 9: the rounded weights can leave a remainder slightly above ten times the next weight.
#[inline]
fn extract_digit(working: &mut u64, weight: u64) -> char {
    let mut digit = b'0';
    while digit < b'9' && *working >= weight {
        *working -= weight;
        digit += 1;
    }
    char::from(digit)
}

// Sign, then at most two digits without a leading zero.
fn push_exponent<const CAP: usize>(text: &mut ArrayString<CAP>, exponent: i32) {
    if exponent < 0 {
        text.push('-');
    }
    let mut units = exponent.unsigned_abs();
    let mut tens = 0u8;
    while units >= 10 {
        units -= 10;
        tens += 1;
    }
    if tens != 0 {
        text.push(char::from(b'0' + tens));
    }
    text.push(char::from(b'0' + units as u8));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_extracts_digits_by_subtraction() {
        let mut working = 7 * 26843546 + 12;
        assert_eq!('7', extract_digit(&mut working, 26843546));
        assert_eq!(12, working);
    }

    #[test]
    fn it_caps_a_digit_at_nine() {
        // 10 * 2684 < 26844, the weight one position up
        let mut working = 26843;
        assert_eq!('9', extract_digit(&mut working, 2684));
        assert_eq!(26843 - 9 * 2684, working);
    }

    #[test]
    fn it_renders_exponents() {
        let mut text = ArrayString::<8>::new();
        push_exponent(&mut text, -5);
        assert_eq!("-5", text.as_str());

        let mut text = ArrayString::<8>::new();
        push_exponent(&mut text, 0);
        assert_eq!("0", text.as_str());

        let mut text = ArrayString::<8>::new();
        push_exponent(&mut text, 12);
        assert_eq!("12", text.as_str());
    }
}
