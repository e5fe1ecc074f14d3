use crate::{
    binary32::UnpackedFloat,
    codec::Codec,
    constants::FRACTION_DIGITS,
    error::Error,
    format::DigitPolicy,
    ops::scaled_mul,
    str::Parsed,
};

use log::{trace, warn};

// Exponent magnitudes are only accumulated this far; anything larger is out of range anyway.
const EXPONENT_SATURATION: u32 = 1000;

/// Parses `-?[0-9].[0-9]*(e-?[0-9]+)?` (the exponent only for formats that have one).
///
/// The literal is consumed in order: sign, integer digit, radix point, fractional digits,
/// exponent. Each fractional digit is accumulated by repeated addition of its positional weight,
/// the accumulated mantissa is rescaled by the table row for its decimal exponent and finally
/// normalized so that its leading bit sits at bit 23.
pub(crate) fn parse_literal(codec: &Codec, value: &str) -> Result<Parsed, Error> {
    let format = codec.config();
    let tables = codec.tables();
    let scale = format.scale();
    let bytes = value.as_bytes();
    let offset = |rest: &[u8]| bytes.len() - rest.len();

    let (negative, rest) = match bytes {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, bytes),
    };

    let (lead, rest) = match rest {
        [digit @ b'0'..=b'9', tail @ ..] => (*digit - b'0', tail),
        _ => return Err(Error::MalformedLiteral(offset(rest))),
    };
    let mut mantissa = 0u32;
    if scale.integer_digits() > 0 {
        mantissa = accumulate(mantissa, lead, tables.digit_scale(0));
    } else if lead != 0 {
        // The integer digit is structurally zero
        return Err(Error::MalformedLiteral(offset(rest) - 1));
    }

    let mut rest = match rest {
        [b'.', tail @ ..] => tail,
        _ => return Err(Error::MalformedLiteral(offset(rest))),
    };

    let first_fraction = offset(rest);
    let mut position = 1;
    let mut discarded_digits = 0;
    while let [digit @ b'0'..=b'9', tail @ ..] = rest {
        if position <= FRACTION_DIGITS {
            mantissa = accumulate(mantissa, *digit - b'0', tables.digit_scale(position));
            position += 1;
        } else {
            discarded_digits += 1;
        }
        rest = tail;
    }
    // After a leading zero the first fractional digit must be significant
    if scale.integer_digits() > 0 && lead == 0 && mantissa != 0 && bytes.get(first_fraction) == Some(&b'0') {
        return Err(Error::MalformedLiteral(first_fraction));
    }
    if discarded_digits > 0 {
        match format.digit_policy() {
            DigitPolicy::Reject => return Err(Error::FractionDigitOverflow(discarded_digits)),
            DigitPolicy::Truncate => warn!(
                "Discarding {} fractional digits past the sixth in {:?}",
                discarded_digits, value
            ),
        }
    }

    let (exponent, rest) = match rest {
        [b'e', tail @ ..] if format.exponent_range().is_some() => {
            let (exponent, rest) = parse_exponent(tail).ok_or_else(|| Error::MalformedLiteral(offset(tail)))?;
            (Some(exponent), rest)
        }
        _ => (None, rest),
    };
    if !rest.is_empty() {
        return Err(Error::MalformedLiteral(offset(rest)));
    }

    let bucket = match exponent {
        Some(exp10) => Some(tables.decimal(exp10).ok_or(Error::ExponentOutOfRange(exp10))?),
        None => None,
    };

    if mantissa == 0 {
        return Ok(Parsed {
            value: UnpackedFloat::zero(negative),
            exponent,
            bucket: None,
            discarded_digits,
        });
    }

    // Normalize first so that the bias only fills the guard bits
    let lead_bit = scale.leading_bit();
    let mut exp2 = 0;
    while mantissa >> lead_bit == 0 {
        mantissa <<= 1;
        exp2 -= 1;
    }
    let mantissa = mantissa.saturating_add(scale.rounding_bias());

    let mut working = match bucket {
        Some(bucket) => {
            trace!(
                "10^{} rescaled by row {} ({:#010x} x 2^{})",
                exponent.unwrap_or(0),
                bucket.index,
                bucket.fraction,
                bucket.exponent
            );
            exp2 += bucket.exponent;
            scaled_mul(mantissa, bucket.fraction, scale.fraction_bits())
        }
        None => u64::from(mantissa),
    };

    // normalize
    while working >> (lead_bit + 1) != 0 {
        working >>= 1;
        exp2 += 1;
    }
    while working >> lead_bit == 0 {
        working <<= 1;
        exp2 -= 1;
    }

    // Every parsed value must have a row to be formatted with
    let exp2 = exp2 + scale.exponent_adjust();
    let (min, max) = tables.binary_exponents();
    if exp2 < min || exp2 > max {
        return Err(Error::BinaryExponentOutOfRange(exp2));
    }

    Ok(Parsed {
        value: UnpackedFloat {
            negative,
            exponent: exp2,
            fraction: (working >> scale.guard_bits()) as u32,
        },
        exponent,
        bucket: bucket.map(|b| b.index),
        discarded_digits,
    })
}

// mantissa + digit * weight, as repeated addition
#[inline]
fn accumulate(mut mantissa: u32, digit: u8, weight: u32) -> u32 {
    for _ in 0..digit {
        mantissa += weight;
    }
    mantissa
}

// -?[0-9]+, returning the value and the unconsumed bytes
fn parse_exponent(bytes: &[u8]) -> Option<(i32, &[u8])> {
    let (negative, mut rest) = match bytes {
        [b'-', tail @ ..] => (true, tail),
        _ => (false, bytes),
    };
    let mut magnitude = 0u32;
    let mut digits = 0;
    while let [digit @ b'0'..=b'9', tail @ ..] = rest {
        if magnitude < EXPONENT_SATURATION {
            // x10 as shift-add
            magnitude = (magnitude << 3) + (magnitude << 1) + u32::from(*digit - b'0');
        }
        digits += 1;
        rest = tail;
    }
    if digits == 0 {
        return None;
    }
    let magnitude = magnitude as i32;
    Some((if negative { -magnitude } else { magnitude }, rest))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accumulates_by_addition() {
        assert_eq!(0, accumulate(0, 0, 26843546));
        assert_eq!(5 * 26843546 + 7, accumulate(7, 5, 26843546));
    }

    #[test]
    fn it_parses_exponents() {
        assert_eq!(Some((0, &b""[..])), parse_exponent(b"0"));
        assert_eq!(Some((-5, &b""[..])), parse_exponent(b"-5"));
        assert_eq!(Some((12, &b"x"[..])), parse_exponent(b"12x"));
        assert_eq!(None, parse_exponent(b"-"));
        assert_eq!(None, parse_exponent(b""));
    }

    #[test]
    fn it_saturates_long_exponents() {
        let (exponent, rest) = parse_exponent(b"99999999999999").unwrap();
        assert!(exponent >= EXPONENT_SATURATION as i32);
        assert!(rest.is_empty());
    }

    #[test]
    fn it_normalizes_a_widened_product() {
        // 9.999999e3 needs more than the 4 integer bits of Q4.28 after rescaling
        let parsed = parse_literal(&Codec::SCIENTIFIC, "9.999999e3").unwrap();
        assert_eq!(13, parsed.value.exponent);
        assert_eq!(0x9c3fff, parsed.value.fraction);
    }
}
