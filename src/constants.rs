// Layout of an IEEE-754 binary32 value.
pub const SIGN_MASK: u32 = 0x8000_0000;
pub const EXPONENT_SHIFT: u32 = 23;
pub const EXPONENT_MASK: u32 = 0xFF;
pub const FRACTION_BITS: u32 = 23;
pub const FRACTION_MASK: u32 = HIDDEN_BIT - 1;
// The implicit leading bit, stored explicitly once unpacked.
pub const HIDDEN_BIT: u32 = 1 << FRACTION_BITS;
pub const BIAS: i32 = 127;

// Exponent of the zero sentinel (a biased exponent of zero)
pub const ZERO_EXPONENT: i32 = -BIAS;

// Number of fractional decimal digits accumulated and rendered
pub const FRACTION_DIGITS: usize = 6;

// The widest decimal exponent a table can cover
pub const MAX_EXPONENT10: i8 = 9;

pub(crate) const MAX_DECIMAL_BUCKETS: usize = 2 * MAX_EXPONENT10 as usize + 1;
// ceil(log2(10^10)) - 1 - floor(log2(10^-9)), the widest binary span of any range
pub(crate) const MAX_BINARY_BUCKETS: usize = 64;

// "-9.999999e-9" and friends
pub(crate) const MAX_STR_BUFFER_SIZE: usize = 16;

/// The precomputed fixed-point constants used by both directions of conversion.
///
/// Every table is generated from the working scale and the decimal exponent range, so the
/// constants are reproduced rather than transcribed:
///
/// * `digit_scale[i]` is `10^-i` in the working scale.
/// * For a decimal exponent `x`, `exponent_fraction` holds `10^x / 2^k` in the working scale for
///   the unique `k` (stored in `exponent_delta`) that places it on the leading bit.
/// * For an unpacked binary exponent `E`, `bin_to_dec_fraction` holds `2^e / 10^d` in the working
///   scale (where `e` is `E` expressed relative to the working scale) and `dec_exponent` holds `d`,
///   the smallest decimal exponent that keeps the rendered integer digit within range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalingTables {
    digit_scale: [u32; FRACTION_DIGITS + 1],
    exponent10_min: i32,
    decimal_len: usize,
    exponent_fraction: [u32; MAX_DECIMAL_BUCKETS],
    exponent_delta: [i32; MAX_DECIMAL_BUCKETS],
    exponent2_min: i32,
    binary_len: usize,
    bin_to_dec_fraction: [u32; MAX_BINARY_BUCKETS],
    dec_exponent: [i32; MAX_BINARY_BUCKETS],
}

/// A table row selected for a particular exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bucket {
    /// Position of the row within its table.
    pub index: usize,
    /// Fixed-point rescaling factor.
    pub fraction: u32,
    /// Exponent paired with the factor (binary when parsing, decimal when formatting).
    pub exponent: i32,
}

impl ScalingTables {
    /// Generates the tables for a working scale of `fraction_bits` fractional bits, the leading
    /// bit at `leading_bit`, `integer_digits` (0 or 1) rendered before the radix point, and the
    /// decimal exponents `min..=max`.
    ///
    /// The range must already be validated, i.e. within `-MAX_EXPONENT10..=MAX_EXPONENT10`.
    pub(crate) const fn generate(
        fraction_bits: u32,
        leading_bit: u32,
        integer_digits: i32,
        min: i32,
        max: i32,
    ) -> ScalingTables {
        let fraction_bits = fraction_bits as i32;
        // Offset between the working exponent and the unpacked exponent
        let lead_adjust = leading_bit as i32 - fraction_bits;

        let mut digit_scale = [0u32; FRACTION_DIGITS + 1];
        let mut i = 0;
        while i <= FRACTION_DIGITS {
            let (num, den) = pow10(-(i as i32));
            digit_scale[i] = closest(num, den, fraction_bits);
            i += 1;
        }

        let mut exponent_fraction = [0u32; MAX_DECIMAL_BUCKETS];
        let mut exponent_delta = [0i32; MAX_DECIMAL_BUCKETS];
        let decimal_len = (max - min + 1) as usize;
        let mut i = 0;
        while i < decimal_len {
            let x = min + i as i32;
            let k = floor_log2_pow10(x) - lead_adjust;
            let (num, den) = pow10(x);
            exponent_fraction[i] = closest(num, den, fraction_bits - k);
            exponent_delta[i] = k;
            i += 1;
        }

        let exponent2_min = floor_log2_pow10(min + integer_digits - 1);
        let exponent2_max = ceil_log2_pow10(max + integer_digits) - 1;
        let binary_len = (exponent2_max - exponent2_min + 1) as usize;
        let mut bin_to_dec_fraction = [0u32; MAX_BINARY_BUCKETS];
        let mut dec_exponent = [0i32; MAX_BINARY_BUCKETS];
        let mut i = 0;
        while i < binary_len {
            let exp2 = exponent2_min + i as i32;
            // Smallest d where 2^(E+1) <= 10^(d+integer_digits), i.e. the largest value with this
            // binary exponent still renders within the integer digits.
            let mut d = min;
            while d < max && exp2 + 1 > floor_log2_pow10(d + integer_digits) {
                d += 1;
            }
            let (num, den) = pow10(-d);
            bin_to_dec_fraction[i] = closest(num, den, fraction_bits + exp2 - lead_adjust);
            dec_exponent[i] = d;
            i += 1;
        }

        ScalingTables {
            digit_scale,
            exponent10_min: min,
            decimal_len,
            exponent_fraction,
            exponent_delta,
            exponent2_min,
            binary_len,
            bin_to_dec_fraction,
            dec_exponent,
        }
    }

    /// `10^-position` in the working scale. Position 0 is the integer digit.
    #[inline]
    pub const fn digit_scale(&self, position: usize) -> u32 {
        self.digit_scale[position]
    }

    /// The decimal-to-binary row for a decimal exponent, if tabulated.
    pub fn decimal(&self, exp10: i32) -> Option<Bucket> {
        let index = usize::try_from(exp10.checked_sub(self.exponent10_min)?).ok()?;
        if index >= self.decimal_len {
            return None;
        }
        Some(Bucket {
            index,
            fraction: self.exponent_fraction[index],
            exponent: self.exponent_delta[index],
        })
    }

    /// The binary-to-decimal row for an unpacked binary exponent, if tabulated.
    pub fn binary(&self, exp2: i32) -> Option<Bucket> {
        let index = usize::try_from(exp2.checked_sub(self.exponent2_min)?).ok()?;
        if index >= self.binary_len {
            return None;
        }
        Some(Bucket {
            index,
            fraction: self.bin_to_dec_fraction[index],
            exponent: self.dec_exponent[index],
        })
    }

    /// The unpacked binary exponents covered by the formatting tables.
    pub const fn binary_exponents(&self) -> (i32, i32) {
        (self.exponent2_min, self.exponent2_min + self.binary_len as i32 - 1)
    }
}

// 10^e as a ratio
const fn pow10(e: i32) -> (u128, u128) {
    let p = 10u128.pow(e.unsigned_abs());
    if e >= 0 {
        (p, 1)
    } else {
        (1, p)
    }
}

// Closest u32 to (num / den) * 2^shift, saturating.
const fn closest(num: u128, den: u128, shift: i32) -> u32 {
    let (num, den) = if shift >= 0 {
        (num << shift, den)
    } else {
        (num, den << -shift)
    };
    let value = (2 * num + den) / (2 * den);
    if value > u32::MAX as u128 {
        u32::MAX
    } else {
        value as u32
    }
}

// floor(log2(10^e))
const fn floor_log2_pow10(e: i32) -> i32 {
    let p = 10u128.pow(e.unsigned_abs());
    if e >= 0 {
        p.ilog2() as i32
    } else if p.is_power_of_two() {
        -(p.ilog2() as i32)
    } else {
        -(p.ilog2() as i32) - 1
    }
}

// ceil(log2(10^e))
const fn ceil_log2_pow10(e: i32) -> i32 {
    -floor_log2_pow10(-e)
}

#[cfg(test)]
mod test {
    use super::*;

    const SCIENTIFIC: ScalingTables = ScalingTables::generate(28, 28, 1, -5, 5);

    #[test]
    fn it_generates_the_digit_scale() {
        let expected = [268435456, 26843546, 2684355, 268435, 26844, 2684, 268];
        for (position, value) in expected.iter().enumerate() {
            assert_eq!(*value, SCIENTIFIC.digit_scale(position));
        }
    }

    #[test]
    fn it_generates_the_decimal_to_binary_tables() {
        let fractions = [
            351843721, 439804651, 274877907, 343597384, 429496730, 268435456, 335544320, 419430400, 524288000,
            327680000, 409600000,
        ];
        let deltas = [-17, -14, -10, -7, -4, 0, 3, 6, 9, 13, 16];
        for (i, exp10) in (-5..=5).enumerate() {
            let bucket = SCIENTIFIC.decimal(exp10).unwrap();
            assert_eq!(i, bucket.index);
            assert_eq!(fractions[i], bucket.fraction, "10^{}", exp10);
            assert_eq!(deltas[i], bucket.exponent, "10^{}", exp10);
        }
        assert_eq!(None, SCIENTIFIC.decimal(-6));
        assert_eq!(None, SCIENTIFIC.decimal(6));
    }

    #[test]
    fn it_generates_the_binary_to_decimal_tables() {
        let fractions = [
            209715200, 419430400, 838860800, 167772160, 335544320, 671088640, 1342177280, 268435456, 536870912,
            1073741824, 214748365, 429496730, 858993459, 171798692, 343597384,
        ];
        let exponents = [-2, -2, -2, -1, -1, -1, -1, 0, 0, 0, 1, 1, 1, 2, 2];
        for (i, exp2) in (-7..=7).enumerate() {
            let bucket = SCIENTIFIC.binary(exp2).unwrap();
            assert_eq!(fractions[i], bucket.fraction, "2^{}", exp2);
            assert_eq!(exponents[i], bucket.exponent, "2^{}", exp2);
        }
        assert_eq!((-17, 19), SCIENTIFIC.binary_exponents());
        assert_eq!(-5, SCIENTIFIC.binary(-17).unwrap().exponent);
        assert_eq!(5, SCIENTIFIC.binary(19).unwrap().exponent);
        assert_eq!(None, SCIENTIFIC.binary(-18));
        assert_eq!(None, SCIENTIFIC.binary(20));
    }

    #[test]
    fn it_generates_tables_without_an_exponent_range() {
        let unit = ScalingTables::generate(32, 31, 0, 0, 0);
        assert_eq!(u32::MAX, unit.digit_scale(0));
        assert_eq!(429496730, unit.digit_scale(1));
        assert_eq!((-4, -1), unit.binary_exponents());
        // 2^0 in Q0.32 saturates
        assert_eq!(u32::MAX, unit.binary(-1).unwrap().fraction);
        assert_eq!(1 << 29, unit.binary(-4).unwrap().fraction);

        let fixed = ScalingTables::generate(28, 28, 1, 0, 0);
        assert_eq!((0, 3), fixed.binary_exponents());
        assert_eq!(1 << 31, fixed.binary(3).unwrap().fraction);
        assert_eq!(0, fixed.binary(3).unwrap().exponent);
    }

    #[test]
    fn it_covers_the_widest_range() {
        let widest = ScalingTables::generate(28, 28, 1, -9, 9);
        assert_eq!((-30, 33), widest.binary_exponents());
        let widest = ScalingTables::generate(32, 31, 0, -9, 9);
        assert_eq!((-34, 29), widest.binary_exponents());
    }
}
