use crate::constants::{FRACTION_BITS, MAX_EXPONENT10};
use crate::error::Error;

/// The fixed-point scaling used while converting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scale {
    /// 4 integer bits and 28 fractional bits. Normalized values lie in `[1, 2)` with the leading
    /// bit at bit 28, and literals carry one integer digit.
    Q4_28,
    /// 32 fractional bits. Normalized values lie in `[0.5, 1)` with the leading bit at bit 31,
    /// and the integer digit of a literal is always `0`.
    Q0_32,
}

impl Scale {
    /// Number of fractional bits, i.e. the shift applied after each fixed-point multiply.
    pub const fn fraction_bits(self) -> u32 {
        match self {
            Scale::Q4_28 => 28,
            Scale::Q0_32 => 32,
        }
    }

    /// Bit position of the leading bit of a normalized working fraction.
    pub const fn leading_bit(self) -> u32 {
        match self {
            Scale::Q4_28 => 28,
            Scale::Q0_32 => 31,
        }
    }

    /// Low order bits kept below the 23 fraction bits of binary32 while converting.
    pub const fn guard_bits(self) -> u32 {
        self.leading_bit() - FRACTION_BITS
    }

    /// Added to a working fraction before a truncating multiply.
    pub const fn rounding_bias(self) -> u32 {
        (1 << self.guard_bits()) - 1
    }

    /// Number of significant digits before the radix point (`0` means a fixed `0`).
    pub const fn integer_digits(self) -> i32 {
        match self {
            Scale::Q4_28 => 1,
            Scale::Q0_32 => 0,
        }
    }

    // Unpacked exponent minus working exponent for a normalized value
    pub(crate) const fn exponent_adjust(self) -> i32 {
        self.leading_bit() as i32 - self.fraction_bits() as i32
    }
}

/// What to do with fractional digits beyond the sixth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DigitPolicy {
    /// Consume and discard them, logging a warning. The count is reported by the parse.
    #[default]
    Truncate,
    /// Fail with `Error::FractionDigitOverflow`.
    Reject,
}

/// Describes a literal syntax and the fixed-point arithmetic used to convert it.
///
/// The three presets cover the usual configurations; others can be built with
/// [`Format::with_scale`], [`Format::with_exponent_range`] and [`Format::with_digit_policy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    scale: Scale,
    exponents: Option<(i8, i8)>,
    digits: DigitPolicy,
}

impl Format {
    /// `-?[0-9].[0-9]{0,6}(e-?[0-9]+)?` with decimal exponents `-5..=5`, converted in Q4.28.
    pub const SCIENTIFIC: Format = Format {
        scale: Scale::Q4_28,
        exponents: Some((-5, 5)),
        digits: DigitPolicy::Truncate,
    };
    /// `-?[0-9].[0-9]{0,6}` without an exponent, converted in Q4.28.
    pub const FIXED: Format = Format {
        scale: Scale::Q4_28,
        exponents: None,
        digits: DigitPolicy::Truncate,
    };
    /// `-?0.[0-9]{0,6}`, i.e. magnitudes in `[0.1, 1)`, converted in Q0.32.
    pub const UNIT: Format = Format {
        scale: Scale::Q0_32,
        exponents: None,
        digits: DigitPolicy::Truncate,
    };

    #[must_use]
    pub const fn with_scale(mut self, scale: Scale) -> Format {
        self.scale = scale;
        self
    }

    /// Accept and emit an `e` suffix with decimal exponents in `min..=max`, or no suffix at all
    /// for `None`.
    #[must_use]
    pub const fn with_exponent_range(mut self, exponents: Option<(i8, i8)>) -> Format {
        self.exponents = exponents;
        self
    }

    #[must_use]
    pub const fn with_digit_policy(mut self, digits: DigitPolicy) -> Format {
        self.digits = digits;
        self
    }

    pub const fn scale(&self) -> Scale {
        self.scale
    }

    pub const fn exponent_range(&self) -> Option<(i8, i8)> {
        self.exponents
    }

    pub const fn digit_policy(&self) -> DigitPolicy {
        self.digits
    }

    // The decimal exponents tabulated. A format without a suffix still has the 10^0 bucket.
    pub(crate) const fn table_range(&self) -> (i32, i32) {
        match self.exponents {
            Some((min, max)) => (min as i32, max as i32),
            None => (0, 0),
        }
    }

    pub(crate) const fn validate(&self) -> Result<(), Error> {
        if let Some((min, max)) = self.exponents {
            if min > max || min < -MAX_EXPONENT10 || max > MAX_EXPONENT10 {
                return Err(Error::UnsupportedExponentRange(min, max));
            }
        }
        Ok(())
    }
}

impl Default for Format {
    fn default() -> Format {
        Format::SCIENTIFIC
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_derives_guard_bits_from_the_scale() {
        assert_eq!(5, Scale::Q4_28.guard_bits());
        assert_eq!(31, Scale::Q4_28.rounding_bias());
        assert_eq!(0, Scale::Q4_28.exponent_adjust());
        assert_eq!(8, Scale::Q0_32.guard_bits());
        assert_eq!(255, Scale::Q0_32.rounding_bias());
        assert_eq!(-1, Scale::Q0_32.exponent_adjust());
    }

    #[test]
    fn it_validates_exponent_ranges() {
        assert!(Format::SCIENTIFIC.validate().is_ok());
        assert!(Format::UNIT.validate().is_ok());
        assert!(Format::SCIENTIFIC.with_exponent_range(Some((-9, 9))).validate().is_ok());
        assert_eq!(
            Err(Error::UnsupportedExponentRange(-10, 0)),
            Format::SCIENTIFIC.with_exponent_range(Some((-10, 0))).validate()
        );
        assert_eq!(
            Err(Error::UnsupportedExponentRange(2, 1)),
            Format::SCIENTIFIC.with_exponent_range(Some((2, 1))).validate()
        );
    }
}
