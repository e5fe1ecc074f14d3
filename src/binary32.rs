use crate::codec::Codec;
use crate::constants::{
    BIAS, EXPONENT_MASK, EXPONENT_SHIFT, FRACTION_BITS, FRACTION_MASK, HIDDEN_BIT, SIGN_MASK, ZERO_EXPONENT,
};
use crate::error::Error;
use crate::str::Formatted;

use core::{fmt, str::FromStr};
use num_traits::{FromPrimitive, ToPrimitive};

/// `Binary32` is the IEEE-754 single precision interchange format held as a plain 32 bit
/// integer: 1 sign bit (most significant), 8 bits of exponent biased by 127 and 23 bits of
/// fraction with an implicit leading bit.
///
/// Fields are read and written with explicit masks and shifts, so the layout is exactly the one
/// produced by `f32::to_bits` on any host.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "rust-fuzz", derive(arbitrary::Arbitrary))]
#[repr(transparent)]
pub struct Binary32(u32);

/// The working representation: the fraction carries its leading bit explicitly (bit 23 for a
/// normalized value) and the exponent is unbiased.
///
/// Zero is the sentinel with an exponent of `-127` and a fraction of `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnpackedFloat {
    pub negative: bool,
    pub exponent: i32,
    pub fraction: u32,
}

impl UnpackedFloat {
    /// The positive zero sentinel.
    pub const ZERO: UnpackedFloat = UnpackedFloat::zero(false);

    /// The zero sentinel with the given sign.
    #[must_use]
    pub const fn zero(negative: bool) -> UnpackedFloat {
        UnpackedFloat {
            negative,
            exponent: ZERO_EXPONENT,
            fraction: 0,
        }
    }

    /// Returns `true` if this is the zero sentinel (of either sign).
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.exponent == ZERO_EXPONENT && self.fraction == 0
    }

    /// Packs into the binary32 layout. The hidden bit (and anything above it) is masked off the
    /// fraction.
    ///
    /// # Errors
    ///
    /// `Error::PackOverflow` if `exponent + 127` does not fit the 8 bit exponent field.
    pub fn pack(&self) -> Result<Binary32, Error> {
        let biased = self.exponent + BIAS;
        if !(0..=EXPONENT_MASK as i32).contains(&biased) {
            return Err(Error::PackOverflow(self.exponent));
        }
        Ok(Binary32::from_parts(self.negative, biased as u32, self.fraction))
    }
}

impl Binary32 {
    /// Positive zero.
    pub const ZERO: Binary32 = Binary32(0);
    /// Negative zero.
    pub const NEGATIVE_ZERO: Binary32 = Binary32(SIGN_MASK);
    /// One.
    pub const ONE: Binary32 = Binary32((BIAS as u32) << EXPONENT_SHIFT);

    /// Wraps raw IEEE-754 binary32 bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Binary32 {
        Binary32(bits)
    }

    /// Returns the raw IEEE-754 binary32 bits.
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Assembles a value from its fields. Bits of `biased_exponent` and `fraction` outside of
    /// their fields are discarded.
    #[must_use]
    pub const fn from_parts(negative: bool, biased_exponent: u32, fraction: u32) -> Binary32 {
        let sign = if negative { SIGN_MASK } else { 0 };
        Binary32(sign | ((biased_exponent & EXPONENT_MASK) << EXPONENT_SHIFT) | (fraction & FRACTION_MASK))
    }

    #[must_use]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// The 8 bit exponent field, still biased by 127.
    #[must_use]
    pub const fn biased_exponent(self) -> u32 {
        (self.0 >> EXPONENT_SHIFT) & EXPONENT_MASK
    }

    /// The 23 bit fraction field, without the implicit leading bit.
    #[must_use]
    pub const fn fraction(self) -> u32 {
        self.0 & FRACTION_MASK
    }

    /// Reinterprets the bits as a host `f32`.
    #[must_use]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Unpacks into the working representation.
    ///
    /// Both zeros map to the zero sentinel, so that they pack back to themselves. Any other bit
    /// pattern is taken structurally: subnormals, infinities and NaNs unpack without error but
    /// their working form has no meaning.
    #[must_use]
    pub const fn unpack(self) -> UnpackedFloat {
        let negative = self.is_sign_negative();
        if self.0 & !SIGN_MASK == 0 {
            return UnpackedFloat::zero(negative);
        }
        UnpackedFloat {
            negative,
            exponent: self.biased_exponent() as i32 - BIAS,
            fraction: self.fraction() | HIDDEN_BIT,
        }
    }

    /// Parses a scientific notation literal such as `-5.5e-2` using [`Codec::SCIENTIFIC`].
    ///
    /// # Example
    ///
    /// ```
    /// use fixed_f32::Binary32;
    ///
    /// let value = Binary32::from_scientific("5.5e0").unwrap();
    /// assert_eq!(value.to_bits(), 5.5f32.to_bits());
    /// ```
    pub fn from_scientific(value: &str) -> Result<Binary32, Error> {
        Codec::SCIENTIFIC.parse(value)?.value.pack()
    }

    /// Renders in scientific notation using [`Codec::SCIENTIFIC`].
    ///
    /// # Example
    ///
    /// ```
    /// use fixed_f32::Binary32;
    ///
    /// let value = Binary32::from(-0.125f32);
    /// assert_eq!(value.to_scientific().unwrap().as_str(), "-1.250000e-1");
    /// ```
    pub fn to_scientific(self) -> Result<Formatted, Error> {
        Codec::SCIENTIFIC.format(&self.unpack())
    }
}

impl FromStr for Binary32 {
    type Err = Error;

    fn from_str(value: &str) -> Result<Binary32, Self::Err> {
        Binary32::from_scientific(value)
    }
}

impl fmt::Debug for Binary32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary32({:#010x})", self.0)
    }
}

impl From<f32> for Binary32 {
    fn from(value: f32) -> Binary32 {
        Binary32(value.to_bits())
    }
}

impl From<Binary32> for f32 {
    fn from(value: Binary32) -> f32 {
        value.to_f32()
    }
}

impl From<Binary32> for UnpackedFloat {
    fn from(value: Binary32) -> UnpackedFloat {
        value.unpack()
    }
}

impl FromPrimitive for Binary32 {
    fn from_i64(n: i64) -> Option<Binary32> {
        let magnitude = Binary32::from_u64(n.unsigned_abs())?;
        Some(Binary32::from_parts(
            n < 0,
            magnitude.biased_exponent(),
            magnitude.fraction(),
        ))
    }

    // Low bits that do not fit the fraction are truncated.
    fn from_u64(n: u64) -> Option<Binary32> {
        if n == 0 {
            return Some(Binary32::ZERO);
        }
        let top = 63 - n.leading_zeros();
        let fraction = if top >= FRACTION_BITS {
            (n >> (top - FRACTION_BITS)) as u32
        } else {
            (n << (FRACTION_BITS - top)) as u32
        };
        UnpackedFloat {
            negative: false,
            exponent: top as i32,
            fraction,
        }
        .pack()
        .ok()
    }

    fn from_f32(n: f32) -> Option<Binary32> {
        Some(Binary32::from(n))
    }
}

impl Binary32 {
    // Magnitude truncated toward zero, if it fits 64 bits.
    fn truncated_magnitude(self) -> Option<u64> {
        let unpacked = self.unpack();
        if unpacked.is_zero() || unpacked.exponent < 0 {
            return Some(0);
        }
        if unpacked.exponent > 63 {
            return None;
        }
        let fraction = unpacked.fraction as u64;
        let exponent = unpacked.exponent as u32;
        Some(if exponent >= FRACTION_BITS {
            fraction << (exponent - FRACTION_BITS)
        } else {
            fraction >> (FRACTION_BITS - exponent)
        })
    }
}

impl ToPrimitive for Binary32 {
    fn to_i64(&self) -> Option<i64> {
        let magnitude = self.truncated_magnitude()?;
        if self.is_sign_negative() {
            // -2^63 is the one magnitude without a positive counterpart
            if magnitude > 1 << 63 {
                return None;
            }
            Some((magnitude as i64).wrapping_neg())
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    fn to_u64(&self) -> Option<u64> {
        let magnitude = self.truncated_magnitude()?;
        if self.is_sign_negative() && magnitude != 0 {
            return None;
        }
        Some(magnitude)
    }

    fn to_f32(&self) -> Option<f32> {
        Some(Binary32::to_f32(*self))
    }

    fn to_f64(&self) -> Option<f64> {
        Some(f64::from(Binary32::to_f32(*self)))
    }
}

#[cfg(test)]
mod test {
    // Tests on private methods.
    //
    // All public tests should go under `tests/`.

    use super::*;

    #[test]
    fn it_truncates_magnitudes() {
        assert_eq!(Some(5), Binary32::from(5.5f32).truncated_magnitude());
        assert_eq!(Some(0), Binary32::from(0.75f32).truncated_magnitude());
        assert_eq!(Some(0), Binary32::NEGATIVE_ZERO.truncated_magnitude());
        assert_eq!(Some(1 << 40), Binary32::from(1099511627776f32).truncated_magnitude());
        assert_eq!(None, Binary32::from(f32::INFINITY).truncated_magnitude());
    }

    #[test]
    fn it_masks_fields_when_assembling() {
        let value = Binary32::from_parts(false, 0x1FF, 0xFFFF_FFFF);
        assert_eq!(0x7FFF_FFFF, value.to_bits());
    }
}
