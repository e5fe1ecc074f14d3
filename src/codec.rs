use crate::binary32::{Binary32, UnpackedFloat};
use crate::constants::ScalingTables;
use crate::error::Error;
use crate::format::Format;
use crate::str::{format_unpacked, parse_literal, Formatted, Parsed};

/// Converts between decimal literals and [`UnpackedFloat`] using only shifts, additions,
/// comparisons and one widened fixed-point multiply per conversion.
///
/// A `Codec` pairs a [`Format`] with the scaling tables generated for it. Tables are built by a
/// `const fn`, so the presets below cost nothing at runtime.
///
/// # Example
///
/// ```
/// use fixed_f32::Codec;
///
/// let parsed = Codec::SCIENTIFIC.parse("-5.5e-2").unwrap();
/// assert!(parsed.value.negative);
/// assert_eq!(parsed.value.exponent, -5);
///
/// let text = Codec::SCIENTIFIC.format(&parsed.value).unwrap();
/// assert_eq!(text.as_str(), "-5.500000e-2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codec {
    format: Format,
    tables: ScalingTables,
}

impl Codec {
    /// Scientific notation with decimal exponents `-5..=5`.
    pub const SCIENTIFIC: Codec = Codec::new(Format::SCIENTIFIC);
    /// `d.dddddd` without an exponent.
    pub const FIXED: Codec = Codec::new(Format::FIXED);
    /// `0.dddddd` for magnitudes in `[0.1, 1)`.
    pub const UNIT: Codec = Codec::new(Format::UNIT);

    /// Builds a codec, generating its scaling tables.
    ///
    /// # Panics
    ///
    /// This function panics if the exponent range of `format` is unordered or exceeds
    /// `-9..=9`. See [`Codec::try_new`] for a fallible alternative.
    #[must_use]
    pub const fn new(format: Format) -> Codec {
        match Codec::try_new(format) {
            Ok(codec) => codec,
            Err(_) => panic!("Exponent range exceeds the supported tables"),
        }
    }

    /// Checked version of [`Codec::new`]. Returns `Err` instead of panicking.
    pub const fn try_new(format: Format) -> Result<Codec, Error> {
        if let Err(err) = format.validate() {
            return Err(err);
        }
        let scale = format.scale();
        let (min, max) = format.table_range();
        Ok(Codec {
            format,
            tables: ScalingTables::generate(
                scale.fraction_bits(),
                scale.leading_bit(),
                scale.integer_digits(),
                min,
                max,
            ),
        })
    }

    /// The literal syntax and scaling of this codec.
    pub const fn config(&self) -> &Format {
        &self.format
    }

    /// The scaling tables generated for this codec.
    pub const fn tables(&self) -> &ScalingTables {
        &self.tables
    }

    /// Parses a decimal literal into the working representation.
    ///
    /// # Errors
    ///
    /// * `Error::MalformedLiteral` if the literal does not follow the grammar of the format.
    /// * `Error::ExponentOutOfRange` if the decimal exponent is not tabulated.
    /// * `Error::FractionDigitOverflow` if the format rejects more than six fractional digits.
    /// * `Error::BinaryExponentOutOfRange` if the value falls outside the range the format can
    ///   render, e.g. `0.05` for [`Codec::UNIT`].
    pub fn parse(&self, value: &str) -> Result<Parsed, Error> {
        parse_literal(self, value)
    }

    /// Renders the working representation as a decimal literal.
    ///
    /// # Errors
    ///
    /// `Error::BinaryExponentOutOfRange` if the value cannot be rendered by the format.
    pub fn format(&self, value: &UnpackedFloat) -> Result<Formatted, Error> {
        format_unpacked(self, value)
    }

    /// Parses a decimal literal straight into binary32.
    pub fn parse_binary32(&self, value: &str) -> Result<Binary32, Error> {
        self.parse(value)?.value.pack()
    }

    /// Renders a binary32 value as a decimal literal.
    pub fn format_binary32(&self, value: Binary32) -> Result<Formatted, Error> {
        self.format(&value.unpack())
    }
}

impl Default for Codec {
    fn default() -> Codec {
        Codec::SCIENTIFIC
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::format::DigitPolicy;

    #[test]
    fn it_rejects_unsupported_ranges() {
        let format = Format::SCIENTIFIC.with_exponent_range(Some((-12, 3)));
        assert_eq!(Err(Error::UnsupportedExponentRange(-12, 3)), Codec::try_new(format));
    }

    #[test]
    #[should_panic(expected = "Exponent range exceeds the supported tables")]
    fn it_panics_on_unsupported_ranges() {
        let _ = Codec::new(Format::SCIENTIFIC.with_exponent_range(Some((3, -3))));
    }

    #[test]
    fn it_keeps_its_format() {
        let format = Format::SCIENTIFIC.with_digit_policy(DigitPolicy::Reject);
        let codec = Codec::try_new(format).unwrap();
        assert_eq!(&format, codec.config());
        assert_eq!(Codec::SCIENTIFIC.tables(), codec.tables());
    }
}
