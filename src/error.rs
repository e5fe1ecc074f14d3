use crate::constants::{BIAS, MAX_EXPONENT10};
use core::fmt;

/// Error type for the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The literal does not follow the grammar. Contains the byte offset of the first
    /// offending character (or the length of the input if it ended early).
    MalformedLiteral(usize),
    /// The decimal exponent of the literal has no entry in the scaling tables.
    ExponentOutOfRange(i32),
    /// More fractional digits than the codec accumulates were supplied and the
    /// format rejects them. Contains the number of excess digits.
    FractionDigitOverflow(usize),
    /// The unpacked exponent does not fit the 8 bit biased exponent field.
    PackOverflow(i32),
    /// The binary exponent of the value has no entry in the formatting tables, or the value
    /// needs more integer digits than the format renders. Parsing reports it for literals whose
    /// value could not be formatted back.
    BinaryExponentOutOfRange(i32),
    /// The requested decimal exponent range cannot be tabulated.
    UnsupportedExponentRange(i8, i8),
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MalformedLiteral(position) => write!(f, "Malformed literal at byte {}", position),
            Self::ExponentOutOfRange(exp) => {
                write!(f, "Decimal exponent is outside of the supported range: {}", exp)
            }
            Self::FractionDigitOverflow(excess) => {
                write!(f, "Too many fractional digits: {} more than supported", excess)
            }
            Self::PackOverflow(exp) => write!(
                f,
                "Exponent does not fit the binary32 exponent field: {} + {} is not within 0..=255",
                exp, BIAS
            ),
            Self::BinaryExponentOutOfRange(exp) => {
                write!(f, "Binary exponent can not be rendered by this format: {}", exp)
            }
            Self::UnsupportedExponentRange(min, max) => write!(
                f,
                "Unsupported exponent range: {}..={} must be ordered and within -{}..={}",
                min, max, MAX_EXPONENT10, MAX_EXPONENT10
            ),
        }
    }
}
