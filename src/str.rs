use crate::binary32::UnpackedFloat;
use crate::constants::MAX_STR_BUFFER_SIZE;

use arrayvec::ArrayString;
use core::ops::Deref;

mod fmt;
mod parse;

pub(crate) use self::fmt::format_unpacked;
pub(crate) use self::parse::parse_literal;

/// The outcome of parsing a literal, together with the intermediate values of the conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parsed {
    /// The converted value.
    pub value: UnpackedFloat,
    /// The decimal exponent of the `e` suffix, if one was present.
    pub exponent: Option<i32>,
    /// The row of the decimal-to-binary tables the mantissa was rescaled with.
    pub bucket: Option<usize>,
    /// Fractional digits past the sixth that were consumed without contributing.
    pub discarded_digits: usize,
}

/// A rendered literal held in a fixed-capacity buffer, together with the intermediate values
/// of the conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Formatted {
    pub(crate) text: ArrayString<MAX_STR_BUFFER_SIZE>,
    pub(crate) exponent: i32,
    pub(crate) bucket: Option<usize>,
}

impl Formatted {
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// The rendered decimal exponent (`0` for zero and for formats without a suffix).
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// The row of the binary-to-decimal tables used, or `None` for zero.
    pub const fn bucket(&self) -> Option<usize> {
        self.bucket
    }
}

impl Deref for Formatted {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Formatted {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Formatted {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Formatted {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl core::fmt::Display for Formatted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}
