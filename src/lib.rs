#![doc = include_str!(concat!(env!("OUT_DIR"), "/README-lib.md"))]
#![forbid(unsafe_code)]
#![deny(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(not(feature = "std"), no_std)]

mod binary32;
mod codec;
mod constants;
mod error;
mod format;
mod ops;
mod str;

#[cfg(feature = "proptest")]
mod proptest;
#[cfg(feature = "serde")]
pub mod serde;

pub use binary32::{Binary32, UnpackedFloat};
pub use codec::Codec;
pub use constants::{Bucket, ScalingTables, BIAS, FRACTION_DIGITS, MAX_EXPONENT10, ZERO_EXPONENT};
pub use error::Error;
pub use format::{DigitPolicy, Format, Scale};
pub use ops::scaled_mul;
pub use str::{Formatted, Parsed};

/// A convenience module appropriate for glob imports (`use fixed_f32::prelude::*;`).
pub mod prelude {
    pub use crate::{Binary32, Codec, Format, UnpackedFloat};
    pub use core::str::FromStr;
    pub use num_traits::{FromPrimitive, ToPrimitive};
}
