// Every decimal exponent rescale in either direction goes through a single fixed-point
// multiplication. Nothing else in the crate multiplies.

mod mul;

pub use mul::scaled_mul;
