/// Multiplies two unsigned fixed-point values that share a scale of `2^scale_bits` and returns
/// the product in that same scale.
///
/// The full 64 bit product is formed before shifting, so no intermediate bits are lost. The
/// result is truncated (rounded toward zero): callers that want rounding add their bias to an
/// operand beforehand. The result is returned widened since the product of two values in
/// `[0, 16)` may exceed the range of the operands' scale.
///
/// # Example
///
/// ```
/// use fixed_f32::scaled_mul;
///
/// // 1.5 * 2.5 in Q4.28
/// let product = scaled_mul(3 << 27, 5 << 27, 28);
/// assert_eq!(product, 15 << 26);
/// ```
#[inline]
#[must_use]
pub const fn scaled_mul(a: u32, b: u32, scale_bits: u32) -> u64 {
    (a as u64 * b as u64) >> scale_bits
}

#[cfg(test)]
mod test {
    use super::*;

    const ONE: u32 = 1 << 28;

    #[test]
    fn it_is_identity_for_one() {
        assert_eq!(351843721, scaled_mul(351843721, ONE, 28));
        assert_eq!(351843721, scaled_mul(ONE, 351843721, 28));
    }

    #[test]
    fn it_truncates() {
        // (ONE + 1) * 0.5 = 0.5 + 2^-29, the trailing half bit is lost
        assert_eq!((ONE >> 1) as u64, scaled_mul(ONE + 1, ONE >> 1, 28));
    }

    #[test]
    fn it_keeps_the_full_product() {
        // 9.999999 * 1.953125 overflows Q4.28 but not the widened result
        let product = scaled_mul(2684354292, 524288000, 28);
        assert!(product > u32::MAX as u64);
        assert_eq!(5242879476, product);
    }

    #[test]
    fn it_supports_a_zero_integer_scale() {
        // 0.5 * 0.5 in Q0.32
        assert_eq!(1 << 30, scaled_mul(1 << 31, 1 << 31, 32));
    }
}
