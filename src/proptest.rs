use crate::constants::{EXPONENT_MASK, FRACTION_MASK};
use crate::Binary32;

use proptest::arbitrary::{Arbitrary, StrategyFor};
use proptest::prelude::*;
use proptest::strategy::Map;

impl Arbitrary for Binary32 {
    type Parameters = ();
    type Strategy = Map<StrategyFor<(bool, u32, u32)>, fn((bool, u32, u32)) -> Self>;

    fn arbitrary_with(_parameters: Self::Parameters) -> Self::Strategy {
        // finite, normalized values only: the biased exponent is folded into 1..=254
        any::<(bool, u32, u32)>().prop_map(|(negative, exponent, fraction)| {
            Binary32::from_parts(negative, 1 + exponent % (EXPONENT_MASK - 1), fraction & FRACTION_MASK)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    proptest! {
        #[test]
        fn it_generates_finite_normalized_values(value in any::<Binary32>()) {
            prop_assert!((1..=254).contains(&value.biased_exponent()));
            prop_assert_eq!(value, value.unpack().pack().unwrap());
        }
    }
}
