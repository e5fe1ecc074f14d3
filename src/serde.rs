use crate::Binary32;
use core::fmt;
use num_traits::FromPrimitive;
use serde::{self, de::Unexpected};

/// Serialize/deserialize `Binary32` as its raw IEEE-754 bits.
///
/// ```
/// # use serde::{Serialize, Deserialize};
/// # use fixed_f32::Binary32;
///
/// #[derive(Serialize, Deserialize)]
/// pub struct BitsExample {
///     #[serde(with = "fixed_f32::serde::bits")]
///     value: Binary32,
/// }
///
/// let value = BitsExample { value: Binary32::ONE };
/// assert_eq!(
///     &serde_json::to_string(&value).unwrap(),
///     r#"{"value":1065353216}"#
/// );
/// ```
pub mod bits {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Binary32, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let bits = <u32 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Binary32::from_bits(bits))
    }

    pub fn serialize<S>(value: &Binary32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(value.to_bits())
    }
}

/// Serializes in scientific notation, e.g. `"-5.500000e-2"`. Values the scientific codec
/// cannot render fail to serialize.
impl serde::Serialize for Binary32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = self.to_scientific().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(text.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Binary32 {
    fn deserialize<D>(deserializer: D) -> Result<Binary32, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(Binary32Visitor)
    }
}

struct Binary32Visitor;

impl<'de> serde::de::Visitor<'de> for Binary32Visitor {
    type Value = Binary32;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a Binary32 type representing a scientific notation literal")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Binary32, E>
    where
        E: serde::de::Error,
    {
        match Binary32::from_i64(value) {
            Some(s) => Ok(s),
            None => Err(E::invalid_value(Unexpected::Signed(value), &self)),
        }
    }

    fn visit_u64<E>(self, value: u64) -> Result<Binary32, E>
    where
        E: serde::de::Error,
    {
        match Binary32::from_u64(value) {
            Some(s) => Ok(s),
            None => Err(E::invalid_value(Unexpected::Unsigned(value), &self)),
        }
    }

    fn visit_f64<E>(self, value: f64) -> Result<Binary32, E>
    where
        E: serde::de::Error,
    {
        Ok(Binary32::from(value as f32))
    }

    fn visit_str<E>(self, value: &str) -> Result<Binary32, E>
    where
        E: serde::de::Error,
    {
        Binary32::from_scientific(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}
