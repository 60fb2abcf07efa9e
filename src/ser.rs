//! Serde support for [`BigInt`], behind the `serde` feature.
//!
//! The value is represented as its canonical decimal string, which every
//! self-describing format can hold losslessly regardless of magnitude.

use crate::int::BigInt;
use core::fmt;
use serde_core::de::{self, Unexpected, Visitor};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(BigIntVisitor)
    }
}

struct BigIntVisitor;

impl<'de> Visitor<'de> for BigIntVisitor {
    type Value = BigInt;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal integer string")
    }

    fn visit_str<E>(self, value: &str) -> Result<BigInt, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_i64<E>(self, value: i64) -> Result<BigInt, E>
    where
        E: de::Error,
    {
        Ok(BigInt::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<BigInt, E>
    where
        E: de::Error,
    {
        Ok(BigInt::from(value))
    }
}
