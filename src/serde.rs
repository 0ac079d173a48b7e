//! Serde integration: a `BigInt` round-trips as its decimal string
//! rendering, which keeps arbitrary precision through formats whose native
//! numbers do not.

use crate::BigInt;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for BigInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rendered = String::deserialize(deserializer)?;
        rendered.parse().map_err(D::Error::custom)
    }
}
