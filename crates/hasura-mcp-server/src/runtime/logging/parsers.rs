use std::{fmt::Display, str::FromStr};

use serde::{Deserialize as _, Deserializer};

/// Deserialize a string through the `FromStr` impl of `T`
pub(crate) fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse()
        .map_err(|e| serde::de::Error::custom(format!("invalid value '{raw}': {e}")))
}
