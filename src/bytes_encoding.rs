//! Serde adapter storing raw bytes as standard, padded base64 text, which
//! is how the envelope and its payload have always been laid out on disk.

use base64::{
    engine::general_purpose::STANDARD,
    Engine as _,
};
use serde::{
    de::Error as _,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

pub fn serialize<S>(
    value: &[u8],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    STANDARD.encode(value).serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoding = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoding)
        .map_err(|error| D::Error::custom(error.to_string()))
}
