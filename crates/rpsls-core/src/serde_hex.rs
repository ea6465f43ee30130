//! Hex (de)serialization for fixed-size byte arrays, `0x` prefix optional on input.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer, const N: usize>(bytes: &[u8; N], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(d: D) -> Result<[u8; N], D::Error> {
    let hex_str = String::deserialize(d)?;
    decode(&hex_str).map_err(serde::de::Error::custom)
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode<const N: usize>(s: &str) -> Result<[u8; N], hex::FromHexError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let mut arr = [0u8; N];
    hex::decode_to_slice(trimmed, &mut arr)?;
    Ok(arr)
}
