//! Hex blob helpers

use alloy::primitives::{hex, Bytes, U256};

use crate::error::DecodeError;

/// `0x` + 8 hex digits
pub const SELECTOR_HEX_LEN: usize = 10;

/// Lowercase with a `0x` prefix
pub fn normalize(blob: &str) -> String {
    let blob = blob.trim().to_lowercase();
    if blob.starts_with("0x") {
        blob
    } else {
        format!("0x{}", blob)
    }
}

/// Selector prefix of a blob, `None` if the blob is too short to carry one
pub fn selector_prefix(blob: &str) -> Option<String> {
    let blob = normalize(blob);
    let selector = blob.get(..SELECTOR_HEX_LEN)?;
    selector[2..]
        .bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then(|| selector.to_string())
}

/// Decode a hex blob, with or without `0x`
pub fn parse_hex(blob: &str) -> Result<Bytes, DecodeError> {
    let trimmed = blob.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| DecodeError::malformed(format!("invalid hex: {e}")))
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Hex quantity with an even digit count (`0x00`, `0x01`, `0x0de0b6b3a7640000`)
pub fn to_hex_quantity(value: U256) -> String {
    let digits = format!("{:x}", value);
    if digits.len() % 2 == 0 {
        format!("0x{}", digits)
    } else {
        format!("0x0{}", digits)
    }
}
