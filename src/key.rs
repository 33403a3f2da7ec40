use crate::error::{FpeError, Result};

/// Decode a hexadecimal key string into raw bytes.
/// Accepts an optional `0x` prefix; rejects empty, odd-length, or non-hex
/// input with `InvalidKey`.
pub fn decode_key_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if trimmed.is_empty() {
        return Err(FpeError::InvalidKey("empty key".into()));
    }
    if trimmed.len() % 2 != 0 {
        return Err(FpeError::InvalidKey(format!(
            "odd hex length {}",
            trimmed.len()
        )));
    }

    hex::decode(trimmed).map_err(|e| FpeError::InvalidKey(format!("bad hex: {}", e)))
}
