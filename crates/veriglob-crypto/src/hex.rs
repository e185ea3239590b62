//! Hex utilities (no external hex crate dependency).

use crate::error::CryptoError;

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string (either case, surrounding whitespace ignored).
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .ok_or_else(|| CryptoError::HexDecode(format!("non-ascii input at position {i}")))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16).map_err(|e| {
                        CryptoError::HexDecode(format!("invalid hex at position {i}: {e}"))
                    })
                })
        })
        .collect()
}

/// First four bytes as hex, for `Debug` output that must not print a full key.
pub(crate) fn hex_prefix(bytes: &[u8]) -> String {
    to_hex(&bytes[..bytes.len().min(4)])
}
