//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Token segments use the URL-safe
//! alphabet without padding; decoding is bounded by a caller-supplied limit.

use crate::error::EncodingError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL string to bytes with maximum size limit
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>, EncodingError> {
    // Reject before decoding: 4 encoded chars carry 3 bytes
    let estimated = input.len() / 4 * 3;
    if estimated > max_size {
        return Err(EncodingError::TooLarge {
            size: estimated,
            max: max_size,
        });
    }

    let result = URL_SAFE_NO_PAD.decode(input)?;
    if result.len() > max_size {
        return Err(EncodingError::TooLarge {
            size: result.len(),
            max: max_size,
        });
    }

    Ok(result)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub fn decode_string(input: &str, max_size: usize) -> Result<String, EncodingError> {
    let bytes = decode_bytes(input, max_size)?;
    Ok(String::from_utf8(bytes)?)
}
