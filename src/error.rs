//! Error types for JWT decoding and verification
//!
//! Decoding failures are always fatal to the `parse` call and carry the
//! originating cause. Verification never reports "signature did not match"
//! or "token expired" as an error; those are a `false` result. Only
//! structural misuse (a key that cannot serve the declared algorithm, key
//! material that cannot be parsed) surfaces as an error.

use crate::algorithm::Algorithm;
use thiserror::Error;

/// The token segment an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::Payload => write!(f, "payload"),
        }
    }
}

/// Why a segment could not be turned into JSON
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Base64URL decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded size {size} bytes exceeds limit of {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] miniserde::Error),
}

/// Errors raised while decoding a token string
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed JWT token - {segment_count}/3 segments")]
    MalformedToken { segment_count: usize },

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Unable to decode {segment} segment: {source}")]
    InvalidEncoding {
        segment: Segment,
        #[source]
        source: EncodingError,
    },

    #[error("Unable to parse header segment: {0}")]
    InvalidHeaderSchema(String),

    #[error("Unable to parse payload segment: {0}")]
    InvalidPayloadSchema(String),

    #[error("The {segment} does not match the extended schema: {reason}")]
    ExtensionRejected { segment: Segment, reason: String },
}

impl DecodeError {
    pub(crate) fn encoding(segment: Segment, source: impl Into<EncodingError>) -> Self {
        DecodeError::InvalidEncoding {
            segment,
            source: source.into(),
        }
    }
}

/// Structural misuse detected while verifying a token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Key type mismatch for algorithm '{algorithm}': expected {expected}, got {actual}")]
    KeyTypeMismatch {
        algorithm: Algorithm,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("No signature primitive registered for algorithm '{0}'")]
    NoPrimitive(Algorithm),
}

/// Errors raised while turning key material into a [`VerificationKey`](crate::VerificationKey)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid PEM: {0}")]
    InvalidPem(String),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("Invalid DER: {0}")]
    InvalidDer(String),
}

/// Any error produced by this crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Result type alias for jwtcheck operations
pub type Result<T> = std::result::Result<T, Error>;
