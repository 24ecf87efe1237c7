//! # jwtcheck - Parse and Verify Signed JWTs
//!
//! **jwtcheck** decodes JSON Web Tokens in the compact JWS serialization and
//! verifies their signature and expiry against a caller-supplied key.
//!
//! ## Overview
//!
//! A JWT is three base64url segments joined by `.`: a JSON header, a JSON
//! claims payload, and a signature over the first two segments. Decoding
//! and verifying are separate steps:
//!
//! ```text
//! &str ──parse()──▶ Token ──verify(key, time)──▶ bool
//! ```
//!
//! - [`parse`] splits and decodes the token and checks the minimal schema:
//!   a supported `alg`, an optional `typ` of `JWT`, and numeric `iat` and
//!   `exp` claims. Every other member is kept as an extension attribute.
//! - [`verify`] checks the signature over the exact bytes of the original
//!   string and, if a time is given, that it does not lie after `exp`.
//!
//! A signature that does not match and a token that has expired are both
//! reported as `Ok(false)`. Errors are reserved for malformed input and for
//! keys that cannot serve the declared algorithm.
//!
//! ## Quick Start
//!
//! ```
//! use jwtcheck::{Algorithm, VerificationKey};
//!
//! // {"alg":"HS256","typ":"JWT","test":"test"} .
//! // {"sub":"1234567890","name":"John Doe","iat":1516239022,"exp":1516239022}
//! let raw = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCIsInRlc3QiOiJ0ZXN0In0.\
//!            eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyLCJleHAiOjE1MTYyMzkwMjJ9.\
//!            a6XKGfpZjmA0QgVzw4MgekvihPSy5ObL1kIV-elY2H4";
//!
//! let token = jwtcheck::parse(raw)?;
//! assert_eq!(token.header().algorithm(), Algorithm::HS256);
//! assert_eq!(token.payload().claim_str("name"), Some("John Doe"));
//!
//! let key = VerificationKey::symmetric("your-256-bit-secret");
//! assert!(jwtcheck::verify(&token, Some(&key), Some(1516239022))?);
//! assert!(!jwtcheck::verify(&token, Some(&key), Some(1516239023))?);
//! # Ok::<(), jwtcheck::Error>(())
//! ```
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512 (2048 to 8192 bit keys)
//! - **ECDSA**: ES256, ES384
//!
//! `none` is never accepted. Each algorithm is served by a
//! [`SignatureVerifier`]; the built-in ones use `hmac`/`sha2` and
//! `aws-lc-rs`, and [`Verifier::primitive`] can replace any of them.
//!
//! ## Keys
//!
//! ```
//! use jwtcheck::VerificationKey;
//!
//! // Shared secret for HS*
//! let secret = VerificationKey::symmetric(b"your-256-bit-secret".to_vec());
//!
//! // Single-string form: PEM armor is parsed, anything else is a secret
//! let also_secret = VerificationKey::from_key_string("your-256-bit-secret")?;
//! assert_eq!(also_secret.key_type(), "Symmetric");
//! # let _ = secret;
//! # Ok::<(), jwtcheck::Error>(())
//! ```
//!
//! RSA and EC public keys are read from `PUBLIC KEY` (SPKI) or
//! `RSA PUBLIC KEY` (PKCS#1) PEM with [`VerificationKey::from_pem`].
//!
//! ## Configuration
//!
//! [`Codec`] and [`Verifier`] are builders for callers that need more than
//! the defaults: size limits and extended schema checks when decoding, and
//! leeway, algorithm allow-lists and custom primitives when verifying.
//!
//! ## Logging
//!
//! Decoding and verification emit `tracing` events. No subscriber is
//! installed by the library.

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod keys;
pub(crate) mod limits;
pub mod token;
pub mod utils;
pub mod verifier;

pub use algorithm::{Algorithm, AlgorithmPolicy, SignatureVerifier};
pub use codec::{require_header_fields, require_payload_fields, Codec};
pub use error::{DecodeError, EncodingError, Error, KeyError, Result, Segment, VerifyError};
pub use keys::{EcdsaCurve, VerificationKey};
pub use token::{Header, Payload, Token, TokenType};
pub use verifier::Verifier;

/// Decode a token string with default settings
///
/// Equivalent to `Codec::default().parse(token)`.
pub fn parse(token: &str) -> std::result::Result<Token, DecodeError> {
    Codec::default().parse(token)
}

/// Verify a token with default settings
///
/// Equivalent to `Verifier::default().verify(token, key, verify_at)`.
pub fn verify(
    token: &Token,
    key: Option<&VerificationKey>,
    verify_at: Option<i64>,
) -> std::result::Result<bool, VerifyError> {
    Verifier::default().verify(token, key, verify_at)
}
