use super::{ecdsa, hmac, rsa, Algorithm};
use crate::error::VerifyError;
use crate::keys::VerificationKey;

/// Cryptographic primitive that checks one signature algorithm
///
/// Implementations receive the already-decoded signature bytes and the exact
/// signing input taken from the token string. A signature that does not
/// match is `Ok(false)`; `Err` is reserved for keys that cannot serve the
/// algorithm at all.
pub trait SignatureVerifier: Send + Sync {
    /// The algorithm this primitive implements
    fn algorithm(&self) -> Algorithm;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (encoded header `.` encoded payload)
    /// * `signature` - The raw signature bytes
    /// * `key` - The key to use for verification
    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError>;
}

/// Get the built-in signature verifier for the given algorithm
pub fn default_verifier(algorithm: Algorithm) -> &'static dyn SignatureVerifier {
    match algorithm {
        Algorithm::HS256 => &hmac::HS256,
        Algorithm::HS384 => &hmac::HS384,
        Algorithm::HS512 => &hmac::HS512,
        Algorithm::RS256 => &rsa::RS256,
        Algorithm::RS384 => &rsa::RS384,
        Algorithm::RS512 => &rsa::RS512,
        Algorithm::ES256 => &ecdsa::ES256,
        Algorithm::ES384 => &ecdsa::ES384,
    }
}
