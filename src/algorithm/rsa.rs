use super::{Algorithm, SignatureVerifier};
use crate::error::VerifyError;
use crate::keys::VerificationKey;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// RS256 algorithm (RSA with SHA-256)
pub struct RS256;

/// RS384 algorithm (RSA with SHA-384)
pub struct RS384;

/// RS512 algorithm (RSA with SHA-512)
pub struct RS512;

impl SignatureVerifier for RS256 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RS256
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let rsa_key = key.as_rsa_public(Algorithm::RS256)?;
        Ok(verify_rsa(
            signing_input,
            signature,
            rsa_key.as_der(),
            &signature::RSA_PKCS1_2048_8192_SHA256,
        ))
    }
}

impl SignatureVerifier for RS384 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RS384
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let rsa_key = key.as_rsa_public(Algorithm::RS384)?;
        Ok(verify_rsa(
            signing_input,
            signature,
            rsa_key.as_der(),
            &signature::RSA_PKCS1_2048_8192_SHA384,
        ))
    }
}

impl SignatureVerifier for RS512 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RS512
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let rsa_key = key.as_rsa_public(Algorithm::RS512)?;
        Ok(verify_rsa(
            signing_input,
            signature,
            rsa_key.as_der(),
            &signature::RSA_PKCS1_2048_8192_SHA512,
        ))
    }
}

/// Generic RSA signature verification
///
/// Key bytes were shape-checked when the key was built. A modulus outside
/// 2048 to 8192 bits is refused by the backend and verifies as `false`.
fn verify_rsa(
    signing_input: &[u8],
    signature: &[u8],
    public_key_der: &[u8],
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> bool {
    UnparsedPublicKey::new(algorithm, public_key_der)
        .verify(signing_input, signature)
        .is_ok()
}
