use super::{Algorithm, SignatureVerifier};
use crate::error::VerifyError;
use crate::keys::VerificationKey;

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

impl SignatureVerifier for HS256 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS256
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let secret = key.as_symmetric(Algorithm::HS256)?;
        Ok(verify_mac::<Hmac<Sha256>>(
            signing_input,
            signature,
            secret.as_bytes(),
        ))
    }
}

impl SignatureVerifier for HS384 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS384
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let secret = key.as_symmetric(Algorithm::HS384)?;
        Ok(verify_mac::<Hmac<Sha384>>(
            signing_input,
            signature,
            secret.as_bytes(),
        ))
    }
}

impl SignatureVerifier for HS512 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HS512
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let secret = key.as_symmetric(Algorithm::HS512)?;
        Ok(verify_mac::<Hmac<Sha512>>(
            signing_input,
            signature,
            secret.as_bytes(),
        ))
    }
}

/// Recompute the MAC and compare in constant time
fn verify_mac<M: Mac + KeyInit>(signing_input: &[u8], provided: &[u8], secret: &[u8]) -> bool {
    let Ok(mut mac) = <M as Mac>::new_from_slice(secret) else {
        return false;
    };
    mac.update(signing_input);
    let expected = mac.finalize().into_bytes();

    if provided.len() != expected.len() {
        return false;
    }

    constant_time_eq(provided, &expected)
}
