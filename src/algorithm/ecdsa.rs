use super::{Algorithm, SignatureVerifier};
use crate::error::VerifyError;
use crate::keys::{EcdsaCurve, VerificationKey};

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
pub struct ES384;

impl SignatureVerifier for ES256 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ES256
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let ecdsa_key = key.as_ecdsa_public(Algorithm::ES256, EcdsaCurve::P256)?;
        Ok(verify_ecdsa(
            signing_input,
            signature,
            ecdsa_key.as_bytes(),
            &signature::ECDSA_P256_SHA256_FIXED,
        ))
    }
}

impl SignatureVerifier for ES384 {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ES384
    }

    fn verify(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &VerificationKey,
    ) -> Result<bool, VerifyError> {
        let ecdsa_key = key.as_ecdsa_public(Algorithm::ES384, EcdsaCurve::P384)?;
        Ok(verify_ecdsa(
            signing_input,
            signature,
            ecdsa_key.as_bytes(),
            &signature::ECDSA_P384_SHA384_FIXED,
        ))
    }
}

/// Generic ECDSA signature verification
///
/// JWS carries ECDSA signatures as fixed-length `R || S`, not ASN.1 DER.
fn verify_ecdsa(
    signing_input: &[u8],
    signature: &[u8],
    public_point: &[u8],
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> bool {
    UnparsedPublicKey::new(algorithm, public_point)
        .verify(signing_input, signature)
        .is_ok()
}
