//! Key types for JWT signature verification
//!
//! This module provides a type-safe abstraction over the key material a
//! caller hands to the verifier:
//! - Symmetric keys (for HMAC algorithms)
//! - Asymmetric public keys (for RSA/ECDSA algorithms)
//!
//! Asymmetric key material is checked once, when the key is built: PKCS#1
//! bodies must have the `RSAPublicKey` shape and EC points must be
//! uncompressed points of the curve's size. Material that fails is a
//! [`KeyError`], never a failed signature check later on.

use crate::algorithm::Algorithm;
use crate::error::{KeyError, VerifyError};
use crate::limits::MAX_PEM_LENGTH;
use crate::utils::der::{check_rsa_public_key, parse_spki, SpkiKind};
use base64::{engine::general_purpose::STANDARD, Engine};

/// A key that can be used for JWT signature verification
#[derive(Debug, Clone)]
pub enum VerificationKey {
    /// Symmetric key for HMAC algorithms
    Symmetric(SymmetricKey),

    /// Asymmetric public key for RSA/ECDSA algorithms
    Asymmetric(AsymmetricKey),
}

impl VerificationKey {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        VerificationKey::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create an RSA public key from DER (PKCS#1 `RSAPublicKey` or SubjectPublicKeyInfo)
    ///
    /// # Errors
    ///
    /// [`KeyError::InvalidDer`] when the bytes are not an `RSAPublicKey`.
    pub fn rsa_public(der: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let der = der.into();
        let pkcs1 = match parse_spki(&der) {
            Ok(spki) if matches!(spki.kind, SpkiKind::Rsa) => Some(spki.public_key.to_vec()),
            _ => None,
        };
        let key = RsaPublicKey::new(pkcs1.unwrap_or(der))?;
        Ok(VerificationKey::Asymmetric(AsymmetricKey::Rsa(key)))
    }

    /// Create an ECDSA public key from an uncompressed SEC1 point
    ///
    /// # Errors
    ///
    /// [`KeyError::InvalidDer`] when the point is not `0x04 || X || Y` with
    /// coordinates of the curve's size.
    pub fn ecdsa_public(point: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Result<Self, KeyError> {
        let key = EcdsaPublicKey::new(point.into(), curve)?;
        Ok(VerificationKey::Asymmetric(AsymmetricKey::Ecdsa(key)))
    }

    /// Parse a PEM-encoded public key
    ///
    /// Accepts `PUBLIC KEY` (SubjectPublicKeyInfo, RSA or EC on P-256/P-384)
    /// and `RSA PUBLIC KEY` (PKCS#1). Private keys and certificates are
    /// rejected.
    ///
    /// # Example
    /// ```ignore
    /// let key = VerificationKey::from_pem(include_str!("public.pem"))?;
    /// ```
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let (label, der) = decode_pem(pem)?;

        match label.as_str() {
            "PUBLIC KEY" => {
                let spki = parse_spki(&der)?;
                match spki.kind {
                    SpkiKind::Rsa => Self::rsa_public(spki.public_key),
                    SpkiKind::Ec(curve) => Self::ecdsa_public(spki.public_key, curve),
                }
            }
            "RSA PUBLIC KEY" => Self::rsa_public(der),
            other if other.contains("PRIVATE KEY") => Err(KeyError::UnsupportedKeyType(
                format!("{other} (verification needs a public key)"),
            )),
            other => Err(KeyError::UnsupportedKeyType(other.to_string())),
        }
    }

    /// Interpret a single key string the way most JWT tooling does
    ///
    /// PEM armor is parsed as a public key; any other string is used as an
    /// HMAC shared secret.
    pub fn from_key_string(key: &str) -> Result<Self, KeyError> {
        if key.trim_start().starts_with("-----BEGIN ") {
            Self::from_pem(key)
        } else {
            Ok(Self::symmetric(key))
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            VerificationKey::Symmetric(_) => "Symmetric",
            VerificationKey::Asymmetric(AsymmetricKey::Rsa(_)) => "RSA",
            VerificationKey::Asymmetric(AsymmetricKey::Ecdsa(key)) => match key.curve() {
                EcdsaCurve::P256 => "ECDSA P-256",
                EcdsaCurve::P384 => "ECDSA P-384",
            },
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self, algorithm: Algorithm) -> Result<&SymmetricKey, VerifyError> {
        match self {
            VerificationKey::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Symmetric")),
        }
    }

    /// Get as RSA public key or return error
    pub fn as_rsa_public(&self, algorithm: Algorithm) -> Result<&RsaPublicKey, VerifyError> {
        match self {
            VerificationKey::Asymmetric(AsymmetricKey::Rsa(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "RSA")),
        }
    }

    /// Get as ECDSA public key on the given curve or return error
    pub fn as_ecdsa_public(
        &self,
        algorithm: Algorithm,
        curve: EcdsaCurve,
    ) -> Result<&EcdsaPublicKey, VerifyError> {
        match self {
            VerificationKey::Asymmetric(AsymmetricKey::Ecdsa(key)) if key.curve() == curve => {
                Ok(key)
            }
            _ => Err(self.mismatch(algorithm, curve.key_type())),
        }
    }

    fn mismatch(&self, algorithm: Algorithm, expected: &'static str) -> VerifyError {
        VerifyError::KeyTypeMismatch {
            algorithm,
            expected,
            actual: self.key_type(),
        }
    }
}

/// Split PEM armor and decode the base64 body
fn decode_pem(pem: &str) -> Result<(String, Vec<u8>), KeyError> {
    if pem.len() > MAX_PEM_LENGTH {
        return Err(KeyError::InvalidPem(format!(
            "document too large: {} bytes (maximum: {MAX_PEM_LENGTH} bytes)",
            pem.len()
        )));
    }

    let mut lines = pem.lines().map(str::trim).filter(|line| !line.is_empty());

    let begin = lines
        .next()
        .ok_or_else(|| KeyError::InvalidPem("empty input".to_string()))?;
    let label = begin
        .strip_prefix("-----BEGIN ")
        .and_then(|rest| rest.strip_suffix("-----"))
        .ok_or_else(|| KeyError::InvalidPem("missing BEGIN line".to_string()))?;
    let end_line = format!("-----END {label}-----");

    let mut body = String::new();
    let mut terminated = false;
    for line in lines.by_ref() {
        if line == end_line {
            terminated = true;
            break;
        }
        if line.starts_with("-----") {
            return Err(KeyError::InvalidPem(format!("unexpected armor line: {line}")));
        }
        // Encapsulated headers (RFC 1421) are not part of the body
        if line.contains(':') {
            continue;
        }
        body.push_str(line);
    }

    if !terminated {
        return Err(KeyError::InvalidPem(format!("missing {end_line}")));
    }

    let der = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| KeyError::InvalidPem(format!("base64 body: {e}")))?;

    Ok((label.to_string(), der))
}

/// Symmetric key for HMAC algorithms
#[derive(Clone)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Asymmetric public key for RSA/ECDSA algorithms
#[derive(Debug, Clone)]
pub enum AsymmetricKey {
    /// RSA public key
    Rsa(RsaPublicKey),

    /// ECDSA public key
    Ecdsa(EcdsaPublicKey),
}

/// RSA public key (DER-encoded)
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

impl RsaPublicKey {
    /// Create a new RSA public key from PKCS#1 DER bytes
    pub fn new(der: Vec<u8>) -> Result<Self, KeyError> {
        check_rsa_public_key(&der)?;
        Ok(Self { der })
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
}

impl EcdsaCurve {
    fn key_type(self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "ECDSA P-256",
            EcdsaCurve::P384 => "ECDSA P-384",
        }
    }

    /// Length of an uncompressed point on this curve
    pub const fn point_len(self) -> usize {
        match self {
            EcdsaCurve::P256 => 65,
            EcdsaCurve::P384 => 97,
        }
    }
}

/// ECDSA public key (uncompressed SEC1 point)
#[derive(Debug, Clone)]
pub struct EcdsaPublicKey {
    point: Vec<u8>,
    curve: EcdsaCurve,
}

impl EcdsaPublicKey {
    /// Create a new ECDSA public key
    pub fn new(point: Vec<u8>, curve: EcdsaCurve) -> Result<Self, KeyError> {
        if point.len() != curve.point_len() || point.first() != Some(&0x04) {
            return Err(KeyError::InvalidDer(format!(
                "expected a {}-byte uncompressed {} point, got {} bytes",
                curve.point_len(),
                curve.key_type(),
                point.len()
            )));
        }
        Ok(Self { point, curve })
    }

    /// Get the encoded point
    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}
