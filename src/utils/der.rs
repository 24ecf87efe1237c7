//! Minimal DER reading for public key structures
//!
//! The outer SPKI layout is walked to find the key family from the algorithm
//! OID (and curve OID for EC keys). PKCS#1 `RSAPublicKey` bodies are checked
//! for shape only; the integers are handed to the signature backend as-is.

use crate::error::KeyError;
use crate::keys::EcdsaCurve;

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;
const TAG_BIT_STRING: u8 = 0x03;
const TAG_OID: u8 = 0x06;

// rsaEncryption 1.2.840.113549.1.1.1
const OID_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];
// id-ecPublicKey 1.2.840.10045.2.1
const OID_EC_PUBLIC_KEY: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
// prime256v1 1.2.840.10045.3.1.7
const OID_P256: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
// secp384r1 1.3.132.0.34
const OID_P384: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x22];

/// Key family identified from an SPKI algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpkiKind {
    Rsa,
    Ec(EcdsaCurve),
}

/// Decoded SubjectPublicKeyInfo
#[derive(Debug)]
pub(crate) struct Spki<'a> {
    pub kind: SpkiKind,
    /// BIT STRING contents: PKCS#1 RSAPublicKey for RSA, SEC1 point for EC
    pub public_key: &'a [u8],
}

struct DerReader<'a> {
    data: &'a [u8],
}

impl<'a> DerReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read one tag-length-value and return the tag and contents
    fn read_tlv(&mut self) -> Result<(u8, &'a [u8]), KeyError> {
        let (&tag, rest) = self
            .data
            .split_first()
            .ok_or_else(|| KeyError::InvalidDer("unexpected end of input".to_string()))?;
        let (&first, mut rest) = rest
            .split_first()
            .ok_or_else(|| KeyError::InvalidDer("missing length".to_string()))?;

        let len = if first < 0x80 {
            first as usize
        } else {
            let count = (first & 0x7f) as usize;
            if count == 0 || count > 4 || rest.len() < count {
                return Err(KeyError::InvalidDer(format!(
                    "unsupported length encoding 0x{first:02x}"
                )));
            }
            let len = rest[..count]
                .iter()
                .fold(0usize, |acc, b| (acc << 8) | *b as usize);
            rest = &rest[count..];
            len
        };

        if rest.len() < len {
            return Err(KeyError::InvalidDer(format!(
                "length {len} exceeds remaining {} bytes",
                rest.len()
            )));
        }

        let (contents, remaining) = rest.split_at(len);
        self.data = remaining;
        Ok((tag, contents))
    }

    fn expect(&mut self, expected: u8) -> Result<&'a [u8], KeyError> {
        let (tag, contents) = self.read_tlv()?;
        if tag != expected {
            return Err(KeyError::InvalidDer(format!(
                "expected tag 0x{expected:02x}, found 0x{tag:02x}"
            )));
        }
        Ok(contents)
    }
}

/// Parse a DER-encoded SubjectPublicKeyInfo
pub(crate) fn parse_spki(der: &[u8]) -> Result<Spki<'_>, KeyError> {
    let mut outer = DerReader::new(der);
    let spki = outer.expect(TAG_SEQUENCE)?;
    if !outer.is_empty() {
        return Err(KeyError::InvalidDer(
            "trailing data after SubjectPublicKeyInfo".to_string(),
        ));
    }

    let mut fields = DerReader::new(spki);
    let mut algorithm = DerReader::new(fields.expect(TAG_SEQUENCE)?);
    let bit_string = fields.expect(TAG_BIT_STRING)?;

    let oid = algorithm.expect(TAG_OID)?;
    let kind = if oid == OID_RSA_ENCRYPTION {
        SpkiKind::Rsa
    } else if oid == OID_EC_PUBLIC_KEY {
        let curve = algorithm.expect(TAG_OID)?;
        if curve == OID_P256 {
            SpkiKind::Ec(EcdsaCurve::P256)
        } else if curve == OID_P384 {
            SpkiKind::Ec(EcdsaCurve::P384)
        } else {
            return Err(KeyError::UnsupportedKeyType(
                "EC key on an unsupported curve".to_string(),
            ));
        }
    } else {
        return Err(KeyError::UnsupportedKeyType(format!(
            "public key algorithm OID {oid:02x?}"
        )));
    };

    let (&unused_bits, public_key) = bit_string
        .split_first()
        .ok_or_else(|| KeyError::InvalidDer("empty BIT STRING".to_string()))?;
    if unused_bits != 0 {
        return Err(KeyError::InvalidDer(
            "BIT STRING with unused bits".to_string(),
        ));
    }

    Ok(Spki { kind, public_key })
}

/// Check that `der` is a PKCS#1 `RSAPublicKey`: a SEQUENCE of two positive
/// INTEGERs (modulus, public exponent) with nothing after it
pub(crate) fn check_rsa_public_key(der: &[u8]) -> Result<(), KeyError> {
    let mut outer = DerReader::new(der);
    let mut fields = DerReader::new(outer.expect(TAG_SEQUENCE)?);
    if !outer.is_empty() {
        return Err(KeyError::InvalidDer(
            "trailing data after RSAPublicKey".to_string(),
        ));
    }

    for name in ["modulus", "public exponent"] {
        let integer = fields.expect(TAG_INTEGER)?;
        match integer.first() {
            None => return Err(KeyError::InvalidDer(format!("empty {name}"))),
            Some(&first) if first & 0x80 != 0 => {
                return Err(KeyError::InvalidDer(format!("negative {name}")))
            }
            Some(_) => {}
        }
    }

    if !fields.is_empty() {
        return Err(KeyError::InvalidDer(
            "unexpected fields in RSAPublicKey".to_string(),
        ));
    }
    Ok(())
}
