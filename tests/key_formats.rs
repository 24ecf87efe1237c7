//! Key format compatibility tests
//!
//! These tests verify that jwtcheck can load verification keys from the
//! encodings JWT tooling hands out:
//! - SubjectPublicKeyInfo PEM (`PUBLIC KEY`) for RSA and EC
//! - PKCS#1 PEM (`RSA PUBLIC KEY`)
//! - Raw DER / raw EC points through the direct constructors
//!
//! Each loaded key is checked by verifying a freshly signed token.

use aws_lc_rs::rand::SystemRandom;
use base64::{engine::general_purpose::STANDARD, Engine};
use jwtcheck::*;

fn signing_input(alg: &str) -> String {
    format!(
        "{}.{}",
        jwtcheck::utils::encode(&format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#)),
        jwtcheck::utils::encode(r#"{"sub":"key-format","iat":1700000000,"exp":1700003600}"#)
    )
}

fn pem(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);
    let mut out = format!("-----BEGIN {label}-----\n");
    for line in body.as_bytes().chunks(64) {
        out.push_str(std::str::from_utf8(line).unwrap());
        out.push('\n');
    }
    out.push_str(&format!("-----END {label}-----\n"));
    out
}

fn assert_verifies(input: &str, signature: &[u8], key: &VerificationKey) {
    let token = parse(&format!("{}.{}", input, jwtcheck::utils::encode_bytes(signature))).unwrap();
    assert_eq!(verify(&token, Some(key), Some(1700000000)), Ok(true));
}

// ============================================================================
// RSA Key Format Tests
// ============================================================================

mod rsa_key_formats {
    use super::*;
    use aws_lc_rs::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
    use rsa::pkcs1::{EncodeRsaPublicKey, LineEnding};
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
    use rsa::{RsaPrivateKey, RsaPublicKey};
    use std::sync::OnceLock;

    fn generate_rsa_keypair() -> &'static (RsaPublicKey, RsaKeyPair, String) {
        static PAIR: OnceLock<(RsaPublicKey, RsaKeyPair, String)> = OnceLock::new();
        PAIR.get_or_init(|| {
            let mut rng = rand::thread_rng();
            let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate RSA key");
            let pkcs8 = private_key.to_pkcs8_der().unwrap();
            let signer = RsaKeyPair::from_pkcs8(pkcs8.as_bytes()).unwrap();

            // Keep the private PEM around for the rejection test
            let private_pem = private_key.to_pkcs8_pem(LineEnding::LF).unwrap().to_string();

            (private_key.to_public_key(), signer, private_pem)
        })
    }

    fn signed() -> (String, Vec<u8>) {
        let (_, signer, _) = generate_rsa_keypair();
        let input = signing_input("RS256");
        let mut signature = vec![0u8; signer.public_modulus_len()];
        signer
            .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), input.as_bytes(), &mut signature)
            .unwrap();
        (input, signature)
    }

    #[test]
    fn test_rsa_spki_pem() {
        let (public, _, _) = generate_rsa_keypair();
        let pem = public.to_public_key_pem(LineEnding::LF).unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));

        let key = VerificationKey::from_pem(&pem).expect("SPKI PEM should load");
        assert_eq!(key.key_type(), "RSA");

        let (input, signature) = signed();
        assert_verifies(&input, &signature, &key);
    }

    #[test]
    fn test_rsa_pkcs1_pem() {
        let (public, _, _) = generate_rsa_keypair();
        let pem = public.to_pkcs1_pem(LineEnding::LF).unwrap();
        assert!(pem.starts_with("-----BEGIN RSA PUBLIC KEY-----"));

        let key = VerificationKey::from_pem(&pem).expect("PKCS#1 PEM should load");
        assert_eq!(key.key_type(), "RSA");

        let (input, signature) = signed();
        assert_verifies(&input, &signature, &key);
    }

    #[test]
    fn test_rsa_pkcs1_der() {
        let (public, _, _) = generate_rsa_keypair();
        let der = public.to_pkcs1_der().unwrap();

        let key = VerificationKey::rsa_public(der.as_bytes().to_vec()).unwrap();
        let (input, signature) = signed();
        assert_verifies(&input, &signature, &key);
    }

    #[test]
    fn test_rsa_spki_der() {
        let (public, _, _) = generate_rsa_keypair();
        let der = public.to_public_key_der().unwrap();

        let key = VerificationKey::rsa_public(der.as_bytes().to_vec()).unwrap();
        let (input, signature) = signed();
        assert_verifies(&input, &signature, &key);
    }

    #[test]
    fn test_rsa_pem_with_crlf_line_endings() {
        let (public, _, _) = generate_rsa_keypair();
        let pem = public.to_public_key_pem(LineEnding::CRLF).unwrap();

        let key = VerificationKey::from_key_string(&pem).unwrap();
        let (input, signature) = signed();
        assert_verifies(&input, &signature, &key);
    }

    #[test]
    fn test_rsa_private_key_rejected() {
        let (_, _, private_pem) = generate_rsa_keypair();
        assert!(matches!(
            VerificationKey::from_pem(private_pem),
            Err(KeyError::UnsupportedKeyType(_))
        ));
    }
}

// ============================================================================
// ECDSA Key Format Tests
// ============================================================================

mod ecdsa_key_formats {
    use super::*;
    use aws_lc_rs::signature::{
        EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, ECDSA_P256_SHA256_FIXED_SIGNING,
        ECDSA_P384_SHA384_FIXED_SIGNING,
    };

    // SubjectPublicKeyInfo prefixes up to the BIT STRING contents
    const P256_SPKI_PREFIX: &[u8] = &[
        0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
        0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
    ];
    const P384_SPKI_PREFIX: &[u8] = &[
        0x30, 0x76, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
        0x2b, 0x81, 0x04, 0x00, 0x22, 0x03, 0x62, 0x00,
    ];

    fn generate(alg: &'static EcdsaSigningAlgorithm) -> (EcdsaKeyPair, Vec<u8>) {
        let key_pair = EcdsaKeyPair::generate(alg).unwrap();
        let point = key_pair.public_key().as_ref().to_vec();
        (key_pair, point)
    }

    fn sign(key_pair: &EcdsaKeyPair, input: &str) -> Vec<u8> {
        key_pair
            .sign(&SystemRandom::new(), input.as_bytes())
            .unwrap()
            .as_ref()
            .to_vec()
    }

    #[test]
    fn test_p256_spki_pem() {
        let (key_pair, point) = generate(&ECDSA_P256_SHA256_FIXED_SIGNING);
        let spki = [P256_SPKI_PREFIX, point.as_slice()].concat();

        let key = VerificationKey::from_pem(&pem("PUBLIC KEY", &spki)).unwrap();
        assert_eq!(key.key_type(), "ECDSA P-256");

        let input = signing_input("ES256");
        assert_verifies(&input, &sign(&key_pair, &input), &key);
    }

    #[test]
    fn test_p384_spki_pem() {
        let (key_pair, point) = generate(&ECDSA_P384_SHA384_FIXED_SIGNING);
        let spki = [P384_SPKI_PREFIX, point.as_slice()].concat();

        let key = VerificationKey::from_key_string(&pem("PUBLIC KEY", &spki)).unwrap();
        assert_eq!(key.key_type(), "ECDSA P-384");

        let input = signing_input("ES384");
        assert_verifies(&input, &sign(&key_pair, &input), &key);
    }

    #[test]
    fn test_raw_uncompressed_point() {
        let (key_pair, point) = generate(&ECDSA_P256_SHA256_FIXED_SIGNING);
        assert_eq!(point.len(), 65);
        assert_eq!(point[0], 0x04);

        let key = VerificationKey::ecdsa_public(point, EcdsaCurve::P256).unwrap();
        let input = signing_input("ES256");
        assert_verifies(&input, &sign(&key_pair, &input), &key);
    }

    #[test]
    fn test_unsupported_curve_rejected() {
        // id-ecPublicKey on secp256k1 (1.3.132.0.10)
        let mut spki = vec![
            0x30, 0x56, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
            0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x42, 0x00,
        ];
        spki.extend_from_slice(&[0x04; 65]);

        assert!(matches!(
            VerificationKey::from_pem(&pem("PUBLIC KEY", &spki)),
            Err(KeyError::UnsupportedKeyType(_))
        ));
    }
}

// ============================================================================
// Invalid Key Input Tests
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(matches!(
        VerificationKey::from_pem(""),
        Err(KeyError::InvalidPem(_))
    ));

    // An empty key string is an (empty) shared secret
    let key = VerificationKey::from_key_string("").unwrap();
    assert_eq!(key.key_type(), "Symmetric");
}

#[test]
fn test_invalid_der_in_pem() {
    let result = VerificationKey::from_pem(&pem("PUBLIC KEY", &[0x30, 0x03, 0x01, 0x02]));
    assert!(matches!(result, Err(KeyError::InvalidDer(_))));
}

#[test]
fn test_malformed_pkcs1_body_rejected() {
    // Valid base64 that is not an RSAPublicKey structure
    let result = VerificationKey::from_pem(
        "-----BEGIN RSA PUBLIC KEY-----\nAQIDBAUG\n-----END RSA PUBLIC KEY-----",
    );
    assert!(matches!(result, Err(KeyError::InvalidDer(_))));

    // PKCS#1 with a third INTEGER
    let three_ints = [0x30, 0x09, 0x02, 0x01, 0x05, 0x02, 0x01, 0x03, 0x02, 0x01, 0x01];
    let result = VerificationKey::from_pem(&pem("RSA PUBLIC KEY", &three_ints));
    assert!(matches!(result, Err(KeyError::InvalidDer(_))));
}

#[test]
fn test_malformed_raw_keys_rejected() {
    assert!(matches!(
        VerificationKey::ecdsa_public(vec![9; 3], EcdsaCurve::P256),
        Err(KeyError::InvalidDer(_))
    ));
    assert!(matches!(
        VerificationKey::ecdsa_public(vec![0x04; 65], EcdsaCurve::P384),
        Err(KeyError::InvalidDer(_))
    ));
    assert!(matches!(
        VerificationKey::rsa_public(vec![1, 2, 3]),
        Err(KeyError::InvalidDer(_))
    ));

    // Surfaces through `?` as a key error, before any token is involved
    fn load(point: Vec<u8>) -> jwtcheck::Result<VerificationKey> {
        Ok(VerificationKey::ecdsa_public(point, EcdsaCurve::P256)?)
    }
    assert!(matches!(load(vec![9; 3]), Err(Error::Key(KeyError::InvalidDer(_)))));
}

#[test]
fn test_invalid_base64_body() {
    let result = VerificationKey::from_pem("-----BEGIN PUBLIC KEY-----\n!!!!\n-----END PUBLIC KEY-----\n");
    assert!(matches!(result, Err(KeyError::InvalidPem(_))));
}

#[test]
fn test_missing_end_line() {
    let result = VerificationKey::from_pem("-----BEGIN PUBLIC KEY-----\nMFkw\n");
    assert!(matches!(result, Err(KeyError::InvalidPem(_))));
}

#[test]
fn test_certificate_rejected() {
    let result = VerificationKey::from_pem(&pem("CERTIFICATE", &[0x30, 0x00]));
    assert!(matches!(result, Err(KeyError::UnsupportedKeyType(_))));
}

#[test]
fn test_key_errors_convert_to_crate_error() {
    fn load(pem: &str) -> jwtcheck::Result<VerificationKey> {
        Ok(VerificationKey::from_pem(pem)?)
    }

    assert!(matches!(load("garbage"), Err(Error::Key(KeyError::InvalidPem(_)))));
}
