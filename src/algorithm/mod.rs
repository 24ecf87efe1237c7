mod traits;

pub mod ecdsa;
pub mod hmac;
pub mod rsa;

pub use traits::{default_verifier, SignatureVerifier};

/// Signature algorithm declared in the `alg` header field
///
/// The set is closed: a header naming anything else (including `none`) fails
/// to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,

    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// ECDSA with P-256 and SHA-256
    ES256,

    /// ECDSA with P-384 and SHA-384
    ES384,
}

impl Algorithm {
    /// Every supported algorithm
    pub const ALL: [Algorithm; 8] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
    ];

    /// Map a wire name onto an algorithm
    ///
    /// Matching is exact and case-sensitive, so `"none"`, `"None"` and
    /// `"hs256"` are all unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HS256" => Some(Algorithm::HS256),
            "HS384" => Some(Algorithm::HS384),
            "HS512" => Some(Algorithm::HS512),
            "RS256" => Some(Algorithm::RS256),
            "RS384" => Some(Algorithm::RS384),
            "RS512" => Some(Algorithm::RS512),
            "ES256" => Some(Algorithm::ES256),
            "ES384" => Some(Algorithm::ES384),
            _ => None,
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Policy for allowed algorithms
#[derive(Debug, Clone)]
pub struct AlgorithmPolicy {
    allowed: Vec<Algorithm>,
}

impl AlgorithmPolicy {
    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<Algorithm>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Create a policy that allows every supported algorithm
    pub fn allow_all() -> Self {
        Self::allow_only(Algorithm::ALL.to_vec())
    }

    /// Policy that allows only HS256
    pub fn hs256_only() -> Self {
        Self::allow_only(vec![Algorithm::HS256])
    }

    /// Policy that allows only RS256
    pub fn rs256_only() -> Self {
        Self::allow_only(vec![Algorithm::RS256])
    }

    /// Policy that allows any HMAC algorithm (HS256, HS384, HS512)
    pub fn hmac_any() -> Self {
        Self::allow_only(vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512])
    }

    /// Policy that allows any asymmetric algorithm
    pub fn asymmetric_any() -> Self {
        Self::allow_only(
            Algorithm::ALL
                .into_iter()
                .filter(|alg| !alg.is_symmetric())
                .collect(),
        )
    }

    /// Check if an algorithm is allowed
    pub fn is_allowed(&self, algorithm: &Algorithm) -> bool {
        self.allowed.contains(algorithm)
    }

    /// Get list of allowed algorithms
    pub fn allowed_algorithms(&self) -> &[Algorithm] {
        &self.allowed
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}
