use crate::algorithm::Algorithm;
use crate::error::{DecodeError, Segment};
use miniserde::json::{self, Object, Value};
use miniserde::Deserialize;

/// Media type declared in the `typ` header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `JWT`
    Jwt,
}

impl TokenType {
    /// Map a wire name onto a token type
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "JWT" => Some(TokenType::Jwt),
            _ => None,
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenType::Jwt => "JWT",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded JOSE header
///
/// `alg` and `typ` are lifted into typed fields. Every other member of the
/// header object is kept verbatim in [`extensions`](Header::extensions).
#[derive(Debug, Clone)]
pub struct Header {
    algorithm: Algorithm,
    token_type: Option<TokenType>,
    extensions: Object,
}

impl Header {
    /// Build a header from decoded JSON text
    pub(crate) fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: Value =
            json::from_str(text).map_err(|e| DecodeError::encoding(Segment::Header, e))?;
        let Value::Object(mut fields) = value else {
            return Err(DecodeError::InvalidHeaderSchema(
                "header is not a JSON object".to_string(),
            ));
        };

        let algorithm = match fields.remove("alg") {
            Some(Value::String(name)) => Algorithm::from_name(&name).ok_or_else(|| {
                DecodeError::InvalidHeaderSchema(format!("unsupported algorithm '{name}'"))
            })?,
            Some(_) => {
                return Err(DecodeError::InvalidHeaderSchema(
                    "'alg' must be a string".to_string(),
                ))
            }
            None => {
                return Err(DecodeError::InvalidHeaderSchema(
                    "missing required attribute 'alg'".to_string(),
                ))
            }
        };

        let token_type = match fields.remove("typ") {
            None => None,
            Some(Value::String(name)) => Some(TokenType::from_name(&name).ok_or_else(|| {
                DecodeError::InvalidHeaderSchema(format!("unsupported token type '{name}'"))
            })?),
            Some(_) => {
                return Err(DecodeError::InvalidHeaderSchema(
                    "'typ' must be a string".to_string(),
                ))
            }
        };

        Ok(Self {
            algorithm,
            token_type,
            extensions: fields,
        })
    }

    /// Algorithm used for signing
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Token type, if the header declared one
    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }

    /// All header members other than `alg` and `typ`
    pub fn extensions(&self) -> &Object {
        &self.extensions
    }

    /// Look up a single extension member by its original name
    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// Look up a string extension member
    pub fn extension_str(&self, name: &str) -> Option<&str> {
        match self.extension(name)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Deserialize one extension member into a caller-defined shape
    ///
    /// Returns `Ok(None)` when the member is absent.
    pub fn extension_as<T: Deserialize>(&self, name: &str) -> Result<Option<T>, miniserde::Error> {
        self.extension(name)
            .map(|value| json::from_str(&json::to_string(value)))
            .transpose()
    }
}
