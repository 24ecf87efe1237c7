use crate::error::{DecodeError, Segment};
use miniserde::json::{self, Number, Object, Value};
use miniserde::Deserialize;

/// Decoded claims set
///
/// `iat` and `exp` are required and lifted into typed fields (seconds since
/// the Unix epoch). All other claims are kept verbatim in
/// [`extensions`](Payload::extensions).
#[derive(Debug, Clone)]
pub struct Payload {
    issued_at: i64,
    expires_at: i64,
    extensions: Object,
}

impl Payload {
    /// Build a payload from decoded JSON text
    pub(crate) fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: Value =
            json::from_str(text).map_err(|e| DecodeError::encoding(Segment::Payload, e))?;
        let Value::Object(mut fields) = value else {
            return Err(DecodeError::InvalidPayloadSchema(
                "payload is not a JSON object".to_string(),
            ));
        };

        let issued_at = numeric_date(fields.remove("iat"), "iat")?;
        let expires_at = numeric_date(fields.remove("exp"), "exp")?;

        Ok(Self {
            issued_at,
            expires_at,
            extensions: fields,
        })
    }

    /// Issued-at time (`iat`)
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Expiration time (`exp`)
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// All claims other than `iat` and `exp`
    pub fn extensions(&self) -> &Object {
        &self.extensions
    }

    /// Look up a single claim by name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// Look up a string claim
    pub fn claim_str(&self, name: &str) -> Option<&str> {
        match self.claim(name)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Deserialize the whole claims set into a caller-defined shape
    ///
    /// `iat` and `exp` are included under their registered names, so the
    /// target type may declare them as well.
    pub fn claims<T: Deserialize>(&self) -> Result<T, miniserde::Error> {
        let mut object = self.extensions.clone();
        object.insert("iat".to_string(), Value::Number(Number::I64(self.issued_at)));
        object.insert("exp".to_string(), Value::Number(Number::I64(self.expires_at)));
        json::from_str(&json::to_string(&object))
    }
}

/// Read a NumericDate claim
///
/// Fractional seconds are truncated towards negative infinity.
fn numeric_date(value: Option<Value>, name: &str) -> Result<i64, DecodeError> {
    let number = match value {
        Some(Value::Number(number)) => number,
        Some(_) => {
            return Err(DecodeError::InvalidPayloadSchema(format!(
                "'{name}' must be a number"
            )))
        }
        None => {
            return Err(DecodeError::InvalidPayloadSchema(format!(
                "missing required attribute '{name}'"
            )))
        }
    };

    let out_of_range =
        || DecodeError::InvalidPayloadSchema(format!("'{name}' is out of range"));

    match number {
        Number::U64(n) => i64::try_from(n).map_err(|_| out_of_range()),
        Number::I64(n) => Ok(n),
        Number::F64(n) => {
            let floored = n.floor();
            if floored.is_finite() && floored >= i64::MIN as f64 && floored < i64::MAX as f64 {
                Ok(floored as i64)
            } else {
                Err(out_of_range())
            }
        }
    }
}
