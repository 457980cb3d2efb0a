//! Ordered query string parameters
//!
//! Parameters are encoded in the order the caller adds them. Only scalar
//! values are accepted; arrays, objects and nulls are rejected rather than
//! stringified.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{RestError, RestResult};

/// A scalar query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Decimal number
    Decimal(Decimal),
    /// Boolean (`true` / `false`)
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(value: $t) -> Self {
                Self::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(value: $t) -> Self {
                Self::UInt(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for QueryValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl TryFrom<&Value> for QueryValue {
    type Error = RestError;

    fn try_from(value: &Value) -> RestResult<Self> {
        match value {
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => n
                .as_u64()
                .map(Self::UInt)
                .or_else(|| n.as_i64().map(Self::Int))
                .or_else(|| n.as_f64().map(Self::Float))
                .ok_or_else(|| RestError::InvalidParameter(format!("unsupported number {}", n))),
            Value::Null => Err(RestError::InvalidParameter(
                "null is not a valid query value".to_string(),
            )),
            Value::Array(_) | Value::Object(_) => Err(RestError::InvalidParameter(format!(
                "query values must be scalars, got {}",
                value
            ))),
        }
    }
}

/// Insertion-ordered query parameters
///
/// ```
/// use gemini_rest::QueryParams;
///
/// let query = QueryParams::new().with("limit_bids", 5).with("limit_asks", 5);
/// assert_eq!(query.encode().unwrap(), "limit_bids=5&limit_asks=5");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter if `value` is present
    pub fn with_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Build from a JSON object, keeping its key order
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] if any value is not a scalar.
    pub fn from_json(options: &Map<String, Value>) -> RestResult<Self> {
        let pairs = options
            .iter()
            .map(|(key, value)| {
                QueryValue::try_from(value)
                    .map(|v| (key.clone(), v))
                    .map_err(|e| match e {
                        RestError::InvalidParameter(msg) => {
                            RestError::InvalidParameter(format!("{}: {}", key, msg))
                        }
                        other => other,
                    })
            })
            .collect::<RestResult<Vec<_>>>()?;

        Ok(Self { pairs })
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no parameters were added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Percent-encode as `key=value&key=value`
    ///
    /// # Errors
    /// [`RestError::InvalidParameter`] for a NaN or infinite float.
    pub fn encode(&self) -> RestResult<String> {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| match value {
                QueryValue::Float(n) if !n.is_finite() => Err(RestError::InvalidParameter(format!(
                    "{}: non-finite number {}",
                    key, n
                ))),
                _ => Ok((key.as_str(), value.to_string())),
            })
            .collect::<RestResult<Vec<(&str, String)>>>()?;

        serde_urlencoded::to_string(&pairs).map_err(|e| RestError::InvalidParameter(e.to_string()))
    }

    /// Append the encoded parameters to `path`
    pub fn append_to(&self, path: &str) -> RestResult<String> {
        if self.is_empty() {
            return Ok(path.to_string());
        }
        Ok(format!("{}?{}", path, self.encode()?))
    }
}
