//! Location records returned by the location-search endpoint, plus the
//! small value types that drive a query.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream identifier for a physical place.
///
/// The service has returned ids both as JSON numbers and as strings. Both
/// forms are accepted; the record itself keeps whichever form arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExternalId {
    Numeric(u64),
    Text(String),
}

impl ExternalId {
    /// Reads an id from a JSON value. Non-negative integers become
    /// [`ExternalId::Numeric`]; strings and other numbers become
    /// [`ExternalId::Text`]. Anything else is not an id.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(
                n.as_u64()
                    .map_or_else(|| ExternalId::Text(n.to_string()), ExternalId::Numeric),
            ),
            Value::String(s) => Some(ExternalId::Text(s.clone())),
            _ => None,
        }
    }

    /// Textual form used as the deduplication key, so `123` and `"123"`
    /// identify the same place.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalId::Numeric(id) => write!(f, "{id}"),
            ExternalId::Text(id) => f.write_str(id),
        }
    }
}

/// A single discovered place, kept exactly as the upstream service sent it.
///
/// Fields are read through the accessors below: a field of an unexpected type
/// reads as absent but stays in the record, explicit nulls included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationRecord(Map<String, Value>);

impl LocationRecord {
    /// Wraps a JSON object. Returns `None` for any other JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn external_id(&self) -> Option<ExternalId> {
        self.get("external_id").and_then(ExternalId::from_value)
    }

    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.get("lat").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn lng(&self) -> Option<f64> {
        self.get("lng").and_then(Value::as_f64)
    }

    /// Field rendered as plain text: strings without quotes, other values as
    /// JSON, absent or null as `None`.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// `(lng, lat)` when both coordinates are numeric.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lng()?, self.lat()?))
    }
}

impl From<Map<String, Value>> for LocationRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One coordinate pair to query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    pub lat: f64,
    pub lng: f64,
}

impl QueryPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Opaque cookie header sent with every location query.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    /// Wraps a full cookie header value, e.g. `sessionid=...; csrftoken=...`.
    pub fn new(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    /// Builds the cookie header from a bare `sessionid` value.
    #[must_use]
    pub fn from_session_id(session_id: &str) -> Self {
        Self(format!("sessionid={session_id}"))
    }

    #[must_use]
    pub fn cookie_header(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials([redacted])")
    }
}
