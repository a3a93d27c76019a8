//! Data models for the CREOSON envelope contract.
//!
//! CREOSON requests and responses are shallow JSON objects with
//! loosely-typed values. `Value` is the tagged union covering every value
//! kind the bridge exchanges, and `Params` is the insertion-ordered map
//! both envelopes are built from.

use std::fmt;

/// A single JSON value as exchanged with the CREOSON bridge.
///
/// Arrays are deliberately unsupported: no envelope field in the invoked
/// command set is list-valued, and the codec rejects nothing, so callers
/// must simply not construct them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Nested object, e.g. the response `status` field or the `data` map.
    Object(Params),
}

impl Value {
    /// Returns the boolean content, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string content, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested map, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Params> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Textual form of a value. Strings render without quotes; objects render
/// as their JSON encoding. Used where the bridge contract coerces a field
/// to text (session ids, error messages).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Object(map) => f.write_str(&crate::bridge::codec::encode(map)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Params> for Value {
    fn from(map: Params) -> Self {
        Value::Object(map)
    }
}

/// A flat key/value map that preserves insertion order.
///
/// Envelope fields must serialize in the order they were inserted
/// (`command`, `function`, `sessionId`, `data`), so this is backed by a
/// vector rather than a hash map. The maps involved never exceed a handful
/// of entries; linear lookup is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, Value)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key/value pair. Re-inserting an existing key replaces its
    /// value in place, keeping the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }
}

/// Builds a `Params` map from `key => value` pairs, preserving order.
///
/// ```ignore
/// let data = params! {
///     "dirname" => "C:\\work",
///     "display" => true,
/// };
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::models::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::models::Params::new();
        $(map.insert($key, $value);)+
        map
    }};
}
