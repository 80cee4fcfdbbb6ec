//! Renderable value tree.
//!
//! Parsed JSON is converted once into this tagged variant so the renderers
//! recurse structurally instead of inspecting dynamic types.
//!
//! Example: {"codes": [1, null]}  =>
//!   Mapping([("codes", Sequence([Scalar(Number(1)), Null]))])

use serde_json::{Number, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Renderable>),
    /// Entries keep the order they had in the source object.
    Mapping(Vec<(String, Renderable)>),
}

/// A leaf value. Renders through `Display`; keeps its JSON type for output.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Renderable {
    /// Single-entry mapping, used for error cards.
    pub fn entry(key: &str, value: Renderable) -> Self {
        Renderable::Mapping(vec![(key.to_string(), value)])
    }

    pub fn scalar(text: impl Into<String>) -> Self {
        Renderable::Scalar(Scalar::Text(text.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Renderable::Scalar(Scalar::Bool(b))
    }

    /// Back to JSON for machine-readable output.
    pub fn to_json(&self) -> Value {
        match self {
            Renderable::Null => Value::Null,
            Renderable::Scalar(Scalar::Text(s)) => Value::String(s.clone()),
            Renderable::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            Renderable::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Renderable::Sequence(items) => {
                Value::Array(items.iter().map(Renderable::to_json).collect())
            }
            Renderable::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for Renderable {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Renderable::Null,
            Value::Bool(b) => Renderable::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Renderable::Scalar(Scalar::Number(n.clone())),
            Value::String(s) => Renderable::Scalar(Scalar::Text(s.clone())),
            Value::Array(items) => {
                Renderable::Sequence(items.iter().map(Renderable::from).collect())
            }
            Value::Object(map) => Renderable::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Renderable::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Renderable {
    fn from(value: Value) -> Self {
        Renderable::from(&value)
    }
}

/// `None` is the absent value and renders like `null`.
impl From<Option<Value>> for Renderable {
    fn from(value: Option<Value>) -> Self {
        value.map(Renderable::from).unwrap_or(Renderable::Null)
    }
}
