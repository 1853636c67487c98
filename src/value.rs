use std::collections::BTreeMap;

/// A record value: one node of a nested key/value document.
///
/// This type represents all JSON types with a distinction between
/// integers and floats (unlike standard JSON which only has "number").
///
/// # Examples
///
/// ```
/// use sift_lang::Value;
/// use std::collections::BTreeMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = BTreeMap::new();
/// obj.insert("seed".to_string(), Value::Integer(0));
/// let record = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Builds an object from key/value pairs.
    pub fn object<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Borrowed view of a scalar, shared by record values and literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(&'a str),
}

/// A nested record the evaluator can walk.
///
/// Implemented for [`Value`] and for `serde_json::Value`, so JSON documents
/// can be filtered without converting them first.
pub trait Document {
    /// Looks up a direct child by key. Non-mappings have no children.
    fn get_field(&self, key: &str) -> Option<&Self>;

    /// Scalar view of this node; `None` for null, lists and mappings.
    fn as_scalar(&self) -> Option<Scalar<'_>>;
}

impl Document for Value {
    fn get_field(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Value::Boolean(b) => Some(Scalar::Boolean(*b)),
            Value::Integer(n) => Some(Scalar::Integer(*n)),
            Value::Float(n) => Some(Scalar::Float(*n)),
            Value::String(s) => Some(Scalar::String(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl Document for serde_json::Value {
    fn get_field(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            serde_json::Value::Bool(b) => Some(Scalar::Boolean(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Integer(i)),
                None => n.as_f64().map(Scalar::Float),
            },
            serde_json::Value::String(s) => Some(Scalar::String(s)),
            _ => None,
        }
    }
}

/// Walks `segments` through nested mappings.
///
/// Returns `None` ("absent") when a key is missing or a non-mapping is hit
/// while segments remain.
pub fn resolve<'a, D, S>(record: &'a D, segments: &[S]) -> Option<&'a D>
where
    D: Document + ?Sized,
    S: AsRef<str>,
{
    let mut current = record;
    for segment in segments {
        current = current.get_field(segment.as_ref())?;
    }
    Some(current)
}
