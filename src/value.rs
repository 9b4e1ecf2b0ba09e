use indexmap::IndexMap;

/// Insertion-ordered mapping used for objects.
pub type Map = IndexMap<String, Value>;

/// Arguments attached to a single operation, in the order they were given.
pub type Arguments = IndexMap<String, Value>;

/// A value passed as an operation argument or received in an engine response.
///
/// Objects keep their keys in insertion order. Argument order is part of the
/// rendered query, so a sorted or hashed map would change the output.
///
/// # Examples
///
/// ```
/// use calltree::Value;
///
/// let address = Value::from("alpine");
/// let args = Value::from(vec!["apk", "add", "curl"]);
///
/// assert_eq!(address, Value::String("alpine".to_string()));
/// assert_eq!(args.type_name(), "list");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// null
    Null,

    /// true/false
    Boolean(bool),

    /// Integer number (kept apart from floats so `2` never renders as `2.0`)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered list of values
    List(Vec<Value>),

    /// Nested mapping with ordered keys
    Object(Map),
}

impl Value {
    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}
