use std::collections::HashMap;

use rust_decimal::{Decimal, prelude::FromPrimitive};

/// A runtime value in the Saffron template language.
///
/// This type represents all values expressions can produce, with a
/// distinction between integers and floats, plus the `Missing` sentinel used
/// for absent context keys.
///
/// # Missing
///
/// `Missing` is what a property lookup yields when the key does not exist or
/// the current value is not a container. It is falsy, equal only to itself,
/// and renders as the empty string. It is a value, not an error: lenient
/// templates keep evaluating through it.
///
/// # Examples
///
/// ```
/// use saffron_lang::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let missing = Value::Missing;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The "no such key" sentinel (also what `nil`/`null` literals produce)
    Missing,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),
}

impl Value {
    /// Boolean projection used for every condition test.
    ///
    /// Only `false` and `Missing` are falsy. Zero, the empty string, and the
    /// empty array are all truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Missing | Value::Boolean(false))
    }

    /// Exact decimal view of a numeric value, for cross-representation
    /// comparison. `None` for non-numbers and non-finite floats.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Decimal::from_i64(*n),
            Value::Float(n) => Decimal::from_f64(*n),
            _ => None,
        }
    }

    /// Output-stream form of the value.
    ///
    /// Missing renders as nothing, arrays concatenate their rendered
    /// elements, objects render as JSON.
    pub fn render(&self) -> String {
        match self {
            Value::Missing => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(arr) => arr.iter().map(Value::render).collect(),
            Value::Object(_) => crate::output::to_json(self),
        }
    }

    /// Human-readable type name, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
