//! The data context an evaluation reads from.
//!
//! The evaluator never touches host data directly: every lookup goes through
//! the context's [`ValueGetter`], which returns a suspension-capable
//! computation. A synchronous getter answers with `Step::Done`; a getter
//! backed by deferred work (a database, a file, a remote call) publishes a
//! deferred pending operand and the deferred driver waits for it.

use std::sync::Arc;

use crate::evaluator::EvalError;
use crate::step::Step;
use crate::value::Value;

/// Key lookup strategy for a context.
///
/// `get` asks one question: "get `key` from `current`, strict?". Absent keys
/// and lookups on non-containers yield `Value::Missing`; a strict getter may
/// upgrade Missing to a failure instead. The result is a [`Step`] so a
/// getter may defer.
pub trait ValueGetter: Send + Sync {
    fn get(&self, current: &Value, key: &Value, strict: bool) -> Result<Step, EvalError>;
}

/// The default synchronous getter: plain map/array lookup.
///
/// Key coercion follows the host data model: integer keys index arrays
/// (negative indices count from the end) and stringify against objects;
/// float and boolean keys stringify against objects. The conveniences
/// `size` (strings, arrays, objects), `first`, and `last` (arrays) resolve
/// when no real key shadows them.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapGetter;

impl MapGetter {
    fn lookup(current: &Value, key: &Value) -> Value {
        match (current, key) {
            (Value::Array(arr), Value::Integer(n)) => {
                let index = if *n < 0 {
                    // unsigned_abs: i64::MIN has no i64 negation
                    let back = n.unsigned_abs() as usize;
                    if back > arr.len() {
                        return Value::Missing;
                    }
                    arr.len() - back
                } else {
                    *n as usize
                };
                arr.get(index).cloned().unwrap_or(Value::Missing)
            }
            (Value::Array(arr), Value::String(k)) => match k.as_str() {
                "size" => Value::Integer(arr.len() as i64),
                "first" => arr.first().cloned().unwrap_or(Value::Missing),
                "last" => arr.last().cloned().unwrap_or(Value::Missing),
                _ => Value::Missing,
            },
            (Value::Object(map), key) => {
                let name = match key {
                    Value::String(k) => k.clone(),
                    Value::Integer(n) => n.to_string(),
                    Value::Float(n) => n.to_string(),
                    Value::Boolean(b) => b.to_string(),
                    _ => return Value::Missing,
                };
                match map.get(&name) {
                    Some(value) => value.clone(),
                    None if name == "size" => Value::Integer(map.len() as i64),
                    None => Value::Missing,
                }
            }
            (Value::String(s), Value::String(k)) if k == "size" => {
                Value::Integer(s.chars().count() as i64)
            }
            _ => Value::Missing,
        }
    }
}

impl ValueGetter for MapGetter {
    fn get(&self, current: &Value, key: &Value, strict: bool) -> Result<Step, EvalError> {
        let value = Self::lookup(current, key);
        if strict && value == Value::Missing {
            return Err(EvalError::UndefinedVariable(key.render()));
        }
        Ok(Step::done(value))
    }
}

/// A read-only view over a root mapping plus environment flags.
///
/// Created per render/evaluation call. Cloning is cheap: the root value and
/// the getter are shared, which lets suspension continuations carry the
/// context without copying host data.
#[derive(Clone)]
pub struct Context {
    root: Arc<Value>,
    getter: Arc<dyn ValueGetter>,
    strict: bool,
}

impl Context {
    /// A lenient context over `root` with direct map lookups.
    pub fn new(root: Value) -> Self {
        Context::with_getter(root, Arc::new(MapGetter))
    }

    /// A context using a custom lookup strategy (e.g. a deferred getter).
    pub fn with_getter(root: Value, getter: Arc<dyn ValueGetter>) -> Self {
        Context {
            root: Arc::new(root),
            getter,
            strict: false,
        }
    }

    /// Builds a context from a JSON object of variables.
    ///
    /// Fails if `json` is not an object: the root mapping is string-keyed by
    /// contract.
    pub fn from_json(json: serde_json::Value) -> Result<Self, EvalError> {
        let root = crate::output::from_json_value(json);
        match root {
            Value::Object(_) => Ok(Context::new(root)),
            other => Err(EvalError::TypeError(format!(
                "Context root must be an object, got {}",
                other.type_name()
            ))),
        }
    }

    /// Strict contexts upgrade Missing lookups into failures.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Looks up `key` on `current` through the configured getter.
    pub fn get(&self, current: &Value, key: &Value) -> Result<Step, EvalError> {
        self.getter.get(current, key, self.strict)
    }
}
