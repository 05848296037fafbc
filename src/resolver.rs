//! Property-path resolution against a context.
//!
//! Segments are walked left to right. `Name` segments perform a direct key
//! lookup on the current value; `Computed` segments first evaluate their
//! nested operand (recursively, itself suspension-capable) to obtain a key.
//! Any pause a lookup or a nested key evaluation publishes is re-published
//! through the returned computation, so the resolver never needs its own
//! driver.

use crate::ast::PathSegment;
use crate::context::Context;
use crate::evaluator::{self, EvalError};
use crate::step::Step;
use crate::value::Value;

/// Resolves a path against the context root.
///
/// A lookup on a non-container or a missing key yields `Value::Missing`
/// (unless the context is strict); an intermediate Missing short-circuits
/// the remaining segments to Missing without erroring.
pub fn resolve(segments: &[PathSegment], ctx: &Context) -> Result<Step, EvalError> {
    walk(ctx.root().clone(), segments.to_vec(), ctx.clone())
}

fn walk(current: Value, mut segments: Vec<PathSegment>, ctx: Context) -> Result<Step, EvalError> {
    if segments.is_empty() {
        return Ok(Step::done(current));
    }
    if current == Value::Missing {
        return Ok(Step::done(Value::Missing));
    }

    let segment = segments.remove(0);
    match segment {
        PathSegment::Name(name) => ctx
            .get(&current, &Value::String(name))?
            .and_then(move |next| walk(next, segments, ctx)),
        PathSegment::Computed(operand) => {
            let key_step = evaluator::eval_operand(&operand, &ctx)?;
            key_step.and_then(move |key| {
                ctx.get(&current, &key)?
                    .and_then(move |next| walk(next, segments, ctx))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operand;
    use crate::step::drive_blocking;
    use std::collections::HashMap;

    fn nested_ctx() -> Context {
        let mut inner = HashMap::new();
        inner.insert("name".to_string(), Value::String("Alice".to_string()));
        let mut root = HashMap::new();
        root.insert("user".to_string(), Value::Object(inner));
        Context::new(Value::Object(root))
    }

    #[test]
    fn test_name_segments() {
        let ctx = nested_ctx();
        let path = vec![
            PathSegment::Name("user".to_string()),
            PathSegment::Name("name".to_string()),
        ];
        let value = drive_blocking(resolve(&path, &ctx).unwrap()).unwrap();
        assert_eq!(value, Value::String("Alice".to_string()));
    }

    #[test]
    fn test_intermediate_missing_short_circuits() {
        let ctx = nested_ctx();
        let path = vec![
            PathSegment::Name("ghost".to_string()),
            PathSegment::Name("deeper".to_string()),
            PathSegment::Name("still".to_string()),
        ];
        let value = drive_blocking(resolve(&path, &ctx).unwrap()).unwrap();
        assert_eq!(value, Value::Missing);
    }

    #[test]
    fn test_computed_segment_literal_key() {
        let ctx = nested_ctx();
        let path = vec![
            PathSegment::Name("user".to_string()),
            PathSegment::Computed(Box::new(Operand::String("name".to_string()))),
        ];
        let value = drive_blocking(resolve(&path, &ctx).unwrap()).unwrap();
        assert_eq!(value, Value::String("Alice".to_string()));
    }
}
