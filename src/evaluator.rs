//! Expression evaluation: the logical fold, comparisons, and ranges.
//!
//! Evaluation produces a [`Step`] rather than a value, so any operand whose
//! resolution requires deferred work (a context lookup behind a deferred
//! getter, a deferred filter) can pause the whole expression and resume
//! under whichever driver the caller chose.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;

use crate::ast::{ChainSlot, CompareOp, LogicOp, LogicalChain, Operand};
use crate::context::Context;
use crate::resolver;
use crate::step::Step;
use crate::value::Value;

/// Errors that can occur while evaluating an expression or rendering a
/// template.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Evaluation attempted with no context at all
    ContextNotDefined,

    /// The blocking driver hit a pause whose operand was not yet realized
    UnresolvedDeferredWork,

    /// Type mismatch or invalid operation for the given types
    TypeError(String),

    /// A strict context reported a missing key as a failure
    UndefinedVariable(String),

    /// Output markup named a filter the engine does not know
    UnknownFilter(String),

    /// Tag markup named a tag the engine does not know
    UnknownTag(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::ContextNotDefined => write!(f, "context not defined"),
            EvalError::UnresolvedDeferredWork => write!(
                f,
                "unresolved deferred work: a pending operand was not realized (use the deferred driver)"
            ),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
            EvalError::UndefinedVariable(name) => write!(f, "Undefined variable: {}", name),
            EvalError::UnknownFilter(name) => write!(f, "Unknown filter: {}", name),
            EvalError::UnknownTag(name) => write!(f, "Unknown tag: {}", name),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates a logical chain against a context.
///
/// The fold is right-to-left with value precedence (not the usual
/// and-before-or precedence): the rightmost slot seeds the accumulator and
/// each `(slot, op)` pair to its left folds in as
///
/// ```text
/// and: acc = truthy(l) ? acc : l
/// or:  acc = truthy(l) ? l : acc
/// ```
///
/// Every slot is evaluated unconditionally, even when the fold discards its
/// contribution — operand evaluation may have externally observable effects.
/// A chain with at least one logical operator casts its final accumulator to
/// a boolean; a single-slot chain returns the slot's raw value unmodified.
pub fn evaluate(chain: &LogicalChain, ctx: &Context) -> Result<Step, EvalError> {
    let single = chain.is_single();

    // split into the rightmost slot and the (slot, op) pairs left of it
    let mut lefts: Vec<ChainSlot> = Vec::with_capacity(chain.rest.len());
    let mut ops: Vec<LogicOp> = Vec::with_capacity(chain.rest.len());
    let mut rightmost = &chain.first;
    for (op, slot) in &chain.rest {
        lefts.push(rightmost.clone());
        ops.push(*op);
        rightmost = slot;
    }

    let fold_ctx = ctx.clone();
    let step = eval_slot(rightmost, ctx)?
        .and_then(move |acc| fold_left(lefts, ops, fold_ctx, acc))?;

    if single {
        Ok(step)
    } else {
        step.and_then(|acc| Ok(Step::done(Value::Boolean(acc.is_truthy()))))
    }
}

/// Walks leftward over the remaining `(slot, op)` pairs, folding each
/// evaluated slot value into the accumulator.
fn fold_left(
    mut lefts: Vec<ChainSlot>,
    mut ops: Vec<LogicOp>,
    ctx: Context,
    acc: Value,
) -> Result<Step, EvalError> {
    let (Some(slot), Some(op)) = (lefts.pop(), ops.pop()) else {
        return Ok(Step::done(acc));
    };

    eval_slot(&slot, &ctx)?.and_then(move |left| {
        let acc = match op {
            LogicOp::And => {
                if left.is_truthy() {
                    acc
                } else {
                    left
                }
            }
            LogicOp::Or => {
                if left.is_truthy() {
                    left
                } else {
                    acc
                }
            }
        };
        fold_left(lefts, ops, ctx, acc)
    })
}

fn eval_slot(slot: &ChainSlot, ctx: &Context) -> Result<Step, EvalError> {
    match slot {
        ChainSlot::Operand(operand) => eval_operand(operand, ctx),
        ChainSlot::Comparison(cmp) => {
            let op = cmp.op;
            let right = cmp.right.clone();
            let right_ctx = ctx.clone();
            eval_operand(&cmp.left, ctx)?.and_then(move |left| {
                eval_operand(&right, &right_ctx)?
                    .and_then(move |right| Ok(Step::done(apply_compare(op, &left, &right)?)))
            })
        }
    }
}

/// Evaluates a single operand to a suspension-capable computation.
pub fn eval_operand(operand: &Operand, ctx: &Context) -> Result<Step, EvalError> {
    match operand {
        Operand::Integer(n) => Ok(Step::done(Value::Integer(*n))),
        Operand::Float(n) => Ok(Step::done(Value::Float(*n))),
        Operand::String(s) => Ok(Step::done(Value::String(s.clone()))),
        Operand::Boolean(b) => Ok(Step::done(Value::Boolean(*b))),
        Operand::Nil => Ok(Step::done(Value::Missing)),
        Operand::Path(segments) => resolver::resolve(segments, ctx),
        Operand::Range { from, to } => {
            let to = (**to).clone();
            let to_ctx = ctx.clone();
            eval_operand(from, ctx)?.and_then(move |from| {
                eval_operand(&to, &to_ctx)?.and_then(move |to| {
                    let from = range_bound(&from)?;
                    let to = range_bound(&to)?;
                    let items = (from..=to).map(Value::Integer).collect();
                    Ok(Step::done(Value::Array(items)))
                })
            })
        }
    }
}

fn apply_compare(op: CompareOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let result = match op {
        CompareOp::Equal => values_equal(left, right),
        CompareOp::NotEqual => !values_equal(left, right),
        CompareOp::Contains => contains(left, right),
        ordering_op => {
            let Some(order) = compare_order(left, right) else {
                return Err(EvalError::TypeError(format!(
                    "Cannot compare {} with {}",
                    left.type_name(),
                    right.type_name()
                )));
            };
            match ordering_op {
                CompareOp::LessThan => order == Ordering::Less,
                CompareOp::LessEqual => order != Ordering::Greater,
                CompareOp::GreaterThan => order == Ordering::Greater,
                CompareOp::GreaterEqual => order != Ordering::Less,
                _ => unreachable!(),
            }
        }
    };
    Ok(Value::Boolean(result))
}

/// Type-aware equality: numbers compare numerically across representations,
/// Missing equals only Missing, cross-type equality is false rather than an
/// error.
fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (left.as_decimal(), right.as_decimal()) {
        return a == b;
    }
    match (left, right) {
        (Value::Missing, Value::Missing) => true,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

/// Ordering for `<`, `<=`, `>`, `>=`: numeric across representations,
/// lexicographic for string pairs, undefined otherwise.
fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (left.as_decimal(), right.as_decimal()) {
        return Some(a.cmp(&b));
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Permissive `contains`: case-sensitive substring for a string left
/// operand, membership for a sequence left operand, `false` for every other
/// shape — including Missing on either side. Never an error.
fn contains(left: &Value, right: &Value) -> bool {
    if *left == Value::Missing || *right == Value::Missing {
        return false;
    }
    match left {
        Value::String(haystack) => haystack.contains(&right.render()),
        Value::Array(items) => items.iter().any(|item| values_equal(item, right)),
        _ => false,
    }
}

/// Range bounds coerce to integers; anything non-coercible is a hard error,
/// not Missing. Float bounds truncate toward zero, so `(2.7..4)` starts
/// at 2.
fn range_bound(value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Float(_) => value
            .as_decimal()
            .and_then(|d| d.trunc().to_i64())
            .ok_or_else(|| EvalError::TypeError("Invalid float range bound".to_string())),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| EvalError::TypeError(format!("Invalid range bound '{}'", s))),
        other => Err(EvalError::TypeError(format!(
            "Invalid range bound of type {}",
            other.type_name()
        ))),
    }
}
