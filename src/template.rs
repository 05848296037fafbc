//! The template layer: scanning markup into nodes and rendering them.
//!
//! A template is literal text interleaved with output markup
//! (`{{ expr | filter }}`) and tag markup (`{% name args %}`). The tag and
//! filter catalogs are host-provided through the engine's registries; this
//! module only defines the node structure and the rendering fold.
//!
//! Rendering is itself a suspension-capable computation: a deferred context
//! lookup or a deferred filter inside any node pauses the whole render, and
//! the caller's single driver (blocking or deferred) carries it through.

use regex::Regex;

use crate::ast::{FilterCall, FilteredExpression, Operand};
use crate::context::Context;
use crate::engine::{Engine, Filter};
use crate::evaluator::{self, EvalError};
use crate::lexer::SyntaxError;
use crate::step::Step;
use crate::value::Value;
use std::sync::Arc;

/// One compiled segment of a template.
#[derive(Debug, Clone)]
pub enum Node {
    /// Literal text, emitted verbatim
    Text(String),

    /// Output markup: an expression chain plus its filter calls
    Output(FilteredExpression),

    /// Tag markup, dispatched to the engine's tag registry at render time
    Tag { name: String, markup: String },
}

/// A compiled template, ready to render against any context.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Compiles template text into nodes.
    ///
    /// Tag names are checked against the engine's registry here, so an
    /// unknown tag is a parse-time `SyntaxError`, not a render-time surprise.
    pub fn parse(text: &str, engine: &Engine) -> Result<Template, SyntaxError> {
        let markup = Regex::new(r"(?s)\{\{(.*?)\}\}|\{%(.*?)%\}")
            .expect("markup pattern is valid");

        let mut nodes = Vec::new();
        let mut last_end = 0;

        for found in markup.captures_iter(text) {
            let whole = found.get(0).expect("capture 0 always present");
            if whole.start() > last_end {
                nodes.push(Node::Text(text[last_end..whole.start()].to_string()));
            }
            last_end = whole.end();

            if let Some(expr) = found.get(1) {
                let parsed = crate::parser::parse_filtered_expression(expr.as_str().trim())
                    .map_err(|e| SyntaxError::new(e.message, whole.start() + e.position))?;
                nodes.push(Node::Output(parsed));
            } else if let Some(tag) = found.get(2) {
                let inner = tag.as_str().trim();
                let (name, markup) = match inner.split_once(char::is_whitespace) {
                    Some((name, rest)) => (name.to_string(), rest.trim().to_string()),
                    None => (inner.to_string(), String::new()),
                };
                if name.is_empty() {
                    return Err(SyntaxError::new("Empty tag markup", whole.start()));
                }
                if engine.tag(&name).is_none() {
                    return Err(SyntaxError::new(
                        format!("Unknown tag '{}'", name),
                        whole.start(),
                    ));
                }
                nodes.push(Node::Tag { name, markup });
            }
        }

        if last_end < text.len() {
            nodes.push(Node::Text(text[last_end..].to_string()));
        }

        Ok(Template { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Builds the rendering computation for this template. The result is a
    /// `Step` producing the rendered text as a `Value::String`.
    pub(crate) fn render_step(&self, ctx: &Context, engine: &Engine) -> Result<Step, EvalError> {
        let mut rest = self.nodes.clone();
        rest.reverse();
        render_nodes(rest, String::new(), ctx.clone(), engine.clone())
    }
}

/// Folds the remaining nodes (reversed, so `pop` yields the next one) into
/// the output buffer.
fn render_nodes(
    mut rest: Vec<Node>,
    mut out: String,
    ctx: Context,
    engine: Engine,
) -> Result<Step, EvalError> {
    let Some(node) = rest.pop() else {
        return Ok(Step::done(Value::String(out)));
    };

    match node {
        Node::Text(text) => {
            out.push_str(&text);
            render_nodes(rest, out, ctx, engine)
        }
        Node::Output(expr) => {
            eval_filtered(&expr, &ctx, &engine)?.and_then(move |value| {
                out.push_str(&value.render());
                render_nodes(rest, out, ctx, engine)
            })
        }
        Node::Tag { name, markup } => {
            let tag = engine
                .tag(&name)
                .cloned()
                .ok_or(EvalError::UnknownTag(name))?;
            tag.render(&markup, &ctx, &engine)?.and_then(move |value| {
                out.push_str(&value.render());
                render_nodes(rest, out, ctx, engine)
            })
        }
    }
}

/// Evaluates output markup: the chain first, then each filter call in
/// order, every stage riding the same suspension chain.
pub(crate) fn eval_filtered(
    expr: &FilteredExpression,
    ctx: &Context,
    engine: &Engine,
) -> Result<Step, EvalError> {
    let step = evaluator::evaluate(&expr.chain, ctx)?;
    let mut filters = expr.filters.clone();
    filters.reverse();
    apply_filters(step, filters, ctx.clone(), engine.clone())
}

fn apply_filters(
    step: Step,
    mut rest: Vec<FilterCall>,
    ctx: Context,
    engine: Engine,
) -> Result<Step, EvalError> {
    let Some(call) = rest.pop() else {
        return Ok(step);
    };

    let next = step.and_then(move |input| {
        let filter = engine
            .filter(&call.name)
            .cloned()
            .ok_or(EvalError::UnknownFilter(call.name))?;
        let mut args = call.args;
        args.reverse();
        let applied = apply_one(input, filter, args, Vec::new(), ctx.clone())?;
        apply_filters(applied, rest, ctx, engine)
    })?;
    Ok(next)
}

/// Evaluates a filter's argument operands one at a time, then applies it.
fn apply_one(
    input: Value,
    filter: Arc<dyn Filter>,
    mut args_rest: Vec<Operand>,
    mut args_done: Vec<Value>,
    ctx: Context,
) -> Result<Step, EvalError> {
    let Some(arg) = args_rest.pop() else {
        return filter.apply(input, &args_done);
    };

    evaluator::eval_operand(&arg, &ctx)?.and_then(move |value| {
        args_done.push(value);
        apply_one(input, filter, args_rest, args_done, ctx)
    })
}
