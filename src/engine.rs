//! The engine facade: registries, parsing entry points, and the sync and
//! deferred evaluation/render APIs.
//!
//! Registries are scoped to the engine instance — there is no process-wide
//! state. Registration is a setup-time activity; during evaluation the
//! registries are read-only, which is what lets cloned engines ride inside
//! suspension continuations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::evaluator::{self, EvalError};
use crate::lexer::SyntaxError;
use crate::step::{drive_blocking, drive_deferred, Step};
use crate::template::Template;
use crate::value::Value;

/// A failure from an engine entry point: either the input did not parse or
/// its evaluation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Syntax(SyntaxError),
    Eval(EvalError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::Eval(e)
    }
}

/// A value transform applied in output markup (`{{ value | name: args }}`).
///
/// Filters return a suspension-capable computation, so a filter backed by
/// deferred work (a remote call, a file read) publishes a deferred pending
/// operand and renders correctly under the deferred driver.
pub trait Filter: Send + Sync {
    fn apply(&self, input: Value, args: &[Value]) -> Result<Step, EvalError>;
}

/// A tag directive renderer (`{% name markup %}`).
///
/// Tags receive their raw markup and the engine, so a tag may parse
/// sub-expressions with [`crate::parser::parse_expression`] and evaluate
/// them through the same suspension contract.
pub trait Tag: Send + Sync {
    fn render(&self, markup: &str, ctx: &Context, engine: &Engine) -> Result<Step, EvalError>;
}

/// The public face of the engine: owns the filter and tag registries and
/// wires parsing, evaluation, and the two drivers together.
#[derive(Clone, Default)]
pub struct Engine {
    filters: HashMap<String, Arc<dyn Filter>>,
    tags: HashMap<String, Arc<dyn Tag>>,
}

impl Engine {
    /// An engine with empty registries. The expression language works
    /// without any registration; filters and tags are host extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a filter under `name`. Setup-time only.
    pub fn register_filter(&mut self, name: &str, filter: impl Filter + 'static) {
        self.filters.insert(name.to_string(), Arc::new(filter));
    }

    /// Registers a tag under `name`. Setup-time only.
    pub fn register_tag(&mut self, name: &str, tag: impl Tag + 'static) {
        self.tags.insert(name.to_string(), Arc::new(tag));
    }

    pub(crate) fn filter(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.get(name)
    }

    pub(crate) fn tag(&self, name: &str) -> Option<&Arc<dyn Tag>> {
        self.tags.get(name)
    }

    /// Evaluates an expression synchronously.
    ///
    /// An absent context fails with `ContextNotDefined` before the
    /// expression text is even examined. A deferred pending operand fails
    /// with `UnresolvedDeferredWork`.
    pub fn eval_expression(&self, text: &str, ctx: Option<&Context>) -> Result<Value, Error> {
        let ctx = ctx.ok_or(EvalError::ContextNotDefined)?;
        let chain = crate::parser::parse_expression(text)?;
        let step = evaluator::evaluate(&chain, ctx)?;
        Ok(drive_blocking(step)?)
    }

    /// Evaluates an expression, waiting for any deferred pending operands.
    pub async fn eval_expression_deferred(
        &self,
        text: &str,
        ctx: Option<&Context>,
    ) -> Result<Value, Error> {
        let ctx = ctx.ok_or(EvalError::ContextNotDefined)?;
        let chain = crate::parser::parse_expression(text)?;
        let step = evaluator::evaluate(&chain, ctx)?;
        Ok(drive_deferred(step).await?)
    }

    /// Compiles template text against this engine's tag registry.
    pub fn parse_template(&self, text: &str) -> Result<Template, SyntaxError> {
        Template::parse(text, self)
    }

    /// Renders a compiled template synchronously.
    pub fn render(&self, template: &Template, ctx: Option<&Context>) -> Result<String, Error> {
        let ctx = ctx.ok_or(EvalError::ContextNotDefined)?;
        let step = template.render_step(ctx, self)?;
        Ok(drive_blocking(step)?.render())
    }

    /// Renders a compiled template, waiting for any deferred pending
    /// operands.
    pub async fn render_deferred(
        &self,
        template: &Template,
        ctx: Option<&Context>,
    ) -> Result<String, Error> {
        let ctx = ctx.ok_or(EvalError::ContextNotDefined)?;
        let step = template.render_step(ctx, self)?;
        Ok(drive_deferred(step).await?.render())
    }

    /// Parses and renders template text in one call.
    pub fn render_str(&self, text: &str, ctx: Option<&Context>) -> Result<String, Error> {
        // context check comes first: no context means no parsing either
        if ctx.is_none() {
            return Err(EvalError::ContextNotDefined.into());
        }
        let template = self.parse_template(text)?;
        self.render(&template, ctx)
    }
}
