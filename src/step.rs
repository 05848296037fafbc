//! Suspension-capable computations and the two drivers that run them.
//!
//! Every evaluation step in the engine — expression folds, property lookups,
//! filter and tag invocations — is expressed as a [`Step`]: a computation
//! that is either finished or paused on a pending operand with a
//! continuation to resume once that operand realizes. One evaluation
//! algorithm then runs under two execution disciplines:
//!
//! - [`drive_blocking`] steps the computation on the current thread and
//!   refuses to wait: a pause whose operand is not already realized is an
//!   [`UnresolvedDeferredWork`](crate::evaluator::EvalError::UnresolvedDeferredWork)
//!   error.
//! - [`drive_deferred`] awaits each pending operand before resuming and can
//!   therefore absorb deferred getters, remote filters, and file lookups.
//!
//! Both drivers execute the identical step sequence; for a computation that
//! never suspends on deferred work they produce the identical value.
//!
//! Nested computations do not need their own driver: [`Step::and_then`]
//! re-publishes an inner computation's pauses as pauses of the outer one, so
//! a single driver at the call boundary suffices however deep the
//! evaluation recurses.

use std::future::Future;
use std::pin::Pin;

use crate::evaluator::EvalError;
use crate::value::Value;

/// Host-deferred work producing a value later (a deferred getter, a remote
/// filter, a file read).
pub type DeferredValue = Pin<Box<dyn Future<Output = Result<Value, EvalError>> + Send>>;

/// A continuation resuming a paused computation with a realized operand, or
/// propagating the failure that realization produced.
pub type Resume = Box<dyn FnOnce(Result<Value, EvalError>) -> Result<Step, EvalError> + Send>;

/// A pending operand published by a paused computation.
pub enum Pending {
    /// Already realized at the moment of the pause. Both drivers resume
    /// immediately.
    Ready(Result<Value, EvalError>),

    /// Not yet realized. Only the deferred driver can wait for it.
    Deferred(DeferredValue),
}

impl Pending {
    /// A pending operand realized with `value`.
    pub fn ready(value: Value) -> Self {
        Pending::Ready(Ok(value))
    }

    /// A pending operand whose realization already failed.
    pub fn failed(error: EvalError) -> Self {
        Pending::Ready(Err(error))
    }

    /// A pending operand backed by host-deferred work.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        Pending::Deferred(Box::pin(future))
    }
}

/// A suspension-capable computation: finished, or paused on a pending
/// operand.
///
/// A `Step` is owned solely by whichever driver (or enclosing computation)
/// is currently stepping it.
pub enum Step {
    /// The computation completed with a value.
    Done(Value),

    /// The computation paused. The driver realizes the pending operand and
    /// resumes with the result.
    Pending(Pending, Resume),
}

impl Step {
    /// A computation that is already complete.
    pub fn done(value: Value) -> Step {
        Step::Done(value)
    }

    /// A computation that pauses once on `pending` and completes with
    /// whatever it realizes to.
    pub fn suspend(pending: Pending) -> Step {
        Step::Pending(pending, Box::new(|realized| Ok(Step::Done(realized?))))
    }

    /// Sequences `then` after this computation.
    ///
    /// If this computation is paused, the pause is re-published unchanged
    /// and `then` runs after the eventual resume — this is what lets a
    /// nested computation ride the outer computation's driver. Failures
    /// short-circuit past `then` to the driver boundary.
    pub fn and_then<F>(self, then: F) -> Result<Step, EvalError>
    where
        F: FnOnce(Value) -> Result<Step, EvalError> + Send + 'static,
    {
        match self {
            Step::Done(value) => then(value),
            Step::Pending(pending, resume) => Ok(Step::Pending(
                pending,
                Box::new(move |realized| resume(realized)?.and_then(then)),
            )),
        }
    }
}

/// Drives a computation to completion on the current thread.
///
/// Fails with [`EvalError::UnresolvedDeferredWork`] if a pause is reached
/// whose pending operand is not already realized at the moment of the pause.
pub fn drive_blocking(mut step: Step) -> Result<Value, EvalError> {
    loop {
        match step {
            Step::Done(value) => return Ok(value),
            Step::Pending(Pending::Ready(realized), resume) => {
                step = resume(realized)?;
            }
            Step::Pending(Pending::Deferred(_), _) => {
                return Err(EvalError::UnresolvedDeferredWork);
            }
        }
    }
}

/// Drives a computation to completion, waiting for each pending operand to
/// realize before resuming. Never produces `UnresolvedDeferredWork`.
pub async fn drive_deferred(mut step: Step) -> Result<Value, EvalError> {
    loop {
        match step {
            Step::Done(value) => return Ok(value),
            Step::Pending(Pending::Ready(realized), resume) => {
                step = resume(realized)?;
            }
            Step::Pending(Pending::Deferred(future), resume) => {
                let realized = future.await;
                step = resume(realized)?;
            }
        }
    }
}
