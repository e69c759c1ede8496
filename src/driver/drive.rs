//! The drive loop
//!
//! Owns one suspendable computation and steps it to completion: each
//! yield is normalized into a future and awaited, then the settlement is
//! fed back into the computation - the value through `step`, the error
//! through `step_err` so the computation can recover with its own local
//! logic. One drive settles exactly once.

use super::normalize::{invalid_yield, normalize, Normalized};
use crate::computation::{Computation, Resume, StepOutcome, Steps};
use crate::types::{FactoryFn, Settlement, Val, ValFuture};
use tracing::{debug, trace};

/// Drives one suspendable computation to completion
pub struct Driver {
    computation: Box<dyn Computation>,
}

impl Driver {
    pub fn new(computation: Box<dyn Computation>) -> Self {
        Driver { computation }
    }

    /// Step the computation until terminal.
    ///
    /// Every terminal outcome is a return from this function, so the
    /// settlement fires exactly once and the computation is never stepped
    /// again afterwards. An unclassifiable yield is terminal without
    /// re-entering the computation.
    pub async fn drive(mut self) -> Settlement {
        let mut resume = Resume::Value(Val::Null);

        loop {
            let outcome = match resume {
                Resume::Value(value) => self.computation.step(value),
                Resume::Error(err) => self.computation.step_err(err),
            };

            let yielded = match outcome {
                StepOutcome::Done(value) => {
                    debug!("computation finished");
                    return Ok(value);
                }
                StepOutcome::Throw(err) => {
                    debug!(code = %err.code, "computation raised");
                    return Err(err);
                }
                StepOutcome::Yield(yielded) => yielded,
            };

            trace!(yielded = ?yielded, "computation paused");

            let future = match normalize(yielded) {
                Normalized::Future(fut) => fut,
                Normalized::Invalid(value) => return Err(invalid_yield(&value)),
            };

            resume = match future.await {
                Ok(value) => Resume::Value(value),
                Err(err) => Resume::Error(err),
            };
        }
    }
}

/// What `run` accepts: a plain value, a computation, or a factory
pub enum RunTarget {
    /// Passed straight through as an immediate success
    Value(Val),
    /// Driven to completion
    Computation(Box<dyn Computation>),
    /// Invoked with no arguments, then driven
    Factory(FactoryFn),
}

impl From<Val> for RunTarget {
    fn from(value: Val) -> Self {
        RunTarget::Value(value)
    }
}

impl From<Steps> for RunTarget {
    fn from(steps: Steps) -> Self {
        RunTarget::Computation(Box::new(steps))
    }
}

impl From<Box<dyn Computation>> for RunTarget {
    fn from(computation: Box<dyn Computation>) -> Self {
        RunTarget::Computation(computation)
    }
}

impl From<FactoryFn> for RunTarget {
    fn from(factory: FactoryFn) -> Self {
        RunTarget::Factory(factory)
    }
}

/// Drive a computation to completion, or pass a plain value straight
/// through as an already-settled result.
pub async fn run(target: impl Into<RunTarget>) -> Settlement {
    match target.into() {
        RunTarget::Value(value) => Ok(value),
        RunTarget::Computation(computation) => Driver::new(computation).drive().await,
        RunTarget::Factory(factory) => Driver::new(factory()).drive().await,
    }
}

/// Invoke a positional-argument factory, then drive the computation it
/// produces.
pub async fn run_with<C, F>(factory: F, args: Vec<Val>) -> Settlement
where
    C: Computation + 'static,
    F: FnOnce(Vec<Val>) -> C,
{
    Driver::new(Box::new(factory(args))).drive().await
}

/// Turn a computation factory into a reusable driving function.
///
/// Each call invokes the factory with that call's arguments and drives a
/// fresh computation, so the returned function can be called any number
/// of times.
pub fn wrap<C, F>(factory: F) -> impl Fn(Vec<Val>) -> ValFuture
where
    C: Computation + 'static,
    F: Fn(Vec<Val>) -> C + 'static,
{
    move |args| {
        let computation: Box<dyn Computation> = Box::new(factory(args));
        Box::pin(Driver::new(computation).drive())
    }
}
