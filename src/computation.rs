//! The computation protocol
//!
//! A suspendable computation pauses at yield points and is resumed from
//! outside with either the value its yielded future produced or the error
//! it rejected with. `Steps` builds such a computation from an ordered
//! queue of continuation closures: the explicit state-machine form of a
//! coroutine, with no native suspend syntax required.

use crate::errors::ErrorInfo;
use crate::types::{Val, Yielded};
use std::collections::VecDeque;

/// Result of resuming a computation one step
#[derive(Debug)]
pub enum StepOutcome {
    /// Paused, handing back a yieldable
    Yield(Yielded),
    /// Finished with a final value
    Done(Val),
    /// Raised an error it did not recover from
    Throw(ErrorInfo),
}

/// What a suspended computation is resumed with
#[derive(Debug, Clone, PartialEq)]
pub enum Resume {
    /// The yielded future fulfilled
    Value(Val),
    /// The yielded future rejected; offered to the computation for recovery
    Error(ErrorInfo),
}

/// A stateful unit of logic resumable via `step`/`step_err`.
///
/// Owned exclusively by one driver for its lifetime. After a step returns
/// `Done` or `Throw`, the driver makes no further steps.
pub trait Computation: Send {
    /// Resume with the value produced at the last suspension point.
    ///
    /// The first step of a drive passes `Val::Null`.
    fn step(&mut self, resume: Val) -> StepOutcome;

    /// Re-inject an error at the last suspension point, as if it had been
    /// raised there. The computation may recover and yield again, or
    /// finish, or return `Throw` to let the error escape.
    fn step_err(&mut self, err: ErrorInfo) -> StepOutcome;
}

type Stage = Box<dyn FnOnce(Resume) -> StepOutcome + Send>;

/// Suspendable computation built from an ordered queue of continuation
/// closures.
///
/// Each stage consumes the resume for the previous yield and returns the
/// next outcome. `then` stages see fulfilled values only and let injected
/// errors escape; `catch` stages observe the full resume, the try/catch
/// analog around the previous yield.
pub struct Steps {
    stages: VecDeque<Stage>,
}

impl Steps {
    /// A computation with no stages; it finishes immediately with `Val::Null`
    pub fn new() -> Self {
        Steps {
            stages: VecDeque::new(),
        }
    }

    /// Append a stage that consumes the resumed value.
    ///
    /// An injected error is not handled here: it escapes as an
    /// unrecovered throw without running the stage.
    pub fn then<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Val) -> StepOutcome + Send + 'static,
    {
        self.stages.push_back(Box::new(move |resume| match resume {
            Resume::Value(value) => f(value),
            Resume::Error(err) => StepOutcome::Throw(err),
        }));
        self
    }

    /// Append a stage that observes the resume outcome itself, error included
    pub fn catch<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Resume) -> StepOutcome + Send + 'static,
    {
        self.stages.push_back(Box::new(f));
        self
    }

    fn advance(&mut self, resume: Resume) -> StepOutcome {
        match self.stages.pop_front() {
            Some(stage) => stage(resume),
            // Exhausted: behaves like a finished computation
            None => match resume {
                Resume::Value(_) => StepOutcome::Done(Val::Null),
                Resume::Error(err) => StepOutcome::Throw(err),
            },
        }
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self::new()
    }
}

impl Computation for Steps {
    fn step(&mut self, resume: Val) -> StepOutcome {
        self.advance(Resume::Value(resume))
    }

    fn step_err(&mut self, err: ErrorInfo) -> StepOutcome {
        self.advance(Resume::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_steps_finish_with_null() {
        let mut steps = Steps::new();

        let StepOutcome::Done(value) = steps.step(Val::Null) else {
            panic!("expected immediate completion");
        };
        assert_eq!(value, Val::Null);
    }

    #[test]
    fn test_then_stage_receives_resume_value() {
        let mut steps = Steps::new().then(StepOutcome::Done);

        let StepOutcome::Done(value) = steps.step(Val::Num(5.0)) else {
            panic!("expected completion");
        };
        assert_eq!(value, Val::Num(5.0));
    }

    #[test]
    fn test_then_stage_lets_injected_error_escape() {
        let mut steps = Steps::new().then(|_| StepOutcome::Done(Val::Null));

        let StepOutcome::Throw(err) = steps.step_err(ErrorInfo::new("Boom", "injected")) else {
            panic!("expected the error to escape");
        };
        assert_eq!(err.code, "Boom");
    }

    #[test]
    fn test_catch_stage_observes_injected_error() {
        let mut steps = Steps::new().catch(|resume| match resume {
            Resume::Error(err) => StepOutcome::Done(Val::Str(err.code)),
            Resume::Value(_) => StepOutcome::Throw(ErrorInfo::new("Unexpected", "no error")),
        });

        let StepOutcome::Done(value) = steps.step_err(ErrorInfo::new("Boom", "injected")) else {
            panic!("expected recovery");
        };
        assert_eq!(value, Val::Str("Boom".to_string()));
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut steps = Steps::new()
            .then(|_| StepOutcome::Yield(Yielded::raw(1.0)))
            .then(StepOutcome::Done);

        assert!(matches!(
            steps.step(Val::Null),
            StepOutcome::Yield(Yielded::Raw(Val::Num(n))) if n == 1.0
        ));
        assert!(matches!(
            steps.step(Val::Num(2.0)),
            StepOutcome::Done(Val::Num(n)) if n == 2.0
        ));
    }
}
