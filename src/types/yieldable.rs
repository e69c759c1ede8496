//! Yieldable values
//!
//! The value a computation hands back at a suspension point. The variant
//! set is closed: a value is tagged exactly once at construction and the
//! normalizer matches over it exhaustively, instead of probing
//! capabilities repeatedly.

use crate::computation::Computation;
use crate::errors::ErrorInfo;
use crate::types::Val;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Outcome of a normalized future, and of a whole drive
pub type Settlement = Result<Val, ErrorInfo>;

/// Boxed future producing a settlement
pub type ValFuture = Pin<Box<dyn Future<Output = Settlement> + Send>>;

/// Completion callback handed to a callback-style async function.
///
/// Invoked as `(error, results...)`: a `Some` error rejects, otherwise
/// the results fulfill. Only the first invocation has any effect.
pub type Completion = Box<dyn FnMut(Option<ErrorInfo>, Vec<Val>) + Send>;

/// Callback-style async function: invoked exactly once with a completion callback
pub type CallbackFn = Box<dyn FnOnce(Completion) + Send>;

/// Zero-argument factory producing a fresh computation
pub type FactoryFn = Box<dyn FnOnce() -> Box<dyn Computation> + Send>;

/// A value handed back at a suspension point
pub enum Yielded {
    /// An already-constructed future, awaited as-is
    Future(ValFuture),
    /// A fresh suspendable computation, driven recursively
    Computation(Box<dyn Computation>),
    /// A zero-argument factory; invoked to obtain the computation to drive
    Factory(FactoryFn),
    /// A callback-style asynchronous function, adapted into a future
    Callback(CallbackFn),
    /// An ordered collection of yieldables, joined index-for-index
    List(Vec<Yielded>),
    /// A keyed mapping of yieldables, entries in enumeration order
    Map(Vec<(String, Yielded)>),
    /// Plain data: invalid at driver level, passed through in keyed mode
    Raw(Val),
}

impl Yielded {
    /// Wrap an already-constructed future
    pub fn future(fut: impl Future<Output = Settlement> + Send + 'static) -> Self {
        Yielded::Future(Box::pin(fut))
    }

    /// Wrap a suspendable computation
    pub fn computation(computation: impl Computation + 'static) -> Self {
        Yielded::Computation(Box::new(computation))
    }

    /// Wrap a zero-argument computation factory
    pub fn factory<C, F>(factory: F) -> Self
    where
        C: Computation + 'static,
        F: FnOnce() -> C + Send + 'static,
    {
        Yielded::Factory(Box::new(move || Box::new(factory())))
    }

    /// Wrap a callback-style asynchronous function
    pub fn callback(f: impl FnOnce(Completion) + Send + 'static) -> Self {
        Yielded::Callback(Box::new(f))
    }

    /// Wrap plain data
    pub fn raw(value: impl Into<Val>) -> Self {
        Yielded::Raw(value.into())
    }
}

impl fmt::Debug for Yielded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yielded::Future(_) => write!(f, "Yielded::Future"),
            Yielded::Computation(_) => write!(f, "Yielded::Computation"),
            Yielded::Factory(_) => write!(f, "Yielded::Factory"),
            Yielded::Callback(_) => write!(f, "Yielded::Callback"),
            Yielded::List(items) => write!(f, "Yielded::List(len={})", items.len()),
            Yielded::Map(entries) => write!(f, "Yielded::Map(len={})", entries.len()),
            Yielded::Raw(v) => write!(f, "Yielded::Raw({})", v),
        }
    }
}
