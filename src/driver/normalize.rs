//! Yield normalization
//!
//! Classifies the value handed back at a suspension point and converts it
//! into a future. Collections delegate to the combinator; nested
//! computations are driven recursively by a fresh driver.

use super::combine::{combine_list, combine_map};
use super::drive::Driver;
use crate::errors::{self, ErrorInfo};
use crate::types::{CallbackFn, Completion, Settlement, Val, ValFuture, Yielded};
use tokio::sync::oneshot;

/// Result of classifying a yielded value
pub enum Normalized {
    /// Converted into a future to await
    Future(ValFuture),
    /// Not classifiable as any future-producing shape; the plain value is
    /// handed back so the caller can report it or pass it through
    Invalid(Val),
}

/// Convert a yielded value into a future.
///
/// The match is total over the closed variant set; only plain data fails
/// to normalize.
pub fn normalize(yielded: Yielded) -> Normalized {
    match yielded {
        Yielded::Future(fut) => Normalized::Future(fut),
        Yielded::Computation(computation) => {
            Normalized::Future(Box::pin(Driver::new(computation).drive()))
        }
        Yielded::Factory(factory) => {
            // Invoked with no arguments to obtain the concrete computation
            let computation = factory();
            Normalized::Future(Box::pin(Driver::new(computation).drive()))
        }
        Yielded::Callback(f) => Normalized::Future(callback_to_future(f)),
        Yielded::List(items) => Normalized::Future(Box::pin(combine_list(items))),
        Yielded::Map(entries) => Normalized::Future(Box::pin(combine_map(entries))),
        Yielded::Raw(value) => Normalized::Invalid(value),
    }
}

/// Classification failure for a value no variant claims
pub(crate) fn invalid_yield(value: &Val) -> ErrorInfo {
    ErrorInfo::new(
        errors::TYPE_ERROR,
        format!(
            "You may only yield a future, computation, callback function, list, or map, \
             but the following value was passed: {}",
            value
        ),
    )
}

/// Adapt a callback-style async function into a future.
///
/// The function is invoked exactly once, immediately, with a completion
/// callback. The first completion call settles the future; later calls
/// are inert. Dropping the completion without calling it rejects, since
/// the future could never settle otherwise.
fn callback_to_future(f: CallbackFn) -> ValFuture {
    let (tx, rx) = oneshot::channel::<Settlement>();

    let mut sender = Some(tx);
    let completion: Completion = Box::new(move |err, mut results| {
        let Some(tx) = sender.take() else {
            // Already settled by an earlier call
            return;
        };

        let settlement = match err {
            Some(err) => Err(err),
            None => Ok(match results.len() {
                0 => Val::Null,
                1 => results.remove(0),
                _ => Val::List(results),
            }),
        };

        // A dropped receiver lost a fail-fast race; its settlement is discarded
        let _ = tx.send(settlement);
    });

    f(completion);

    Box::pin(async move {
        match rx.await {
            Ok(settlement) => settlement,
            Err(_) => Err(ErrorInfo::new(
                errors::CALLBACK_DROPPED,
                "Callback function dropped its completion callback without calling it",
            )),
        }
    })
}
