//! Test helpers for driver tests
//!
//! Deferred-future fixtures and small computation builders shared across
//! the drive, normalize, and combine tests.

use crate::computation::{StepOutcome, Steps};
use crate::errors::ErrorInfo;
use crate::types::{Settlement, Val, Yielded};
use tokio::sync::oneshot;

/// Handle for settling a deferred future from the test body
pub struct Settle {
    tx: oneshot::Sender<Settlement>,
}

impl Settle {
    pub fn fulfill(self, value: Val) {
        let _ = self.tx.send(Ok(value));
    }

    pub fn reject(self, err: ErrorInfo) {
        let _ = self.tx.send(Err(err));
    }
}

/// A future the test settles by hand, plus its settle handle
pub fn deferred() -> (Settle, Yielded) {
    let (tx, rx) = oneshot::channel::<Settlement>();
    let yielded = Yielded::future(async move {
        match rx.await {
            Ok(settlement) => settlement,
            Err(_) => Err(ErrorInfo::new("TestDropped", "deferred future dropped unsettled")),
        }
    });
    (Settle { tx }, yielded)
}

/// An already-fulfilled future
pub fn fulfilled(value: Val) -> Yielded {
    Yielded::future(async move { Ok(value) })
}

/// An already-rejected future
pub fn rejected(err: ErrorInfo) -> Yielded {
    Yielded::future(async move { Err(err) })
}

/// A future that never settles
pub fn never() -> Yielded {
    Yielded::future(std::future::pending())
}

/// Computation that yields once and finishes with whatever it is resumed with
pub fn yield_once(yielded: Yielded) -> Steps {
    Steps::new()
        .then(move |_| StepOutcome::Yield(yielded))
        .then(StepOutcome::Done)
}
