//! Collection combination
//!
//! Joins an ordered collection or keyed mapping of yieldables into one
//! future that preserves the input shape. Fail-fast: the first member
//! rejection settles the combination with that error, and unfinished
//! sibling futures are dropped, their settlements discarded.

use super::normalize::{invalid_yield, normalize, Normalized};
use crate::types::{Settlement, Val, ValFuture, Yielded};
use futures::future::{self, try_join_all, FutureExt};
use std::collections::HashMap;
use tracing::trace;

/// Join an ordered collection, fulfilling with results in input order
/// regardless of settlement order.
///
/// A member that classifies as plain data fails the combination
/// immediately, matching the single-yield invalid case.
pub async fn combine_list(items: Vec<Yielded>) -> Settlement {
    let members: Vec<ValFuture> = items
        .into_iter()
        .map(|item| match normalize(item) {
            Normalized::Future(fut) => fut,
            Normalized::Invalid(value) => future::ready(Err(invalid_yield(&value))).boxed(),
        })
        .collect();

    trace!(members = members.len(), "joining ordered collection");

    let results = try_join_all(members).await?;
    Ok(Val::List(results))
}

/// Join a keyed mapping, fulfilling with an object over the same keys.
///
/// Plain data entries pass through to the result unchanged. Every
/// deferred key is pre-seeded with `Val::Null` at registration time, so a
/// result of the final shape exists before any member settles, then each
/// slot is overwritten with its resolved value. The result object is
/// freshly allocated per call.
pub async fn combine_map(entries: Vec<(String, Yielded)>) -> Settlement {
    let mut results: HashMap<String, Val> = HashMap::with_capacity(entries.len());
    let mut deferred: Vec<(String, ValFuture)> = Vec::new();

    // Entries are registered in enumeration order
    for (key, value) in entries {
        match normalize(value) {
            Normalized::Future(fut) => {
                // Predefine the key in the result
                results.insert(key.clone(), Val::Null);
                deferred.push((key, fut));
            }
            Normalized::Invalid(raw) => {
                results.insert(key, raw);
            }
        }
    }

    trace!(deferred = deferred.len(), "joining keyed mapping");

    let (keys, members): (Vec<String>, Vec<ValFuture>) = deferred.into_iter().unzip();
    let settled = try_join_all(members).await?;
    for (key, value) in keys.into_iter().zip(settled) {
        results.insert(key, value);
    }

    Ok(Val::Obj(results))
}
