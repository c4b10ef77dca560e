//! Short-circuit combinators: `some` and `every`.
//!
//! Both evaluate every predicate concurrently and settle as soon as the answer
//! is known, without waiting for the full join.
//!
//! # Semantics
//!
//! ```text
//! some(xs, p):                         every(xs, p):
//!   first p(x) = true   → true           first p(x) = false  → false
//!   all settled false   → false          all settled true    → true
//!   rejection first     → reject         rejection first     → reject
//! ```
//!
//! The result is single-assignment and owned by whichever settlement reaches
//! it first. A decisive verdict that lands before a rejection wins, even if
//! the rejecting element has a lower index; a rejection that lands first
//! wins over any later verdict. Settlement order decides, never index order.
//!
//! # Wasted Work
//!
//! Settling early does not cancel anything. Predicates still in flight keep
//! running to completion and their outcomes are discarded, so an expensive
//! predicate over a long collection may do work nobody observes.
//!
//! `every` is not `!some(!p)`: negating a rejected predicate is meaningless,
//! and the negation would swap which verdict is allowed to pre-empt errors.
//! Both run the same engine parameterized by their decisive verdict.

use std::sync::Arc;

use parking_lot::Mutex;

use super::settle::{dispatch, observe_each, with_elements};
use crate::tracing_compat::{debug, trace};
use crate::types::{AsyncValue, Collection, Eventual, Resolver, deferred};

/// Resolves `true` as soon as any predicate holds.
///
/// Resolves `false` once every predicate has settled false (immediately for
/// an empty collection). Rejects with the first rejection observed before a
/// `true` verdict.
///
/// # Example
///
/// ```
/// use qx::combinator::some;
/// use qx::types::{AsyncValue, Eventual};
///
/// let any_even: AsyncValue<bool, ()> =
///     some(vec![1, 2, 3, 4], |x: i32, _: usize| Eventual::Value(x % 2 == 0));
/// assert_eq!(any_even.try_outcome(), Some(Ok(true)));
/// ```
pub fn some<T, E, C, P>(collection: C, predicate: P) -> AsyncValue<bool, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    short_circuit(collection.into(), predicate, true)
}

/// Resolves `false` as soon as any predicate fails to hold.
///
/// Resolves `true` once every predicate has settled true (immediately for an
/// empty collection). Rejects with the first rejection observed before a
/// `false` verdict.
///
/// # Example
///
/// ```
/// use qx::combinator::every;
/// use qx::types::{AsyncValue, Eventual};
///
/// let all_odd: AsyncValue<bool, ()> =
///     every(vec![1, 2, 3, 4], |x: i32, _: usize| Eventual::Value(x % 2 == 1));
/// assert_eq!(all_odd.try_outcome(), Some(Ok(false)));
/// ```
pub fn every<T, E, C, P>(collection: C, predicate: P) -> AsyncValue<bool, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    short_circuit(collection.into(), predicate, false)
}

struct ShortCircuit<E> {
    remaining: usize,
    resolver: Option<Resolver<bool, E>>,
}

/// Settles with `decisive` on the first matching verdict, with `!decisive`
/// once all verdicts are in, or with the first rejection seen before either.
pub(crate) fn short_circuit<T, E, P>(
    collection: Collection<T, E>,
    predicate: P,
    decisive: bool,
) -> AsyncValue<bool, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    let (resolver, verdict) = deferred();
    with_elements(collection, resolver, move |elements, resolver| {
        debug!(len = elements.len(), decisive, "short-circuit dispatching predicates");
        let slots = dispatch(elements, &predicate);
        if slots.is_empty() {
            resolver.fulfill(!decisive);
            return;
        }

        let state = Arc::new(Mutex::new(ShortCircuit {
            remaining: slots.len(),
            resolver: Some(resolver),
        }));
        observe_each(slots, move |_index, outcome| {
            let settled = {
                let mut state = state.lock();
                if state.resolver.is_none() {
                    trace!(index = _index, "discarding settlement after short-circuit");
                    return;
                }
                state.remaining -= 1;
                match outcome {
                    Ok(found) if found == decisive => {
                        trace!(index = _index, found, "short-circuit verdict");
                        state.resolver.take().map(|r| (r, Ok(decisive)))
                    }
                    Ok(_) if state.remaining == 0 => {
                        state.resolver.take().map(|r| (r, Ok(!decisive)))
                    }
                    Ok(_) => None,
                    Err(error) => {
                        trace!(index = _index, "short-circuit rejected by predicate");
                        state.resolver.take().map(|r| (r, Err(error)))
                    }
                }
            };
            if let Some((resolver, outcome)) = settled {
                resolver.settle(outcome);
            }
        });
    });
    verdict
}
