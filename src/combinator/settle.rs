//! Per-element dispatch and settlement plumbing shared by the combinators.
//!
//! Every collection combinator runs the same first step: once the sequence is
//! available, each element is eagerly resolved and handed to the callback, all
//! without waiting on any other element. What differs is how the per-slot
//! outcomes are folded: [`join_all`] waits for every slot, while the
//! short-circuit combinators stop at the first decisive slot.
//!
//! Observers receive slots in settlement order. Plain slots are observed
//! immediately while dispatching, in index order.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::tracing_compat::trace;
use crate::types::{AsyncValue, Collection, Eventual, Resolver, deferred, eager_resolve};

/// Applies `callback` to every element, threading the element's index.
///
/// Plain elements run the callback immediately; pending elements run it when
/// they fulfill. A rejected element skips the callback and its slot carries
/// the rejection.
pub(crate) fn dispatch<T, R, E, F>(elements: Vec<Eventual<T, E>>, callback: &Arc<F>) -> Vec<Eventual<R, E>>
where
    T: Clone + Send + 'static,
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: Fn(T, usize) -> Eventual<R, E> + Send + Sync + 'static,
{
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let callback = Arc::clone(callback);
            eager_resolve(element, move |item| callback(item, index))
        })
        .collect()
}

/// Calls `observer(index, outcome)` exactly once per slot, as it settles.
pub(crate) fn observe_each<R, E, O>(slots: Vec<Eventual<R, E>>, observer: O)
where
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
    O: Fn(usize, Result<R, E>) + Send + Sync + 'static,
{
    let observer = Arc::new(observer);
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Eventual::Value(value) => observer(index, Ok(value)),
            Eventual::Error(error) => observer(index, Err(error)),
            Eventual::Async(pending) => {
                let observer = Arc::clone(&observer);
                pending.on_settle(move |outcome| observer(index, outcome.clone()));
            }
        }
    }
}

/// Waits for the sequence of `collection`, then hands its elements to `start`.
///
/// If the sequence itself rejects, `resolver` is rejected and `start` never
/// runs.
pub(crate) fn with_elements<T, X, E, F>(collection: Collection<T, E>, resolver: Resolver<X, E>, start: F)
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: FnOnce(Vec<Eventual<T, E>>, Resolver<X, E>) + Send + 'static,
    X: Clone + Send + 'static,
{
    match collection.into_eventual() {
        Eventual::Value(elements) => start(elements, resolver),
        Eventual::Error(error) => {
            resolver.reject(error);
        }
        Eventual::Async(sequence) => sequence.on_settle(move |outcome| match outcome {
            Ok(elements) => start(elements.clone(), resolver),
            Err(error) => {
                resolver.reject(error.clone());
            }
        }),
    }
}

struct JoinState<R, E> {
    slots: Vec<Option<R>>,
    remaining: usize,
    resolver: Option<Resolver<Vec<R>, E>>,
}

/// Joins every slot into one ordered sequence.
///
/// Fulfills once all slots have fulfilled, with values in index order.
/// Rejects with the first rejection observed; later outcomes are dropped.
pub(crate) fn join_all<R, E>(slots: Vec<Eventual<R, E>>) -> AsyncValue<Vec<R>, E>
where
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    let (resolver, joined) = deferred();
    let total = slots.len();
    if total == 0 {
        resolver.fulfill(Vec::new());
        return joined;
    }

    let state = Arc::new(Mutex::new(JoinState {
        slots: std::iter::repeat_with(|| None).take(total).collect(),
        remaining: total,
        resolver: Some(resolver),
    }));

    observe_each(slots, move |index, outcome| {
        let finished = {
            let mut state = state.lock();
            if state.resolver.is_none() {
                return;
            }
            match outcome {
                Ok(value) => {
                    state.slots[index] = Some(value);
                    state.remaining -= 1;
                    if state.remaining > 0 {
                        return;
                    }
                    let values: Vec<R> =
                        std::mem::take(&mut state.slots).into_iter().flatten().collect();
                    state.resolver.take().map(|resolver| (resolver, Ok(values)))
                }
                Err(error) => {
                    trace!(index, "join rejected by slot");
                    state.resolver.take().map(|resolver| (resolver, Err(error)))
                }
            }
        };
        if let Some((resolver, outcome)) = finished {
            resolver.settle(outcome);
        }
    });

    joined
}
