//! Any combinator: the first value to fulfill wins.
//!
//! # Semantics
//!
//! ```text
//! any(v1, ..., vn):
//!   first vi to fulfill        → Ok(value of vi)
//!   all n rejected             → Err(AllRejected { first, rejected: n })
//!   n = 0                      → per EmptyRacePolicy
//! ```
//!
//! Unlike `map`, a rejection is not fatal. Rejections are counted, and the
//! chronologically first one is kept so that the aggregate error has a
//! concrete cause. The aggregate is only raised once the last outstanding
//! value has settled, since any of them might still fulfill.
//!
//! Losers are not cancelled; their outcomes are dropped on arrival.

use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{CombinatorConfig, EmptyRacePolicy};
use crate::tracing_compat::{debug, trace};
use crate::types::{AsyncValue, Resolver, deferred};

/// Error returned by [`any`] when no value fulfills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyError<E> {
    /// Every value rejected.
    AllRejected {
        /// The first rejection to arrive.
        first: E,
        /// How many values rejected (all of them).
        rejected: usize,
    },
    /// There was nothing to race.
    Empty,
}

impl<E> AnyError<E> {
    /// The first rejection, if any value was raced.
    #[must_use]
    pub const fn first(&self) -> Option<&E> {
        match self {
            Self::AllRejected { first, .. } => Some(first),
            Self::Empty => None,
        }
    }

    /// Consumes the error, returning the first rejection.
    pub fn into_first(self) -> Option<E> {
        match self {
            Self::AllRejected { first, .. } => Some(first),
            Self::Empty => None,
        }
    }

    /// Returns true if the race had no participants.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<E: fmt::Display> fmt::Display for AnyError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllRejected { first, rejected } => {
                write!(f, "all {rejected} values rejected; first: {first}")
            }
            Self::Empty => write!(f, "any called with no values"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for AnyError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.first().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Resolves with whichever value fulfills first.
///
/// Empty input rejects with [`AnyError::Empty`]; use [`any_with_config`] to
/// choose a different policy.
///
/// # Example
///
/// ```
/// use qx::combinator::{any, AnyError};
/// use qx::types::{deferred, AsyncValue};
///
/// let (slow, slow_value) = deferred::<&str, &str>();
/// let (fast, fast_value) = deferred::<&str, &str>();
/// let winner: AsyncValue<&str, AnyError<&str>> = any([slow_value, fast_value]);
///
/// fast.fulfill("fast");
/// slow.fulfill("slow");
/// assert_eq!(winner.try_outcome(), Some(Ok("fast")));
/// ```
pub fn any<T, E, I>(values: I) -> AsyncValue<T, AnyError<E>>
where
    I: IntoIterator<Item = AsyncValue<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    any_with_config(values, &CombinatorConfig::default())
}

struct RaceState<T, E> {
    total: usize,
    remaining: usize,
    first_error: Option<E>,
    resolver: Option<Resolver<T, AnyError<E>>>,
}

/// [`any`] with an explicit configuration.
pub fn any_with_config<T, E, I>(values: I, config: &CombinatorConfig) -> AsyncValue<T, AnyError<E>>
where
    I: IntoIterator<Item = AsyncValue<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    let values: Vec<_> = values.into_iter().collect();
    let (resolver, winner) = deferred();
    if values.is_empty() {
        match config.empty_race {
            EmptyRacePolicy::Reject => {
                resolver.reject(AnyError::Empty);
            }
            EmptyRacePolicy::Pending => {
                debug!("any over no values left pending");
            }
        }
        return winner;
    }

    debug!(len = values.len(), "any racing values");
    let state = Arc::new(Mutex::new(RaceState {
        total: values.len(),
        remaining: values.len(),
        first_error: None,
        resolver: Some(resolver),
    }));

    for (_index, value) in values.into_iter().enumerate() {
        let state = Arc::clone(&state);
        value.on_settle(move |outcome| {
            let settled = {
                let mut state = state.lock();
                state.remaining -= 1;
                if state.resolver.is_none() {
                    trace!(index = _index, "race already decided");
                    return;
                }
                match outcome {
                    Ok(value) => {
                        trace!(index = _index, "race won");
                        state.resolver.take().map(|r| (r, Ok(value.clone())))
                    }
                    Err(error) => {
                        if state.first_error.is_none() {
                            state.first_error = Some(error.clone());
                        }
                        if state.remaining > 0 {
                            return;
                        }
                        let rejected = state.total;
                        let first = state.first_error.take();
                        debug!(rejected, "any: every value rejected");
                        match (state.resolver.take(), first) {
                            (Some(r), Some(first)) => {
                                Some((r, Err(AnyError::AllRejected { first, rejected })))
                            }
                            _ => None,
                        }
                    }
                }
            };
            if let Some((resolver, outcome)) = settled {
                resolver.settle(outcome);
            }
        });
    }
    winner
}
