//! Scoped early exit for chains of asynchronous values.
//!
//! A chain built from `then` calls runs its steps one after another. To leave
//! such a chain early with a result, a step returns [`break_with`]`(payload)`.
//! The break travels down the chain as an ordinary rejection, so every
//! remaining success continuation is skipped, until a scope closer turns it
//! back into a fulfilled value.
//!
//! # State Machine
//!
//! ```text
//! Normal ──break_with(v)──► Breaking(v) ──end_scope──► Normal(v)
//!   │                          │
//!   │ then(..) runs            │ then(..) skipped
//!   │                          │ with_breaks(h) skipped, h never sees Break
//! ```
//!
//! Errors travelling the same chain are wrapped as [`Unwind::Error`]. Rejection
//! handlers wrapped in [`with_breaks`] only ever see those, so a break cannot
//! be swallowed by error handling in the middle of the chain.
//!
//! # Example
//!
//! ```
//! use qx::scope::{break_with, Unwind};
//! use qx::types::{AsyncValue, Eventual};
//!
//! let start: AsyncValue<i32, Unwind<i32, String>> = AsyncValue::fulfilled(5);
//! let result = start
//!     .then(|x| if x > 3 { break_with(x * 100) } else { Eventual::Value(x) })
//!     .then(|x| Eventual::Value(x + 1)) // skipped by the break
//!     .close_scope();
//!
//! assert_eq!(result.try_outcome(), Some(Ok(500)));
//! ```

use core::fmt;

use crate::types::{AsyncValue, Eventual};

/// A rejection travelling through a scoped chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unwind<V, E> {
    /// An early exit carrying the scope's result.
    Break(V),
    /// An ordinary failure.
    Error(E),
}

impl<V, E> Unwind<V, E> {
    /// Returns true for [`Unwind::Break`].
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break(_))
    }

    /// The break payload, if this is a break.
    pub fn into_break(self) -> Option<V> {
        match self {
            Self::Break(payload) => Some(payload),
            Self::Error(_) => None,
        }
    }

    /// The wrapped error, if this is an ordinary failure.
    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Break(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

impl<V, E: fmt::Display> fmt::Display for Unwind<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Break(_) => {
                f.write_str("break_with() escaped its scope; close the chain with end_scope()")
            }
            Self::Error(error) => error.fmt(f),
        }
    }
}

impl<V: fmt::Debug, E: std::error::Error> std::error::Error for Unwind<V, E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Break(_) => None,
            Self::Error(error) => error.source(),
        }
    }
}

/// Leaves the current scope with `payload`.
///
/// Return this from a `then` continuation. Every later success continuation
/// is skipped until the chain reaches [`end_scope`].
pub fn break_with<T, V, E>(payload: V) -> Eventual<T, Unwind<V, E>> {
    Eventual::Error(Unwind::Break(payload))
}

/// Wraps a rejection handler so that breaks pass it by untouched.
///
/// The returned closure is meant for [`AsyncValue::catch`] or
/// [`AsyncValue::then_or_else`]: ordinary errors reach `handler`, breaks are
/// re-raised unchanged.
pub fn with_breaks<T, V, E, H>(
    handler: H,
) -> impl FnOnce(Unwind<V, E>) -> Eventual<T, Unwind<V, E>> + Send + 'static
where
    H: FnOnce(E) -> Eventual<T, Unwind<V, E>> + Send + 'static,
{
    move |signal| match signal {
        Unwind::Break(payload) => Eventual::Error(Unwind::Break(payload)),
        Unwind::Error(error) => handler(error),
    }
}

/// Closes a scope: a break becomes the scope's value, errors are re-raised.
///
/// Meant as the rejection handler at the end of a scoped chain.
pub fn end_scope<V, E>(signal: Unwind<V, E>) -> Eventual<V, Unwind<V, E>> {
    match signal {
        Unwind::Break(payload) => Eventual::Value(payload),
        Unwind::Error(error) => Eventual::Error(Unwind::Error(error)),
    }
}

impl<T, V, E> AsyncValue<T, Unwind<V, E>>
where
    T: Clone + Send + 'static,
    V: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Handles ordinary errors of a scoped chain; breaks pass through.
    pub fn catch_errors<H>(&self, handler: H) -> Self
    where
        H: FnOnce(E) -> Eventual<T, Unwind<V, E>> + Send + 'static,
    {
        self.catch(with_breaks(handler))
    }
}

impl<V, E> AsyncValue<V, Unwind<V, E>>
where
    V: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Chains [`end_scope`](fn@end_scope) as the rejection handler.
    #[must_use]
    pub fn end_scope(&self) -> Self {
        self.catch(end_scope)
    }

    /// Ends the scope and unwraps errors back to their plain type.
    #[must_use]
    pub fn close_scope(&self) -> AsyncValue<V, E> {
        self.catch(|signal| match signal {
            Unwind::Break(payload) => Eventual::Value(payload),
            Unwind::Error(error) => Eventual::Error(error),
        })
    }
}
