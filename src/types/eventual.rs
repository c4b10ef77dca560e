//! Values that may or may not be asynchronous.
//!
//! [`Eventual`] is what callbacks hand back to the combinators: a plain value,
//! a synchronous failure, or an [`AsyncValue`] that settles later.
//! [`eager_resolve`] continues with plain values on the spot and only registers
//! a continuation when the value is genuinely pending, so already-available
//! inputs never pay for a round-trip through the continuation machinery.

use super::async_value::{AsyncValue, Resolver};

/// A value that is either available now, failed now, or arrives later.
#[derive(Debug, Clone)]
pub enum Eventual<T, E> {
    /// Available immediately.
    Value(T),
    /// Failed immediately.
    Error(E),
    /// Settles later (or has already settled inside the `AsyncValue`).
    Async(AsyncValue<T, E>),
}

impl<T, E> Eventual<T, E> {
    /// Returns true for [`Eventual::Async`].
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Returns true for [`Eventual::Value`].
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns true for [`Eventual::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Converts into an `AsyncValue`, wrapping plain outcomes as settled.
    #[must_use]
    pub fn into_async(self) -> AsyncValue<T, E> {
        match self {
            Self::Value(value) => AsyncValue::fulfilled(value),
            Self::Error(error) => AsyncValue::rejected(error),
            Self::Async(pending) => pending,
        }
    }
}

impl<T, E> Eventual<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Settles `resolver` with this outcome once it is known.
    pub(crate) fn forward_to(self, resolver: Resolver<T, E>) {
        match self {
            Self::Value(value) => {
                resolver.fulfill(value);
            }
            Self::Error(error) => {
                resolver.reject(error);
            }
            Self::Async(pending) => pending.on_settle(move |outcome| {
                resolver.settle(outcome.clone());
            }),
        }
    }

    /// Method form of [`eager_resolve`].
    pub fn and_then<U, F>(self, continuation: F) -> Eventual<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Eventual<U, E> + Send + 'static,
    {
        eager_resolve(self, continuation)
    }
}

impl<T, E> From<Result<T, E>> for Eventual<T, E> {
    fn from(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error),
        }
    }
}

impl<T, E> From<AsyncValue<T, E>> for Eventual<T, E> {
    fn from(pending: AsyncValue<T, E>) -> Self {
        Self::Async(pending)
    }
}

/// Continues with `value` as soon as it is available.
///
/// - `Value(v)`: runs `continuation(v)` right now and returns its result.
/// - `Error(e)`: returns `Error(e)`; the continuation never runs.
/// - `Async(av)`: returns `Async(av.then(continuation))`; a rejection of `av`
///   propagates unchanged without running the continuation.
///
/// # Example
///
/// ```
/// use qx::types::{eager_resolve, Eventual};
///
/// let doubled = eager_resolve(Eventual::<i32, ()>::Value(21), |x| Eventual::Value(x * 2));
/// assert!(matches!(doubled, Eventual::Value(42)));
/// ```
pub fn eager_resolve<T, U, E, F>(value: Eventual<T, E>, continuation: F) -> Eventual<U, E>
where
    T: Clone + Send + 'static,
    U: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: FnOnce(T) -> Eventual<U, E> + Send + 'static,
{
    match value {
        Eventual::Value(value) => continuation(value),
        Eventual::Error(error) => Eventual::Error(error),
        Eventual::Async(pending) => Eventual::Async(pending.then(continuation)),
    }
}
