//! Input collections for the combinators.
//!
//! Both the sequence and each of its elements may still be pending. The
//! length is fixed once the sequence itself is available.

use super::async_value::AsyncValue;
use super::eventual::Eventual;

/// An ordered, possibly asynchronous sequence of possibly asynchronous
/// elements.
#[derive(Debug, Clone)]
pub struct Collection<T, E> {
    items: Eventual<Vec<Eventual<T, E>>, E>,
}

impl<T, E> Collection<T, E> {
    /// Creates a collection from its fully general form.
    #[must_use]
    pub const fn new(items: Eventual<Vec<Eventual<T, E>>, E>) -> Self {
        Self { items }
    }

    /// A sequence available now whose elements may still be pending.
    #[must_use]
    pub fn of(elements: Vec<Eventual<T, E>>) -> Self {
        Self::new(Eventual::Value(elements))
    }

    /// A sequence available now whose elements are all pending values.
    #[must_use]
    pub fn of_pending(elements: Vec<AsyncValue<T, E>>) -> Self {
        Self::of(elements.into_iter().map(Eventual::Async).collect())
    }

    /// Unwraps into the general form consumed by the combinators.
    #[must_use]
    pub fn into_eventual(self) -> Eventual<Vec<Eventual<T, E>>, E> {
        self.items
    }
}

impl<T, E> Collection<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// A sequence of plain elements that arrives later.
    #[must_use]
    pub fn deferred(sequence: AsyncValue<Vec<T>, E>) -> Self {
        Self::new(Eventual::Async(sequence.map_value(|values| {
            values.into_iter().map(Eventual::Value).collect()
        })))
    }
}

impl<T, E> From<Vec<T>> for Collection<T, E> {
    fn from(values: Vec<T>) -> Self {
        Self::of(values.into_iter().map(Eventual::Value).collect())
    }
}

impl<T, E> From<AsyncValue<Vec<T>, E>> for Collection<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn from(sequence: AsyncValue<Vec<T>, E>) -> Self {
        Self::deferred(sequence)
    }
}

impl<T, E> FromIterator<T> for Collection<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter.into_iter().map(Eventual::Value).collect())
    }
}
