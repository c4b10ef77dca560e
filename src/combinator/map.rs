//! Map combinator: transform every element concurrently, keep input order.
//!
//! # Semantics
//!
//! ```text
//! map(collection, f):
//!   elements ← await(collection)
//!   for i, x in elements:            // issued without waiting on each other
//!     slot[i] ← eager(x) then f(·, i) then eager(·)
//!   return join(slot[0..n])          // index order, not settlement order
//! ```
//!
//! A rejection of the sequence, of any element, or of any callback result
//! rejects the whole map with the first rejection observed. Which of several
//! failures is reported is not part of the contract; only that exactly one is.
//!
//! Elements that are plain values, with callbacks that return plain values,
//! complete synchronously: the returned `AsyncValue` is already fulfilled.

use std::sync::Arc;

use super::settle::{dispatch, join_all};
use crate::tracing_compat::debug;
use crate::types::{AsyncValue, Collection, Eventual, eager_resolve};

/// Transforms each element with `callback(element, index)`.
///
/// # Example
///
/// ```
/// use qx::combinator::map;
/// use qx::types::{AsyncValue, Eventual};
///
/// let doubled: AsyncValue<Vec<i32>, ()> =
///     map(vec![1, 2, 3, 4], |x: i32, _index: usize| Eventual::Value(x * 2));
/// assert_eq!(doubled.try_outcome(), Some(Ok(vec![2, 4, 6, 8])));
/// ```
pub fn map<T, R, E, C, F>(collection: C, callback: F) -> AsyncValue<Vec<R>, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: Fn(T, usize) -> Eventual<R, E> + Send + Sync + 'static,
{
    let callback = Arc::new(callback);
    eager_resolve(collection.into().into_eventual(), move |elements| {
        debug!(len = elements.len(), "map dispatching elements");
        Eventual::Async(join_all(dispatch(elements, &callback)))
    })
    .into_async()
}
