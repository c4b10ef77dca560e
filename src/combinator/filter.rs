//! Filter combinator: keep the elements whose predicate holds.
//!
//! Built on [`map`]: each slot becomes `Some(element)` when the predicate
//! holds and `None` otherwise, and the joined slots are flattened. Relative
//! order is preserved and the surviving elements are the originals, moved out
//! of the input rather than copied.
//!
//! Predicates see the element by reference and may be asynchronous; they run
//! concurrently with the same failure rules as `map`.

use super::map::map;
use crate::types::{AsyncValue, Collection, Eventual, eager_resolve};

/// Keeps the elements for which `predicate(&element, index)` is true.
///
/// # Example
///
/// ```
/// use qx::combinator::filter;
/// use qx::types::{AsyncValue, Eventual};
///
/// let evens: AsyncValue<Vec<i32>, ()> =
///     filter(vec![1, 2, 3, 4], |x: &i32, _: usize| Eventual::Value(x % 2 == 0));
/// assert_eq!(evens.try_outcome(), Some(Ok(vec![2, 4])));
/// ```
pub fn filter<T, E, C, P>(collection: C, predicate: P) -> AsyncValue<Vec<T>, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(&T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    map(collection, move |item: T, index| {
        let verdict = predicate(&item, index);
        eager_resolve(verdict, move |keep| Eventual::Value(keep.then_some(item)))
    })
    .map_value(|slots| slots.into_iter().flatten().collect())
}
