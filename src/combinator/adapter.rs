//! Alternate call shapes for the collection combinators.
//!
//! The core combinators take `(collection, callback)`. Two other shapes are
//! common enough to support directly:
//!
//! - **Curried**: `map_with(callback)` returns a reusable closure that accepts
//!   collections later.
//! - **Callable collections**: `map_calls(thunks)` treats each element as the
//!   callback, calling it with its own index. Used as a value, the function
//!   item `map_calls` is itself the zero-argument curried form.
//!
//! Every shape funnels into the core combinator, so they agree by
//! construction.

use std::sync::Arc;

use super::filter::filter;
use super::map::map;
use super::short_circuit::{every, some};
use crate::types::{AsyncValue, Collection, Eventual};

/// A callable collection element: invoked with its own index.
pub type Thunk<R, E> = Arc<dyn Fn(usize) -> Eventual<R, E> + Send + Sync>;

/// Wraps a closure as a [`Thunk`].
pub fn thunk<R, E, F>(f: F) -> Thunk<R, E>
where
    F: Fn(usize) -> Eventual<R, E> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Calls `thunk` with `index`; the callback the `*_calls` shapes pass to the
/// core combinators.
pub fn call_thunk<R, E>(thunk: Thunk<R, E>, index: usize) -> Eventual<R, E> {
    thunk(index)
}

/// Curried [`map`].
pub fn map_with<T, R, E, C, F>(callback: F) -> impl Fn(C) -> AsyncValue<Vec<R>, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: Fn(T, usize) -> Eventual<R, E> + Send + Sync + 'static,
{
    let callback = Arc::new(callback);
    move |collection| {
        let callback = Arc::clone(&callback);
        map(collection, move |item: T, index: usize| callback(item, index))
    }
}

/// Curried [`filter`].
pub fn filter_with<T, E, C, P>(predicate: P) -> impl Fn(C) -> AsyncValue<Vec<T>, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(&T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    move |collection| {
        let predicate = Arc::clone(&predicate);
        filter(collection, move |item: &T, index: usize| predicate(item, index))
    }
}

/// Curried [`some`].
pub fn some_with<T, E, C, P>(predicate: P) -> impl Fn(C) -> AsyncValue<bool, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    move |collection| {
        let predicate = Arc::clone(&predicate);
        some(collection, move |item: T, index: usize| predicate(item, index))
    }
}

/// Curried [`every`].
pub fn every_with<T, E, C, P>(predicate: P) -> impl Fn(C) -> AsyncValue<bool, E>
where
    C: Into<Collection<T, E>>,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    P: Fn(T, usize) -> Eventual<bool, E> + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    move |collection| {
        let predicate = Arc::clone(&predicate);
        every(collection, move |item: T, index: usize| predicate(item, index))
    }
}

/// Calls every thunk with its index and collects the results in order.
pub fn map_calls<R, E, C>(thunks: C) -> AsyncValue<Vec<R>, E>
where
    C: Into<Collection<Thunk<R, E>, E>>,
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    map(thunks, call_thunk)
}

/// Keeps the thunks whose call returns true.
pub fn filter_calls<E, C>(thunks: C) -> AsyncValue<Vec<Thunk<bool, E>>, E>
where
    C: Into<Collection<Thunk<bool, E>, E>>,
    E: Clone + Send + 'static,
{
    filter(thunks, |thunk: &Thunk<bool, E>, index: usize| thunk(index))
}

/// True as soon as any thunk's call returns true.
pub fn some_calls<E, C>(thunks: C) -> AsyncValue<bool, E>
where
    C: Into<Collection<Thunk<bool, E>, E>>,
    E: Clone + Send + 'static,
{
    some(thunks, call_thunk)
}

/// False as soon as any thunk's call returns false.
pub fn every_calls<E, C>(thunks: C) -> AsyncValue<bool, E>
where
    C: Into<Collection<Thunk<bool, E>, E>>,
    E: Clone + Send + 'static,
{
    every(thunks, call_thunk)
}
