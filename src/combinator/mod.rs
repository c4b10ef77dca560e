//! Combinators over collections of asynchronous values.
//!
//! This module provides the core combinators:
//!
//! - [`map`](fn@map): Transform every element concurrently, keep input order
//! - [`filter`](fn@filter): Keep elements whose (possibly async) predicate holds
//! - [`some`]: True as soon as any predicate holds
//! - [`every`]: False as soon as any predicate fails
//! - [`any`](fn@any): First value to fulfill wins; aggregate error if none does
//! - [`adapter`]: Curried and callable-collection call shapes
//!
//! # Eagerness
//!
//! Elements and callback results may each be plain or pending. Plain values
//! are continued on the spot; only genuinely pending values register
//! continuations. A collection of plain values with synchronous callbacks
//! therefore produces an already-settled result.
//!
//! # No Cancellation
//!
//! Combinators that settle early (`some`, `every`, `any`) do not stop the work
//! they started. Outstanding elements and callbacks run to completion and
//! their outcomes are discarded.

pub mod adapter;
pub mod any;
pub mod filter;
pub mod map;
mod settle;
pub mod short_circuit;

pub use adapter::{
    Thunk, call_thunk, every_calls, every_with, filter_calls, filter_with, map_calls, map_with,
    some_calls, some_with, thunk,
};
pub use any::{AnyError, any, any_with_config};
pub use filter::filter;
pub use map::map;
pub use short_circuit::{every, some};
