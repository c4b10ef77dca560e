//! qx: eager asynchronous collection combinators and scoped early exit.
//!
//! # Overview
//!
//! qx runs callbacks over collections whose sequence, elements and callback
//! results may each be available now or later. Every element is processed
//! without waiting on any other; only the final join (or the first decisive
//! outcome) is waited for. Plain values never pay for asynchrony: they are
//! continued on the spot.
//!
//! # Core Guarantees
//!
//! - **Input order**: `map` and `filter` results follow input index order,
//!   whatever order elements settle in
//! - **Single assignment**: every result settles exactly once; later outcomes
//!   are ignored
//! - **Settlement order decides races**: `some`, `every` and `any` settle on
//!   the first decisive outcome to arrive, not the lowest index
//! - **One error**: a failed combinator reports a single error, except `any`,
//!   which reports the first rejection alongside the count
//! - **No executor**: continuations run on the thread that settles a value;
//!   `AsyncValue` also implements `Future` for use with any executor
//!
//! # Module Structure
//!
//! - [`types`]: `AsyncValue`, `Resolver`, `Eventual`, `Collection`
//! - [`combinator`]: `map`, `filter`, `some`, `every`, `any`, call-shape adapters
//! - [`scope`]: `break_with` / `end_scope` / `with_breaks` early exit
//! - [`config`]: combinator configuration (env and TOML layering)
//! - [`error`](mod@error): crate error type
//! - [`tracing_compat`]: optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use qx::{deferred, map, AsyncValue, Eventual};
//!
//! let (resolver, pending) = deferred::<i32, String>();
//! let doubled: AsyncValue<Vec<i32>, String> = map(
//!     qx::Collection::of(vec![Eventual::Value(1), Eventual::Async(pending)]),
//!     |x: i32, _index: usize| Eventual::Value(x * 2),
//! );
//! assert!(doubled.is_pending());
//!
//! resolver.fulfill(21);
//! assert_eq!(doubled.try_outcome(), Some(Ok(vec![2, 42])));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_inception)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]

pub mod combinator;
pub mod config;
pub mod error;
pub mod scope;
pub mod tracing_compat;
pub mod types;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use combinator::{AnyError, any, any_with_config, every, filter, map, some};
pub use config::{CombinatorConfig, EmptyRacePolicy};
pub use error::{Error, Result};
pub use scope::{Unwind, break_with, end_scope, with_breaks};
pub use types::{AsyncValue, Collection, Eventual, Resolver, deferred, eager_resolve};
