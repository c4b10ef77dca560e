//! Core types: the single-assignment [`AsyncValue`], the [`Eventual`]
//! may-be-asynchronous value, and the combinator input [`Collection`].

pub mod async_value;
pub mod collection;
pub mod eventual;

pub use async_value::{AsyncValue, Resolver, deferred};
pub use collection::Collection;
pub use eventual::{Eventual, eager_resolve};
