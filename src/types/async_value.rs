//! Single-assignment asynchronous values.
//!
//! An [`AsyncValue`] starts out pending and settles exactly once, either
//! fulfilled with a value or rejected with an error. The producing side holds
//! a [`Resolver`]; every clone of the consuming side observes the same outcome.
//!
//! # State Machine
//!
//! ```text
//! Pending ──fulfill(v)──► Fulfilled(v)
//!    │
//!    └────reject(e)─────► Rejected(e)
//! ```
//!
//! A second settlement is ignored: [`Resolver::settle`] returns `false` and the
//! observers keep seeing the first outcome.
//!
//! # Continuations
//!
//! Continuations registered with [`AsyncValue::on_settle`] run synchronously on
//! the thread that settles the value, in registration order. Registering on an
//! already-settled value runs the continuation immediately. No lock is held
//! while a continuation runs, so continuations may freely settle or observe
//! other values (including this one).
//!
//! A value settled from inside a running continuation does not run its own
//! continuations on the spot: they are queued on the thread's drain and run by
//! the outermost [`Resolver::settle`] before it returns. Chains of any length
//! therefore settle in constant stack depth.
//!
//! [`AsyncValue::then`], [`AsyncValue::catch`] and
//! [`AsyncValue::then_or_else`] build new values from continuations, which is
//! how chains are formed. `AsyncValue` also implements [`Future`], so any
//! executor can await the outcome.

use core::fmt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;
use smallvec::SmallVec;

use super::eventual::Eventual;
use crate::tracing_compat::trace;

type Continuation<T, E> = Box<dyn FnOnce(&Result<T, E>) + Send>;

/// A continuation bound to its outcome, ready to run on this thread.
type Job = Box<dyn FnOnce()>;

thread_local! {
    /// Jobs waiting behind the drain running on this thread, if any.
    static DRAIN: RefCell<Option<VecDeque<Job>>> = const { RefCell::new(None) };
}

/// Runs `jobs` in order, or queues them if a drain is already running.
///
/// The outermost caller loops until the queue is empty, so settlements made by
/// a job add to the queue instead of nesting another stack frame.
fn run_jobs(jobs: Vec<Job>) {
    let owns_drain = DRAIN.with(|drain| {
        let mut drain = drain.borrow_mut();
        match drain.as_mut() {
            Some(queue) => {
                queue.extend(jobs);
                false
            }
            None => {
                *drain = Some(VecDeque::from(jobs));
                true
            }
        }
    });
    if !owns_drain {
        return;
    }

    let _reset = DrainReset;
    while let Some(job) = DRAIN.with(|drain| {
        drain
            .borrow_mut()
            .as_mut()
            .and_then(VecDeque::pop_front)
    }) {
        job();
    }
}

/// Clears the thread's drain when the outermost run ends, even by panic.
struct DrainReset;

impl Drop for DrainReset {
    fn drop(&mut self) {
        let leftover = DRAIN.with(|drain| drain.borrow_mut().take());
        drop(leftover);
    }
}

enum State<T, E> {
    Pending {
        continuations: Vec<Continuation<T, E>>,
        wakers: SmallVec<[Waker; 1]>,
    },
    Settled(Result<T, E>),
}

impl<T, E> State<T, E> {
    fn pending() -> Self {
        Self::Pending {
            continuations: Vec::new(),
            wakers: SmallVec::new(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Settled(Ok(_)) => "fulfilled",
            Self::Settled(Err(_)) => "rejected",
        }
    }
}

/// Creates a pending value together with the resolver that settles it.
///
/// # Example
///
/// ```
/// use qx::types::deferred;
///
/// let (resolver, value) = deferred::<i32, &str>();
/// assert!(value.is_pending());
///
/// assert!(resolver.fulfill(7));
/// assert!(!resolver.reject("too late"));
/// assert_eq!(value.try_outcome(), Some(Ok(7)));
/// ```
#[must_use]
pub fn deferred<T, E>() -> (Resolver<T, E>, AsyncValue<T, E>) {
    let state = Arc::new(Mutex::new(State::pending()));
    (
        Resolver {
            state: Arc::clone(&state),
        },
        AsyncValue { state },
    )
}

/// The producing half of an [`AsyncValue`].
///
/// Cloning a resolver yields another handle to the same value; whichever
/// handle settles first wins.
pub struct Resolver<T, E> {
    state: Arc<Mutex<State<T, E>>>,
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("state", &self.state.lock().describe())
            .finish()
    }
}

impl<T, E> Resolver<T, E> {
    /// Returns true once the value has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(*self.state.lock(), State::Settled(_))
    }
}

impl<T, E> Resolver<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Settles the value with `outcome`.
    ///
    /// Returns `false` (and changes nothing) if the value was already settled.
    /// Registered continuations run before this returns, or before the
    /// outermost settlement returns when called from inside a continuation.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        let (continuations, wakers) = {
            let mut state = self.state.lock();
            let State::Pending {
                continuations,
                wakers,
            } = &mut *state
            else {
                trace!("ignoring repeated settlement of an already-settled value");
                return false;
            };
            let continuations = std::mem::take(continuations);
            let wakers = std::mem::take(wakers);
            *state = State::Settled(outcome.clone());
            (continuations, wakers)
        };

        trace!(
            continuations = continuations.len(),
            fulfilled = outcome.is_ok(),
            "value settled"
        );
        if !continuations.is_empty() {
            let outcome = Rc::new(outcome);
            run_jobs(
                continuations
                    .into_iter()
                    .map(|continuation| {
                        let outcome = Rc::clone(&outcome);
                        Box::new(move || continuation(&outcome)) as Job
                    })
                    .collect(),
            );
        }
        for waker in wakers {
            waker.wake();
        }
        true
    }

    /// Fulfills the value. Returns `false` if it was already settled.
    pub fn fulfill(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the value. Returns `false` if it was already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }
}

/// A shared, single-assignment asynchronous value.
///
/// See the [module docs](self) for the settlement and continuation rules.
pub struct AsyncValue<T, E> {
    state: Arc<Mutex<State<T, E>>>,
}

impl<T, E> Clone for AsyncValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> fmt::Debug for AsyncValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncValue")
            .field("state", &self.state.lock().describe())
            .finish()
    }
}

impl<T, E> AsyncValue<T, E> {
    fn settled(outcome: Result<T, E>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Settled(outcome))),
        }
    }

    /// Wraps a plain value as an already-fulfilled `AsyncValue`.
    #[must_use]
    pub fn fulfilled(value: T) -> Self {
        Self::settled(Ok(value))
    }

    /// Wraps an error as an already-rejected `AsyncValue`.
    #[must_use]
    pub fn rejected(error: E) -> Self {
        Self::settled(Err(error))
    }

    /// Returns true while the value has not settled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(*self.state.lock(), State::Pending { .. })
    }

    /// Returns true if both handles refer to the same underlying value.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<T, E> AsyncValue<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Returns a copy of the outcome if the value has settled.
    #[must_use]
    pub fn try_outcome(&self) -> Option<Result<T, E>> {
        match &*self.state.lock() {
            State::Pending { .. } => None,
            State::Settled(outcome) => Some(outcome.clone()),
        }
    }

    /// Registers a raw continuation that observes the outcome by reference.
    ///
    /// Runs immediately, on a copy of the outcome, if the value has already
    /// settled.
    pub fn on_settle<F>(&self, continuation: F)
    where
        F: FnOnce(&Result<T, E>) + Send + 'static,
    {
        let outcome = {
            let mut state = self.state.lock();
            match &mut *state {
                State::Pending { continuations, .. } => {
                    continuations.push(Box::new(continuation));
                    return;
                }
                State::Settled(outcome) => outcome.clone(),
            }
        };
        continuation(&outcome);
    }

    /// Registers a continuation for each outcome, returning the chained value.
    ///
    /// Exactly one of the two handlers runs. Whatever it returns (a plain
    /// value, an error, or another pending value) settles the returned
    /// `AsyncValue`.
    pub fn then_or_else<U, E2, F, G>(&self, on_fulfilled: F, on_rejected: G) -> AsyncValue<U, E2>
    where
        U: Clone + Send + 'static,
        E2: Clone + Send + 'static,
        F: FnOnce(T) -> Eventual<U, E2> + Send + 'static,
        G: FnOnce(E) -> Eventual<U, E2> + Send + 'static,
    {
        let (resolver, chained) = deferred();
        self.on_settle(move |outcome| {
            let next = match outcome.clone() {
                Ok(value) => on_fulfilled(value),
                Err(error) => on_rejected(error),
            };
            next.forward_to(resolver);
        });
        chained
    }

    /// Chains a success continuation; rejections pass through untouched.
    pub fn then<U, F>(&self, on_fulfilled: F) -> AsyncValue<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Eventual<U, E> + Send + 'static,
    {
        self.then_or_else(on_fulfilled, Eventual::Error)
    }

    /// Chains a rejection handler; fulfilled values pass through untouched.
    pub fn catch<E2, G>(&self, on_rejected: G) -> AsyncValue<T, E2>
    where
        E2: Clone + Send + 'static,
        G: FnOnce(E) -> Eventual<T, E2> + Send + 'static,
    {
        self.then_or_else(Eventual::Value, on_rejected)
    }

    /// Chains a plain transformation of the fulfilled value.
    pub fn map_value<U, F>(&self, f: F) -> AsyncValue<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.then(move |value| Eventual::Value(f(value)))
    }
}

impl<T, E> From<Result<T, E>> for AsyncValue<T, E> {
    fn from(outcome: Result<T, E>) -> Self {
        Self::settled(outcome)
    }
}

impl<T: Clone, E: Clone> Future for AsyncValue<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.lock();
        match &mut *state {
            State::Settled(outcome) => Poll::Ready(outcome.clone()),
            State::Pending { wakers, .. } => {
                if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}
