//! End-to-end behavior of the collection combinators.
//!
//! Settlement order is driven by hand through [`common::ManualValues`], so
//! timing-dependent outcomes are reproduced deterministically.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use common::{ManualValues, init_test_logging};
use futures_lite::future::block_on;
use qx::combinator::{AnyError, map_with};
use qx::{
    AsyncValue, Collection, CombinatorConfig, EmptyRacePolicy, Eventual, any, any_with_config,
    deferred, every, filter, map, some,
};

fn is_even(x: i32, _: usize) -> Eventual<bool, String> {
    Eventual::Value(x % 2 == 0)
}

fn is_odd(x: i32, _: usize) -> Eventual<bool, String> {
    Eventual::Value(x % 2 != 0)
}

#[test]
fn plain_collections_settle_synchronously() {
    init_test_logging();
    qx::test_phase!("plain_collections_settle_synchronously");

    let doubled: AsyncValue<Vec<i32>, String> =
        map(vec![1, 2, 3, 4], |x: i32, _: usize| Eventual::Value(x * 2));
    assert_eq!(doubled.try_outcome(), Some(Ok(vec![2, 4, 6, 8])));

    let evens: AsyncValue<Vec<i32>, String> =
        filter(vec![1, 2, 3, 4], |x: &i32, _: usize| Eventual::Value(x % 2 == 0));
    assert_eq!(evens.try_outcome(), Some(Ok(vec![2, 4])));

    assert_eq!(some(vec![1, 2, 3, 4], is_even).try_outcome(), Some(Ok(true)));
    assert_eq!(some(vec![1, 3, 5, 7], is_even).try_outcome(), Some(Ok(false)));
    assert_eq!(every(vec![1, 2, 3, 4], is_odd).try_outcome(), Some(Ok(false)));
    assert_eq!(every(vec![1, 3], is_odd).try_outcome(), Some(Ok(true)));
    qx::test_complete!("plain_collections_settle_synchronously");
}

#[test]
fn map_over_pending_elements_keeps_index_order() {
    init_test_logging();
    qx::test_phase!("map_over_pending_elements_keeps_index_order");
    let (values, pending) = ManualValues::<i32, String>::new(4);
    let result = map(Collection::of_pending(pending), |x: i32, i: usize| {
        Eventual::Value(format!("{i}:{x}"))
    });

    for (index, value) in [(3, 40), (1, 20), (0, 10)] {
        values.settle(index, Ok(value));
        assert!(result.is_pending());
    }
    values.settle(2, Ok(30));
    assert_eq!(
        result.try_outcome(),
        Some(Ok(vec![
            "0:10".to_string(),
            "1:20".to_string(),
            "2:30".to_string(),
            "3:40".to_string(),
        ]))
    );
    qx::test_complete!("map_over_pending_elements_keeps_index_order");
}

#[test]
fn map_reports_first_observed_failure() {
    init_test_logging();
    qx::test_phase!("map_reports_first_observed_failure");
    let (values, pending) = ManualValues::<i32, String>::new(3);
    let result = map(Collection::of_pending(pending), |x: i32, _: usize| Eventual::Value(x));

    values.settle(2, Err("third failed first".into()));
    values.settle(0, Err("first failed second".into()));
    values.settle(1, Ok(1));
    assert_eq!(result.try_outcome(), Some(Err("third failed first".to_string())));
    qx::test_complete!("map_reports_first_observed_failure");
}

#[test]
fn some_true_beats_a_later_rejection() {
    init_test_logging();
    qx::test_phase!("some_true_beats_a_later_rejection");
    let (verdicts, pending) = ManualValues::<bool, String>::new(4);
    let pending = Arc::new(pending);
    let result = some(vec![0, 1, 2, 3], move |_: i32, i: usize| {
        Eventual::Async(pending[i].clone())
    });

    verdicts.settle(1, Ok(true));
    verdicts.settle(3, Err("index 3 threw".into()));
    assert_eq!(result.try_outcome(), Some(Ok(true)));
    qx::test_complete!("some_true_beats_a_later_rejection");
}

#[test]
fn every_settles_false_without_waiting_for_slow_predicates() {
    init_test_logging();
    qx::test_phase!("every_settles_false_without_waiting_for_slow_predicates");
    let (verdicts, pending) = ManualValues::<bool, String>::new(4);
    let pending = Arc::new(pending);
    let result = every(vec![1, 2, 3, 4], move |_: i32, i: usize| {
        Eventual::Async(pending[i].clone())
    });

    verdicts.settle(0, Ok(true));
    verdicts.settle(1, Ok(false));
    assert_eq!(result.try_outcome(), Some(Ok(false)));
    qx::test_complete!("every_settles_false_without_waiting_for_slow_predicates");
}

#[test]
fn predicates_run_even_after_short_circuit() {
    init_test_logging();
    qx::test_phase!("predicates_run_even_after_short_circuit");
    let calls = Arc::new(AtomicUsize::new(0));
    let (sequence_resolver, sequence) = deferred::<Vec<i32>, String>();
    let calls_in = Arc::clone(&calls);
    let result = some(sequence, move |x: i32, _: usize| {
        calls_in.fetch_add(1, Ordering::SeqCst);
        Eventual::Value(x == 0)
    });

    sequence_resolver.fulfill(vec![0, 1, 2, 3]);
    assert_eq!(result.try_outcome(), Some(Ok(true)));
    assert_eq!(calls.load(Ordering::SeqCst), 4, "no cancellation of sibling work");
    qx::test_complete!("predicates_run_even_after_short_circuit");
}

#[test]
fn any_returns_fastest_and_aggregates_rejections() {
    init_test_logging();
    qx::test_phase!("any_returns_fastest_and_aggregates_rejections");

    qx::test_section!("fastest wins");
    let (values, pending) = ManualValues::<&str, String>::new(3);
    let winner = any(pending);
    values.settle(2, Ok("third"));
    values.settle(0, Ok("first"));
    assert_eq!(winner.try_outcome(), Some(Ok("third")));

    qx::test_section!("all rejected");
    let (values, pending) = ManualValues::<&str, String>::new(3);
    let loser = any(pending);
    values.settle(1, Err("b".into()));
    values.settle(0, Err("a".into()));
    assert!(loser.is_pending(), "one value still outstanding");
    values.settle(2, Err("c".into()));
    assert_eq!(
        loser.try_outcome(),
        Some(Err(AnyError::AllRejected {
            first: "b".to_string(),
            rejected: 3,
        }))
    );
    qx::test_complete!("any_returns_fastest_and_aggregates_rejections");
}

#[test]
fn pending_empty_race_is_an_identity_for_any() {
    init_test_logging();
    qx::test_phase!("pending_empty_race_is_an_identity_for_any");
    let config = CombinatorConfig::new().empty_race(EmptyRacePolicy::Pending);
    let never = any_with_config(Vec::<AsyncValue<i32, String>>::new(), &config)
        .catch(|e: AnyError<String>| Eventual::Error(e.to_string()));

    let (resolver, value) = deferred::<i32, String>();
    let raced = any([value, never]);
    assert!(raced.is_pending());
    resolver.fulfill(42);
    assert_eq!(raced.try_outcome(), Some(Ok(42)));
    qx::test_complete!("pending_empty_race_is_an_identity_for_any");
}

#[test]
fn curried_shape_agrees_with_core_call() {
    init_test_logging();
    qx::test_phase!("curried_shape_agrees_with_core_call");
    let triple = map_with(|x: i32, _: usize| Eventual::<i32, String>::Value(x * 3));
    for input in [vec![], vec![1], vec![4, 5, 6]] {
        let direct: AsyncValue<Vec<i32>, String> =
            map(input.clone(), |x: i32, _: usize| Eventual::Value(x * 3));
        assert_eq!(triple(input).try_outcome(), direct.try_outcome());
    }
    qx::test_complete!("curried_shape_agrees_with_core_call");
}

#[test]
fn results_can_be_awaited_across_threads() {
    init_test_logging();
    qx::test_phase!("results_can_be_awaited_across_threads");
    let (values, pending) = ManualValues::<u64, String>::new(3);
    let result = map(Collection::of_pending(pending), |x: u64, _: usize| {
        Eventual::Value(x * x)
    });

    let producer = thread::spawn(move || {
        for index in [2, 0, 1] {
            values.settle(index, Ok(index as u64 + 1));
        }
    });

    let squares = block_on(result);
    producer.join().expect("producer thread panicked");
    assert_eq!(squares, Ok(vec![1, 4, 9]));
    qx::test_complete!("results_can_be_awaited_across_threads");
}
