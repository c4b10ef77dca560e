//! Property tests: combinator results do not depend on settlement order.

mod common;

use common::{ManualValues, init_test_logging, shuffled_order, test_proptest_config};
use proptest::prelude::*;
use qx::combinator::AnyError;
use qx::{AsyncValue, Collection, Eventual, every, filter, map, some};

fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1000i32..1000, 0..24)
}

/// Builds pending elements and settles them with `values` in a seeded order.
fn settle_shuffled(values: &[i32], seed: u64) -> (ManualValues<i32, String>, Vec<usize>, Collection<i32, String>) {
    let (manual, pending) = ManualValues::new(values.len());
    (manual, shuffled_order(values.len(), seed), Collection::of_pending(pending))
}

proptest! {
    #![proptest_config(test_proptest_config(200))]

    /// map equals elementwise application in index order.
    #[test]
    fn map_matches_elementwise(values in arb_values(), seed in any::<u64>()) {
        init_test_logging();
        let (manual, order, collection) = settle_shuffled(&values, seed);
        let result = map(collection, |x: i32, i: usize| {
            Eventual::Value(i64::from(x) * 3 + i as i64)
        });
        for index in order {
            manual.settle(index, Ok(values[index]));
        }
        let expected: Vec<i64> = values
            .iter()
            .enumerate()
            .map(|(i, &x)| i64::from(x) * 3 + i as i64)
            .collect();
        prop_assert_eq!(result.try_outcome(), Some(Ok(expected)));
    }

    /// filter keeps exactly the matching elements, in order.
    #[test]
    fn filter_matches_iterator_filter(values in arb_values(), seed in any::<u64>()) {
        init_test_logging();
        let (manual, order, collection) = settle_shuffled(&values, seed);
        let result = filter(collection, |x: &i32, _: usize| Eventual::Value(x % 3 == 0));
        for index in order {
            manual.settle(index, Ok(values[index]));
        }
        let expected: Vec<i32> = values.iter().copied().filter(|x| x % 3 == 0).collect();
        prop_assert_eq!(result.try_outcome(), Some(Ok(expected)));
    }

    /// Without rejections, some/every agree with Iterator::any/all.
    #[test]
    fn short_circuit_matches_iterator(values in arb_values(), seed in any::<u64>()) {
        init_test_logging();
        let (some_manual, order, some_input) = settle_shuffled(&values, seed);
        let (every_manual, _, every_input) = settle_shuffled(&values, seed);
        let found = some(some_input, |x: i32, _: usize| Eventual::Value(x > 500));
        let all = every(every_input, |x: i32, _: usize| Eventual::Value(x > -500));
        for &index in &order {
            some_manual.settle(index, Ok(values[index]));
            every_manual.settle(index, Ok(values[index]));
        }
        prop_assert_eq!(found.try_outcome(), Some(Ok(values.iter().any(|&x| x > 500))));
        prop_assert_eq!(all.try_outcome(), Some(Ok(values.iter().all(|&x| x > -500))));
    }

    /// any resolves to the first fulfilled value in settlement order, or
    /// reports the first rejection once all have rejected.
    #[test]
    fn any_follows_settlement_order(
        outcomes in prop::collection::vec(prop::option::of(0i32..100), 1..16),
        seed in any::<u64>(),
    ) {
        init_test_logging();
        let (manual, pending) = ManualValues::<i32, String>::new(outcomes.len());
        let order = shuffled_order(outcomes.len(), seed);
        let winner: AsyncValue<i32, AnyError<String>> = qx::any(pending);
        for &index in &order {
            let outcome = outcomes[index].ok_or_else(|| format!("slot {index}"));
            manual.settle(index, outcome);
        }

        let first_fulfilled = order.iter().find_map(|&index| outcomes[index]);
        let expected = first_fulfilled.map_or_else(
            || Err(AnyError::AllRejected {
                first: format!("slot {}", order[0]),
                rejected: outcomes.len(),
            }),
            Ok,
        );
        prop_assert_eq!(winner.try_outcome(), Some(expected));
    }
}
