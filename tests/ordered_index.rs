use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use inventory_tree::{OrderedIndex, OrderedSequence};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys in a range small enough to cause plenty of collisions.
fn key_strategy() -> impl Strategy<Value = i32> {
    -500i32..500i32
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum IndexOp {
    Upsert(i32, i64),
    Delete(i32),
    Find(i32),
    Snapshot,
}

fn index_op_strategy() -> impl Strategy<Value = IndexOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| IndexOp::Upsert(k, v)),
        3 => key_strategy().prop_map(IndexOp::Delete),
        2 => key_strategy().prop_map(IndexOp::Find),
        1 => Just(IndexOp::Snapshot),
    ]
}

fn strictly_increasing(keys: &[i32]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

// ─── Model-based tests ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OrderedIndex and
    /// BTreeMap and asserts identical results at every step.
    #[test]
    fn index_ops_match_btreemap(ops in proptest::collection::vec(index_op_strategy(), TEST_SIZE)) {
        let mut index: OrderedIndex<i64> = OrderedIndex::new();
        let mut model: BTreeMap<i32, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                IndexOp::Upsert(k, v) => {
                    index.upsert(*k, *v);
                    model.insert(*k, *v);
                }
                IndexOp::Delete(k) => {
                    let deleted = index.delete(*k);
                    prop_assert_eq!(deleted, model.remove(k).is_some(), "delete({})", k);
                }
                IndexOp::Find(k) => {
                    prop_assert_eq!(index.find(*k), model.get(k), "find({})", k);
                }
                IndexOp::Snapshot => {
                    let snapshot = index.snapshot();
                    let expected: Vec<i64> = model.values().copied().collect();
                    prop_assert_eq!(snapshot.as_slice(), expected.as_slice(), "snapshot");
                }
            }
            prop_assert_eq!(index.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(index.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let keys: Vec<i32> = index.keys().collect();
        prop_assert!(strictly_increasing(&keys));
        prop_assert_eq!(keys, model.keys().copied().collect::<Vec<_>>());
    }

    /// Every key ever upserted and not deleted is found with its latest value;
    /// every other key is absent.
    #[test]
    fn find_returns_latest_upsert(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let index: OrderedIndex<i64> = entries.iter().copied().collect();
        let model: BTreeMap<i32, i64> = entries.iter().copied().collect();

        for key in -500..500 {
            prop_assert_eq!(index.find(key), model.get(&key), "find({})", key);
        }
    }

    /// Deleting a present key removes only that key; other values are unchanged.
    #[test]
    fn delete_only_removes_its_key(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..500),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut index: OrderedIndex<i64> = entries.iter().copied().collect();
        let model: BTreeMap<i32, i64> = entries.iter().copied().collect();
        let victim = *pick.get(&model.keys().copied().collect::<Vec<_>>());

        prop_assert!(index.delete(victim));
        prop_assert_eq!(index.find(victim), None);
        for (key, value) in model.iter().filter(|(key, _)| **key != victim) {
            prop_assert_eq!(index.find(*key), Some(value));
        }
        prop_assert_eq!(index.len(), model.len() - 1);
    }

    /// Deleting an absent key leaves the index structurally equal to before.
    #[test]
    fn delete_absent_key_is_noop(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        absent in 1_000i32..2_000,
    ) {
        let mut index: OrderedIndex<i64> = entries.iter().copied().collect();
        let before = index.clone();

        prop_assert!(!index.delete(absent));
        prop_assert_eq!(index, before);
    }

    /// Upserting the same pair twice is the same as upserting it once.
    #[test]
    fn upsert_is_idempotent(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut once: OrderedIndex<i64> = entries.iter().copied().collect();
        let mut twice = once.clone();

        once.upsert(key, value);
        twice.upsert(key, value);
        twice.upsert(key, value);

        prop_assert_eq!(once.find(key), twice.find(key));
        prop_assert_eq!(once, twice);
    }

    /// Snapshots are disconnected copies of the current values.
    #[test]
    fn snapshot_is_independent(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..500)) {
        let mut index: OrderedIndex<i64> = entries.iter().copied().collect();
        let mut snapshot = index.snapshot();
        let expected = snapshot.clone();

        snapshot.clear();
        prop_assert_eq!(index.snapshot(), expected.clone());

        index.clear();
        prop_assert!(index.is_empty());
        prop_assert_eq!(expected.len(), entries.iter().map(|(k, _)| *k).collect::<std::collections::BTreeSet<_>>().len());
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

fn labelled(keys: &[i32]) -> OrderedIndex<String> {
    keys.iter().map(|&key| (key, format!("value-{key}"))).collect()
}

/// Removing a node with two children moves the successor's key *and* its own
/// value into the node. The successor's key briefly existing twice must never
/// leak a different node's value.
#[test]
fn two_child_delete_keeps_successor_value() {
    let mut index = labelled(&[50, 30, 70, 20, 40, 60, 80]);

    assert!(index.delete(50));
    assert_eq!(index.find(50), None);
    assert_eq!(index.find(60).map(String::as_str), Some("value-60"));

    for key in [20, 30, 40, 70, 80] {
        assert_eq!(index.find(key), Some(&format!("value-{key}")));
    }
    assert_eq!(index.keys().collect::<Vec<_>>(), [20, 30, 40, 60, 70, 80]);

    // 60 now sits at the root: removing it again takes the two-child path.
    assert!(index.delete(60));
    assert_eq!(index.find(70).map(String::as_str), Some("value-70"));
    assert_eq!(index.keys().collect::<Vec<_>>(), [20, 30, 40, 70, 80]);
}

#[test]
fn two_child_delete_with_deep_successor() {
    let mut index = labelled(&[50, 30, 90, 70, 60, 65, 95]);

    assert!(index.delete(50));
    assert_eq!(index.find(60).map(String::as_str), Some("value-60"));
    assert_eq!(index.find(65).map(String::as_str), Some("value-65"));
    assert_eq!(index.keys().collect::<Vec<_>>(), [30, 60, 65, 70, 90, 95]);
}

#[test]
fn delete_leaf_and_single_child_nodes() {
    let mut index = labelled(&[10, 5, 15, 12]);

    // leaf
    assert!(index.delete(5));
    // one child (12)
    assert!(index.delete(15));
    assert_eq!(index.keys().collect::<Vec<_>>(), [10, 12]);
    assert_eq!(index.find(12).map(String::as_str), Some("value-12"));

    assert!(index.delete(10));
    assert!(index.delete(12));
    assert!(index.is_empty());
    assert!(!index.delete(12));
}

#[test]
fn insertion_order_determines_shape() {
    let ascending = labelled(&(1..=64).collect::<Vec<_>>());
    let descending = labelled(&(1..=64).rev().collect::<Vec<_>>());
    let balanced = labelled(&[4, 2, 6, 1, 3, 5, 7]);

    assert_eq!(ascending.height(), 64);
    assert_eq!(descending.height(), 64);
    assert_eq!(balanced.height(), 3);

    // Same contents, different shapes.
    assert_eq!(ascending.snapshot(), descending.snapshot());
    assert_ne!(ascending, descending);
}

#[test]
fn snapshot_is_strictly_key_ordered_for_any_insertion_order() {
    let orders: [Vec<i32>; 3] = [
        (0..200).collect(),
        (0..200).rev().collect(),
        (0..200).map(|i| (i * 73) % 200).collect(),
    ];

    for keys in orders {
        let index: OrderedIndex<i32> = keys.iter().map(|&k| (k, k)).collect();
        let snapshot: OrderedSequence<i32> = index.snapshot();
        assert_eq!(snapshot.len(), 200);
        assert!(strictly_increasing(snapshot.as_slice()));
    }
}

#[test]
fn upsert_replaces_value_only() {
    let mut index = labelled(&[2, 1, 3]);
    let height = index.height();

    assert_eq!(index.insert(1, "replaced".to_string()), Some("value-1".to_string()));
    assert_eq!(index.find(1).map(String::as_str), Some("replaced"));
    assert_eq!(index.len(), 3);
    assert_eq!(index.height(), height);
    assert_eq!(index.first_key(), Some(1));
    assert_eq!(index.last_key(), Some(3));
}

#[test]
fn degenerate_tree_survives_deep_operations() {
    let mut index: OrderedIndex<u32> = OrderedIndex::new();
    for key in 0..10_000 {
        index.upsert(key, key.unsigned_abs());
    }
    assert_eq!(index.height(), 10_000);
    assert_eq!(index.find(9_999), Some(&9_999));
    assert_eq!(index.remove(9_999), Some(9_999));
    assert_eq!(index.snapshot().len(), 9_999);
    assert_eq!(index.iter().last(), Some((9_998, &9_998)));
}
