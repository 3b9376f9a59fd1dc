//! Property-based tests for AvlTree.
//!
//! These tests verify that AvlTree keeps its ordering and balance invariants
//! and that split and merge satisfy their partition laws, using proptest.

use arbor::collections::AvlTree;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Strategy for generating an AvlTree from a vector of keys.
fn arbitrary_tree(max_size: usize) -> impl Strategy<Value = AvlTree<i32>> {
    prop::collection::vec(-1000..1000_i32, 0..max_size)
        .prop_map(|keys| keys.into_iter().collect::<AvlTree<i32>>())
}

#[derive(Debug, Clone)]
enum Operation {
    Insert(i32),
    Delete(i32),
}

fn arbitrary_operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(
        prop_oneof![
            (0..200_i32).prop_map(Operation::Insert),
            (0..200_i32).prop_map(Operation::Delete),
        ],
        0..150,
    )
}

// =============================================================================
// Invariant Preservation Laws
// =============================================================================

proptest! {
    /// Law: every insert/delete leaves a valid tree whose contents match a
    /// reference set.
    #[test]
    fn prop_operations_preserve_invariants(operations in arbitrary_operations()) {
        let mut tree: AvlTree<i32> = AvlTree::new();
        let mut model = BTreeSet::new();

        for operation in operations {
            match operation {
                Operation::Insert(key) => {
                    tree.insert(key).unwrap();
                    model.insert(key);
                }
                Operation::Delete(key) => {
                    tree.delete(&key);
                    model.remove(&key);
                }
            }
            prop_assert!(tree.validate());
            prop_assert_eq!(tree.count_nodes(), model.len());
        }

        let expected: Vec<i32> = model.into_iter().collect();
        prop_assert_eq!(tree.inorder_traversal(), expected);
    }

    /// Law: search agrees with membership in the reference set.
    #[test]
    fn prop_search_matches_membership(
        inserted in prop::collection::vec(0..100_i32, 0..60),
        deleted in prop::collection::vec(0..100_i32, 0..30),
        probe in 0..100_i32
    ) {
        let mut tree: AvlTree<i32> = inserted.iter().copied().collect();
        let mut model: BTreeSet<i32> = inserted.into_iter().collect();
        for key in &deleted {
            tree.delete(key);
            model.remove(key);
        }
        prop_assert_eq!(tree.search(&probe), model.contains(&probe));
    }

    /// Law: traversal is strictly increasing and equals the sorted key set.
    #[test]
    fn prop_traversal_is_sorted_set(keys in prop::collection::vec(any::<i32>(), 0..100)) {
        let tree: AvlTree<i32> = keys.iter().copied().collect();
        let expected: Vec<i32> = keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let traversal = tree.inorder_traversal();
        prop_assert!(traversal.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(traversal, expected);
    }
}

// =============================================================================
// Split Laws
// =============================================================================

proptest! {
    /// Law: split partitions the keys around the pivot without loss or
    /// duplication, and both halves are valid.
    #[test]
    fn prop_split_partition_law(tree in arbitrary_tree(120), pivot in -1100..1100_i32) {
        let original = tree.inorder_traversal();
        let (low, high) = tree.split(&pivot);

        let low_keys = low.inorder_traversal();
        let high_keys = high.inorder_traversal();

        prop_assert!(low_keys.iter().all(|key| *key <= pivot));
        prop_assert!(high_keys.iter().all(|key| *key > pivot));

        let mut rejoined = low_keys;
        rejoined.extend(high_keys);
        prop_assert_eq!(rejoined, original);

        prop_assert!(low.validate());
        prop_assert!(high.validate());
    }
}

// =============================================================================
// Merge Laws
// =============================================================================

proptest! {
    /// Law: merging key-disjoint trees yields the concatenation of their keys.
    #[test]
    fn prop_merge_inverse_law(
        low_keys in prop::collection::vec(-500..0_i32, 0..100),
        high_keys in prop::collection::vec(0..500_i32, 0..100)
    ) {
        let low: AvlTree<i32> = low_keys.iter().copied().collect();
        let high: AvlTree<i32> = high_keys.iter().copied().collect();

        let mut expected = low.inorder_traversal();
        expected.extend(high.inorder_traversal());

        let merged = AvlTree::merge(low, high);
        prop_assert_eq!(merged.inorder_traversal(), expected);
        prop_assert!(merged.validate());
    }

    /// Law: merge(split(tree, pivot)) restores the original key sequence.
    #[test]
    fn prop_split_merge_round_trip(tree in arbitrary_tree(120), pivot in -1100..1100_i32) {
        let original = tree.inorder_traversal();
        let (low, high) = tree.split(&pivot);
        let merged = AvlTree::merge(low, high);
        prop_assert_eq!(merged.inorder_traversal(), original);
        prop_assert!(merged.validate());
    }

    /// Law: merged height never exceeds the taller input by more than one.
    #[test]
    fn prop_merge_height_bound(
        low_count in 0..200_i32,
        high_count in 0..200_i32
    ) {
        let low: AvlTree<i32> = (0..low_count).collect();
        let high: AvlTree<i32> = (low_count..low_count + high_count).collect();
        let bound = low.height().max(high.height()) + 1;

        let merged = AvlTree::merge(low, high);
        prop_assert!(merged.height() <= bound);
    }
}
