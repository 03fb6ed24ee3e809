//! Randomized coverage of the both-cached tree's `min`/`max` bookkeeping
//! across insert and delete, using the public `Tree` API so every delete
//! goes through the same find-then-unlink path real callers use.

mod common;

use common::{by_key, copy_key, items, Item};
use proptest::prelude::*;
use rbtree::LRCachedTree;

fn assert_cache_matches(tree: &LRCachedTree<Item>) {
    unsafe {
        assert_eq!(
            tree.min().map(|i| i.key),
            tree.first().map(|i| i.key),
            "cached min diverged from first()"
        );
        assert_eq!(
            tree.max().map(|i| i.key),
            tree.last().map(|i| i.key),
            "cached max diverged from last()"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 20, .. ProptestConfig::default() })]

    /// Inserts keys in the generated order, then deletes them in an
    /// independently shuffled order, checking after every mutation that the
    /// O(1) cached min/max agree with a full in-order scan.
    #[test]
    fn cache_tracks_first_last_under_random_mutation(
        (keys, priorities) in proptest::collection::vec(0i32..500, 1..200).prop_flat_map(|keys| {
            let len = keys.len();
            (Just(keys), proptest::collection::vec(any::<u32>(), len))
        })
    ) {
        let mut storage = items(&keys);
        let mut tree: LRCachedTree<Item> = LRCachedTree::new();

        unsafe {
            for item in storage.iter_mut() {
                tree.insert(item.as_mut(), by_key);
                assert_cache_matches(&tree);
            }

            let mut order: Vec<usize> = (0..keys.len()).collect();
            order.sort_by_key(|&i| priorities[i]);

            for &i in &order {
                let probe = Item { link: Default::default(), key: keys[i] };
                tree.delete(&probe, by_key, copy_key);
                assert_cache_matches(&tree);
            }

            prop_assert!(tree.is_empty());
            prop_assert!(tree.min().is_none());
            prop_assert!(tree.max().is_none());
        }

        drop(storage);
    }
}
