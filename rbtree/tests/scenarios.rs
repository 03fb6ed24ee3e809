//! End-to-end scenarios against the base and both-cached trees.

mod common;

use common::{by_key, copy_key, items, Item};
use rbtree::{LRCachedTree, RbLink, RbTree};

unsafe fn in_order(tree: &RbTree<Item>) -> Vec<i32> {
    let mut out = Vec::new();
    tree.inorder_foreach(|item| out.push(item.key));
    out
}

#[test]
fn s1_ascending_insert() {
    let mut storage = items(&[1, 2, 3, 4, 5, 6, 7]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        assert_eq!(in_order(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(tree.first().unwrap().key == 1);
        assert!(tree.last().unwrap().key == 7);
    }
}

#[test]
fn s2_descending_insert() {
    let mut storage = items(&[7, 6, 5, 4, 3, 2, 1]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        assert_eq!(in_order(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
    }
}

#[test]
fn s3_duplicate_handling() {
    let mut storage = items(&[5, 3, 5, 5, 3, 7]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        assert_eq!(in_order(&tree), vec![3, 3, 5, 5, 5, 7]);

        for _ in 0..3 {
            let key = Item { link: RbLink::new(), key: 5 };
            assert!(tree.find(&key, by_key).is_some());
            tree.delete(&key, by_key, copy_key);
        }
        let key = Item { link: RbLink::new(), key: 5 };
        assert!(tree.find(&key, by_key).is_none());
        assert_eq!(in_order(&tree), vec![3, 3, 7]);
    }
}

#[test]
fn s4_delete_root_with_two_children() {
    let mut storage = items(&[10, 5, 15, 3, 7, 12, 20]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        let target = Item { link: RbLink::new(), key: 10 };
        tree.delete(&target, by_key, copy_key);

        assert_eq!(in_order(&tree), vec![3, 5, 7, 12, 15, 20]);
    }
}

#[test]
fn s5_cache_tracking() {
    let mut storage = items(&[4, 2, 6, 1, 5, 3, 7]);
    let mut tree: LRCachedTree<Item> = LRCachedTree::new();
    unsafe {
        let mut running_min = i32::MAX;
        let mut running_max = i32::MIN;
        for item in storage.iter_mut() {
            running_min = running_min.min(item.key);
            running_max = running_max.max(item.key);
            tree.insert(item.as_mut(), by_key);
            assert_eq!(tree.min().unwrap().key, running_min);
            assert_eq!(tree.max().unwrap().key, running_max);
        }

        let one = Item { link: RbLink::new(), key: 1 };
        tree.delete(&one, by_key, copy_key);
        assert_eq!(tree.min().unwrap().key, 2);

        let seven = Item { link: RbLink::new(), key: 7 };
        tree.delete(&seven, by_key, copy_key);
        assert_eq!(tree.max().unwrap().key, 6);

        for key in [2, 3, 4, 5, 6] {
            let k = Item { link: RbLink::new(), key };
            tree.delete(&k, by_key, copy_key);
        }
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert!(tree.is_empty());
    }
}

#[test]
fn double_ended_iterator_matches_first_last() {
    let mut storage = items(&[4, 2, 6, 1, 5, 3, 7]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        let forward: Vec<i32> = tree.iter().map(|i| i.key).collect();
        let mut backward: Vec<i32> = tree.iter().rev().map(|i| i.key).collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}

#[test]
fn insert_at_hint_matches_root_insert() {
    let mut storage = items(&[1, 2, 3, 4, 5]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        tree.insert(storage[0].as_mut(), by_key);
        tree.insert(storage[1].as_mut(), by_key);
        tree.insert(storage[2].as_mut(), by_key);

        let hint_ptr: *const Item = storage[2].as_ref();
        tree.insert_at(storage[3].as_mut(), &*hint_ptr, by_key);
        tree.insert_at(storage[4].as_mut(), &*hint_ptr, by_key);

        assert_eq!(in_order(&tree), vec![1, 2, 3, 4, 5]);
    }
}

#[test]
fn idempotent_delete_of_missing_key() {
    let mut storage = items(&[1, 2, 3]);
    let mut tree: RbTree<Item> = RbTree::new();
    unsafe {
        for item in storage.iter_mut() {
            tree.insert(item.as_mut(), by_key);
        }
        let missing = Item { link: RbLink::new(), key: 99 };
        assert!(tree.delete(&missing, by_key, copy_key).is_none());
        assert_eq!(in_order(&tree), vec![1, 2, 3]);
    }
}
