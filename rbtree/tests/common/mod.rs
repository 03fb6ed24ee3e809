//! Shared fixture for the integration test suite: a minimal intrusive node
//! type keyed by an `i32`, ordered by plain `i32` comparison.

use rbtree::{intrusive_adapter, node_init, RbLink};
use std::cmp::Ordering;

pub struct Item {
    pub link: RbLink,
    pub key: i32,
}

intrusive_adapter!(Item, link);

pub fn by_key(a: &Item, b: &Item) -> Ordering {
    a.key.cmp(&b.key)
}

pub fn copy_key(src: &Item, dst: &mut Item) {
    dst.key = src.key;
}

pub fn items(keys: &[i32]) -> Vec<Box<Item>> {
    keys.iter()
        .map(|&key| {
            let mut item = Box::new(Item { link: RbLink::new(), key });
            node_init(&mut *item);
            item
        })
        .collect()
}
