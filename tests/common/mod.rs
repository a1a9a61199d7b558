#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use seqs::{LinkedList, Node};

/// Seeded generator so failures replay deterministically
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Collects the values of `list` by walking `after` from `first`
pub fn walk_forward<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = list.first();
    while let Some(node) = cursor {
        values.push(list.value(node).unwrap().clone());
        cursor = list.after(node).unwrap();
    }
    values
}

/// Collects the values of `list` by walking `before` from `last`, in front-to-back order
pub fn walk_backward<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = list.last();
    while let Some(node) = cursor {
        values.push(list.value(node).unwrap().clone());
        cursor = list.before(node).unwrap();
    }
    values.reverse();
    values
}

/// Returns the handles of `list` in order
pub fn handles<T>(list: &LinkedList<T>) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut cursor = list.first();
    while let Some(node) = cursor {
        nodes.push(node);
        cursor = list.after(node).unwrap();
    }
    nodes
}
