//! Order-statistics multiset backing the sliding-window rank.
//!
//! An arena-backed AVL tree keyed by value. Equal values share one node with a
//! multiplicity, and each node caches the total multiplicity of its subtree, so
//! insert, remove-one and the `count_less` / `count_le` queries are all O(log w).

use crate::types::canonical;
use std::cmp::Ordering;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Node {
    key: f64,
    count: usize,
    size: usize,
    height: u32,
    left: usize,
    right: usize,
}

#[derive(Debug, Clone)]
pub struct OrderedWindow {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: usize,
}

impl Default for OrderedWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedWindow {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NIL,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: NIL,
        }
    }

    /// Number of values held, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.size(self.root)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = NIL;
    }

    pub fn insert(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "OrderedWindow only holds finite values");
        self.root = self.insert_at(self.root, canonical(value));
    }

    /// Removes one instance equal to `value`. Returns `false` if none was present.
    pub fn remove(&mut self, value: f64) -> bool {
        let (root, removed) = self.remove_at(self.root, canonical(value));
        self.root = root;
        removed
    }

    /// Number of held values strictly less than `value`.
    pub fn count_less(&self, value: f64) -> usize {
        let key = canonical(value);
        let mut acc = 0usize;
        let mut idx = self.root;
        while idx != NIL {
            let node = &self.nodes[idx];
            if node.key.total_cmp(&key) == Ordering::Less {
                acc += self.size(node.left) + node.count;
                idx = node.right;
            } else {
                idx = node.left;
            }
        }
        acc
    }

    /// Number of held values less than or equal to `value`.
    pub fn count_le(&self, value: f64) -> usize {
        let key = canonical(value);
        let mut acc = 0usize;
        let mut idx = self.root;
        while idx != NIL {
            let node = &self.nodes[idx];
            if node.key.total_cmp(&key) != Ordering::Greater {
                acc += self.size(node.left) + node.count;
                idx = node.right;
            } else {
                idx = node.left;
            }
        }
        acc
    }

    /// 1-based rank of `value` with ties averaged: `(count_less + 1 + count_le) / 2`.
    ///
    /// Meaningful when `value` is itself held; otherwise it reports the midpoint
    /// of the gap `value` would fall into.
    #[inline]
    pub fn average_rank(&self, value: f64) -> f64 {
        (self.count_less(value) + 1 + self.count_le(value)) as f64 * 0.5
    }

    pub fn min(&self) -> Option<f64> {
        let mut idx = self.root;
        if idx == NIL {
            return None;
        }
        while self.nodes[idx].left != NIL {
            idx = self.nodes[idx].left;
        }
        Some(self.nodes[idx].key)
    }

    pub fn max(&self) -> Option<f64> {
        let mut idx = self.root;
        if idx == NIL {
            return None;
        }
        while self.nodes[idx].right != NIL {
            idx = self.nodes[idx].right;
        }
        Some(self.nodes[idx].key)
    }

    #[inline]
    fn size(&self, idx: usize) -> usize {
        if idx == NIL {
            0
        } else {
            self.nodes[idx].size
        }
    }

    #[inline]
    fn height(&self, idx: usize) -> u32 {
        if idx == NIL {
            0
        } else {
            self.nodes[idx].height
        }
    }

    fn alloc(&mut self, key: f64) -> usize {
        let node = Node {
            key,
            count: 1,
            size: 1,
            height: 1,
            left: NIL,
            right: NIL,
        };
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    #[inline]
    fn update(&mut self, idx: usize) {
        let (left, right, count) = {
            let node = &self.nodes[idx];
            (node.left, node.right, node.count)
        };
        let height = 1 + self.height(left).max(self.height(right));
        let size = count + self.size(left) + self.size(right);
        let node = &mut self.nodes[idx];
        node.height = height;
        node.size = size;
    }

    fn rotate_right(&mut self, idx: usize) -> usize {
        let pivot = self.nodes[idx].left;
        self.nodes[idx].left = self.nodes[pivot].right;
        self.update(idx);
        self.nodes[pivot].right = idx;
        self.update(pivot);
        pivot
    }

    fn rotate_left(&mut self, idx: usize) -> usize {
        let pivot = self.nodes[idx].right;
        self.nodes[idx].right = self.nodes[pivot].left;
        self.update(idx);
        self.nodes[pivot].left = idx;
        self.update(pivot);
        pivot
    }

    fn rebalance(&mut self, idx: usize) -> usize {
        self.update(idx);
        let left = self.nodes[idx].left;
        let right = self.nodes[idx].right;
        let left_h = self.height(left);
        let right_h = self.height(right);
        if left_h > right_h + 1 {
            if self.height(self.nodes[left].left) < self.height(self.nodes[left].right) {
                self.nodes[idx].left = self.rotate_left(left);
            }
            return self.rotate_right(idx);
        }
        if right_h > left_h + 1 {
            if self.height(self.nodes[right].right) < self.height(self.nodes[right].left) {
                self.nodes[idx].right = self.rotate_right(right);
            }
            return self.rotate_left(idx);
        }
        idx
    }

    fn insert_at(&mut self, idx: usize, key: f64) -> usize {
        if idx == NIL {
            return self.alloc(key);
        }
        match key.total_cmp(&self.nodes[idx].key) {
            Ordering::Equal => {
                self.nodes[idx].count += 1;
                self.nodes[idx].size += 1;
                return idx;
            }
            Ordering::Less => {
                let left = self.insert_at(self.nodes[idx].left, key);
                self.nodes[idx].left = left;
            }
            Ordering::Greater => {
                let right = self.insert_at(self.nodes[idx].right, key);
                self.nodes[idx].right = right;
            }
        }
        self.rebalance(idx)
    }

    fn remove_at(&mut self, idx: usize, key: f64) -> (usize, bool) {
        if idx == NIL {
            return (NIL, false);
        }
        match key.total_cmp(&self.nodes[idx].key) {
            Ordering::Less => {
                let (left, removed) = self.remove_at(self.nodes[idx].left, key);
                self.nodes[idx].left = left;
                if !removed {
                    return (idx, false);
                }
            }
            Ordering::Greater => {
                let (right, removed) = self.remove_at(self.nodes[idx].right, key);
                self.nodes[idx].right = right;
                if !removed {
                    return (idx, false);
                }
            }
            Ordering::Equal => {
                if self.nodes[idx].count > 1 {
                    self.nodes[idx].count -= 1;
                    self.nodes[idx].size -= 1;
                    return (idx, true);
                }
                let left = self.nodes[idx].left;
                let right = self.nodes[idx].right;
                self.free.push(idx);
                if left == NIL {
                    return (right, true);
                }
                if right == NIL {
                    return (left, true);
                }
                let (right, successor) = self.detach_min(right);
                self.nodes[successor].left = left;
                self.nodes[successor].right = right;
                return (self.rebalance(successor), true);
            }
        }
        (self.rebalance(idx), true)
    }

    /// Unlinks the minimum node of the subtree. Returns `(new_subtree_root, detached)`.
    fn detach_min(&mut self, idx: usize) -> (usize, usize) {
        let left = self.nodes[idx].left;
        if left == NIL {
            return (self.nodes[idx].right, idx);
        }
        let (left, min_idx) = self.detach_min(left);
        self.nodes[idx].left = left;
        (self.rebalance(idx), min_idx)
    }
}
