//! Component B: a BK-tree (Burkhard-Keller tree) over 64-bit hashes under
//! Hamming distance, with triangle-inequality pruning.
//!
//! Represented as an arena (`Vec<BkNode>`) rather than a pointer tree, per
//! the "pointer-heavy node graph -> arena + indices" design note: this
//! eliminates pointer chasing, makes `reset` a single `Vec::clear`, and
//! keeps traversal on an explicit work stack instead of recursion (query
//! depth can reach 64).

use std::collections::HashMap;

use crate::hash::{hamming_distance, Hash};

struct BkNode {
    val: Hash,
    children: HashMap<u8, u32>,
}

/// An in-memory BK-tree index over 64-bit hashes.
///
/// Not thread-safe; callers must serialize access (spec §4.B failure
/// semantics). Insert-only: node removal is not supported.
#[derive(Default)]
pub struct BkTree {
    nodes: Vec<BkNode>,
    root: Option<u32>,
}

impl BkTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node, returning the tree to empty.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Insert `x` into the tree. A no-op if `x` is an exact duplicate of an
    /// already-present value (detected when a descent step yields
    /// `distance == 0`). Terminates in at most 65 steps since edge labels
    /// along any descent path are pairwise distinct.
    pub fn insert(&mut self, x: Hash) {
        let Some(root) = self.root else {
            self.root = Some(self.push_node(x));
            return;
        };

        let mut cur = root;
        loop {
            let d = hamming_distance(x, self.nodes[cur as usize].val);
            if d == 0 {
                return; // exact duplicate
            }
            let edge = d as u8;
            match self.nodes[cur as usize].children.get(&edge) {
                Some(&child) => cur = child,
                None => {
                    let new_idx = self.push_node(x);
                    self.nodes[cur as usize].children.insert(edge, new_idx);
                    return;
                }
            }
        }
    }

    /// Whether the tree contains any value within Hamming distance `r` of
    /// `x`. `r < 0` is not representable (`r: u32`); callers needing that
    /// edge case should special-case it before calling. `r >= 64` returns
    /// true for any non-empty tree.
    pub fn any_within(&self, x: Hash, r: u32) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            let d = hamming_distance(x, node.val);
            if d <= r {
                return true;
            }
            push_prunable_children(node, d, r, &mut stack);
        }
        false
    }

    /// Collect every value within Hamming distance `r` of `x`. Order of
    /// results is unspecified.
    pub fn find_all_within(&self, x: Hash, r: u32) -> Vec<Hash> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            let d = hamming_distance(x, node.val);
            if d <= r {
                out.push(node.val);
            }
            push_prunable_children(node, d, r, &mut stack);
        }
        out
    }

    fn push_node(&mut self, val: Hash) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(BkNode {
            val,
            children: HashMap::new(),
        });
        idx
    }
}

/// Push children whose edge label `d` satisfies the triangle-inequality
/// window `[dist - r, dist + r]` onto `stack`. Other children cannot hold a
/// value within `r` of the query and are pruned.
fn push_prunable_children(node: &BkNode, dist: u32, r: u32, stack: &mut Vec<u32>) {
    let lo = dist.saturating_sub(r);
    let hi = dist + r;
    for (&edge, &child) in &node.children {
        let edge = edge as u32;
        if edge >= lo && edge <= hi {
            stack.push(child);
        }
    }
}
