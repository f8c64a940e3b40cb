//! Component C: a disjoint-set forest over sparse 64-bit values, with path
//! splitting and union by rank, reporting a live component count in O(1).
//!
//! The teacher's own `UnionFind` is a dense `Vec`-indexed structure over a
//! pre-sized `0..n` domain with size-weighted union and path halving; our
//! domain is the sparse space of 64-bit hashes, so the representation
//! becomes a `HashMap` keyed by hash, and the merge rule follows spec
//! §4.C's rank-based tie-break instead of the teacher's size-based one.

use std::collections::HashMap;

struct Entry {
    parent: u64,
    rank: u8,
}

/// A union-find (disjoint-set) forest over `u64` values.
#[derive(Default)]
pub struct UnionFind {
    entries: HashMap<u64, Entry>,
    component_count: usize,
}

impl UnionFind {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, returning the forest to empty.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.component_count = 0;
    }

    /// Introduce `x` as its own representative if it is new. A no-op if `x`
    /// is already known.
    pub fn make_set(&mut self, x: u64) {
        self.entries.entry(x).or_insert_with(|| {
            self.component_count += 1;
            Entry { parent: x, rank: 0 }
        });
    }

    /// Return the representative of the set containing `x`, path-splitting
    /// every intermediate node to its grandparent along the way.
    ///
    /// `x` must have been previously introduced via [`make_set`] or
    /// [`union`]; calling this on an unknown value is a programmer error
    /// (spec §7 kind 2) and panics.
    ///
    /// [`make_set`]: UnionFind::make_set
    /// [`union`]: UnionFind::union
    pub fn find(&mut self, mut x: u64) -> u64 {
        loop {
            let parent = self
                .entries
                .get(&x)
                .unwrap_or_else(|| panic!("find() on value {x:#x} never introduced via make_set"))
                .parent;
            if parent == x {
                return x;
            }
            let grandparent = self.entries[&parent].parent;
            self.entries.get_mut(&x).unwrap().parent = grandparent;
            x = grandparent;
        }
    }

    /// Merge the sets containing `a` and `b`. Both must already exist
    /// (introduced via [`make_set`]). Attaches the lower-rank tree under
    /// the higher-rank one; on a tie, attaches either and increments the
    /// winner's rank. Decrements `component_count` iff a merge occurred.
    ///
    /// [`make_set`]: UnionFind::make_set
    pub fn union(&mut self, a: u64, b: u64) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }

        let rank_a = self.entries[&ra].rank;
        let rank_b = self.entries[&rb].rank;
        match rank_a.cmp(&rank_b) {
            std::cmp::Ordering::Less => {
                self.entries.get_mut(&ra).unwrap().parent = rb;
            }
            std::cmp::Ordering::Greater => {
                self.entries.get_mut(&rb).unwrap().parent = ra;
            }
            std::cmp::Ordering::Equal => {
                self.entries.get_mut(&rb).unwrap().parent = ra;
                self.entries.get_mut(&ra).unwrap().rank += 1;
            }
        }
        self.component_count -= 1;
    }

    /// The number of distinct representatives, maintained incrementally.
    pub fn component_count(&self) -> usize {
        self.component_count
    }
}
