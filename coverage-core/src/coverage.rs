//! The `Coverage` protocol (spec §3/§9 "protocol polymorphism"): an
//! interface with exactly three accessors. The monitor only ever reads
//! `coverage` and `path_id`; `trace` is unused by the core and need not be
//! materialized eagerly.

use std::collections::HashSet;

use sha1::{Digest, Sha1};

use crate::hash::Hash;

/// A set of hashes observed during one execution trace, plus a stable
/// identifier of that trace.
pub trait Coverage {
    /// The set of unique hashes observed (order-irrelevant).
    fn coverage(&self) -> &HashSet<Hash>;

    /// A stable string identifier derived from `coverage()` alone
    /// (order-independent — different sets should produce different ids
    /// with overwhelming probability).
    fn path_id(&self) -> &str;

    /// An ordered sequence of hashes as originally observed. Not used by
    /// the monitor; implementations may leave this empty until something
    /// outside the core actually needs it.
    fn trace(&self) -> &[Hash];
}

/// A concrete [`Coverage`] built from an already-computed hash set.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCoverage {
    coverage: HashSet<Hash>,
    path_id: String,
    trace: Vec<Hash>,
}

impl FrameCoverage {
    /// Build a `FrameCoverage` from a hash set, computing `path_id` via
    /// [`digest_path_id`]. `trace` is left empty (see [`Coverage::trace`]).
    pub fn new(coverage: HashSet<Hash>) -> Self {
        let path_id = digest_path_id(&coverage);
        Self {
            coverage,
            path_id,
            trace: Vec::new(),
        }
    }

    /// Build a `FrameCoverage` that also retains the ordered trace the
    /// hashes were originally observed in.
    pub fn with_trace(coverage: HashSet<Hash>, trace: Vec<Hash>) -> Self {
        let path_id = digest_path_id(&coverage);
        Self {
            coverage,
            path_id,
            trace,
        }
    }
}

impl Coverage for FrameCoverage {
    fn coverage(&self) -> &HashSet<Hash> {
        &self.coverage
    }

    fn path_id(&self) -> &str {
        &self.path_id
    }

    fn trace(&self) -> &[Hash] {
        &self.trace
    }
}

/// Compute the path-id contract of spec §6: digest the lexicographically
/// sorted, big-endian-packed bytes of the coverage set's members with
/// SHA-1. Order-independent by construction (the sort happens before the
/// digest), matching `original_source`'s
/// `hashlib.sha1(str(sorted(...)).encode())`.
pub fn digest_path_id(hashes: &HashSet<Hash>) -> String {
    let mut sorted: Vec<Hash> = hashes.iter().copied().collect();
    sorted.sort_unstable();

    let mut hasher = Sha1::new();
    for h in sorted {
        hasher.update(h.to_be_bytes());
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_order_independent() {
        let a: HashSet<Hash> = [1u64, 2, 3].into_iter().collect();
        let b: HashSet<Hash> = [3u64, 1, 2].into_iter().collect();
        assert_eq!(digest_path_id(&a), digest_path_id(&b));
    }

    #[test]
    fn digest_differs_for_different_sets() {
        let a: HashSet<Hash> = [1u64, 2, 3].into_iter().collect();
        let b: HashSet<Hash> = [1u64, 2, 4].into_iter().collect();
        assert_ne!(digest_path_id(&a), digest_path_id(&b));
    }

    #[test]
    fn digest_is_deterministic() {
        let a: HashSet<Hash> = [7u64, 8, 9].into_iter().collect();
        assert_eq!(digest_path_id(&a), digest_path_id(&a));
    }

    #[test]
    fn frame_coverage_exposes_path_id_from_its_set() {
        let set: HashSet<Hash> = [10u64, 20].into_iter().collect();
        let cov = FrameCoverage::new(set.clone());
        assert_eq!(cov.path_id(), digest_path_id(&set));
        assert_eq!(cov.coverage(), &set);
        assert!(cov.trace().is_empty());
    }

    #[test]
    fn frame_coverage_with_trace_retains_order() {
        let set: HashSet<Hash> = [10u64, 20].into_iter().collect();
        let trace = vec![20u64, 10, 20];
        let cov = FrameCoverage::with_trace(set, trace.clone());
        assert_eq!(cov.trace(), trace.as_slice());
    }
}
