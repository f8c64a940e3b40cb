//! Approximate-near-neighbor index and component tracker for perceptual
//! hash frame coverage: a BK-tree over 64-bit hashes combined with a
//! union-find disjoint-set structure, plus the monitor protocol that drives
//! them.

pub mod bktree;
pub mod coverage;
pub mod error;
pub mod hash;
pub mod monitor;
pub mod unionfind;

pub use bktree::BkTree;
pub use coverage::{digest_path_id, Coverage, FrameCoverage};
pub use error::CoverageError;
pub use hash::{hamming_at_least, hamming_distance, pack_hash, unpack_hash, Hash};
pub use monitor::{BkMonitor, CoverageMonitor, GreedyMonitor, MonitorConfig};
pub use unionfind::UnionFind;
