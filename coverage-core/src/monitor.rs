//! Component D: the coverage monitor. Drives the BK-tree and union-find in
//! lockstep to maintain an order-independent coverage metric, per spec §4.D.

use std::collections::HashSet;

use tracing::debug;

use crate::bktree::BkTree;
use crate::coverage::Coverage;
use crate::error::CoverageError;
use crate::hash::Hash;
use crate::unionfind::UnionFind;

/// Monitor configuration. The only recognized option is the Hamming-distance
/// radius under which two hashes are considered near (spec §6).
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub radius: u32,
}

impl MonitorConfig {
    /// Validate `radius` against spec's `[0, 64]` range. Radii greater than
    /// 63 are accepted here (spec caps distance semantics at 63 bits of
    /// actual difference, but 64 is the inclusive upper bound named in §3).
    pub fn new(radius: u32) -> Result<Self, CoverageError> {
        if radius > 64 {
            return Err(CoverageError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        // original_source/src/gamecov/dedup.py's hash_dedup default threshold.
        Self { radius: 5 }
    }
}

/// The shared surface both monitor variants (§4.D item 1 and item 2) expose.
pub trait CoverageMonitor {
    /// True iff `cov.path_id()` has already been ingested. Pure query.
    fn is_seen(&self, cov: &dyn Coverage) -> bool;

    /// Ingest a coverage record: dedupe its path-id, then fold in each
    /// not-yet-seen hash.
    fn add_cov(&mut self, cov: &dyn Coverage);

    /// The current order-independent coverage metric.
    fn coverage_count(&self) -> usize;

    /// Every distinct hash accepted so far.
    fn item_seen(&self) -> &HashSet<Hash>;

    /// Reset to the empty monitor atomically.
    fn reset(&mut self);
}

/// The required BK-tree + union-find monitor: accepts every distinct hash,
/// grouping near ones into connected components. Order-independent in both
/// `coverage_count` and `|item_seen|` (spec P3).
pub struct BkMonitor {
    config: MonitorConfig,
    path_seen: HashSet<String>,
    item_seen: HashSet<Hash>,
    bktree: BkTree,
    uf: UnionFind,
}

impl BkMonitor {
    /// Construct an empty monitor with the given configuration.
    pub fn new(config: MonitorConfig) -> Self {
        debug!(radius = config.radius, "constructing BkMonitor");
        Self {
            config,
            path_seen: HashSet::new(),
            item_seen: HashSet::new(),
            bktree: BkTree::new(),
            uf: UnionFind::new(),
        }
    }

    /// Construct an empty monitor with the default radius.
    pub fn with_default_config() -> Self {
        Self::new(MonitorConfig::default())
    }

    pub fn radius(&self) -> u32 {
        self.config.radius
    }
}

impl CoverageMonitor for BkMonitor {
    fn is_seen(&self, cov: &dyn Coverage) -> bool {
        self.path_seen.contains(cov.path_id())
    }

    fn add_cov(&mut self, cov: &dyn Coverage) {
        self.path_seen.insert(cov.path_id().to_string());

        for &h in cov.coverage() {
            if self.item_seen.contains(&h) {
                continue; // exact duplicate, skip
            }

            // The neighborhood query must run before `h` enters the
            // BK-tree, and make_set(h) must precede the unions below —
            // otherwise `h` would appear as its own neighbor and
            // find()/union() would see a value never introduced.
            let neighbors = self.bktree.find_all_within(h, self.config.radius);

            self.uf.make_set(h);
            let before = self.uf.component_count();
            for n in &neighbors {
                self.uf.union(h, *n);
            }
            if !neighbors.is_empty() && self.uf.component_count() < before {
                debug!(
                    hash = %format!("{h:#018x}"),
                    bridged = neighbors.len(),
                    components_before = before,
                    components_after = self.uf.component_count(),
                    "new hash bridged existing components"
                );
            }

            self.bktree.insert(h);
            self.item_seen.insert(h);
        }
    }

    fn coverage_count(&self) -> usize {
        self.uf.component_count()
    }

    fn item_seen(&self) -> &HashSet<Hash> {
        &self.item_seen
    }

    fn reset(&mut self) {
        self.path_seen.clear();
        self.item_seen.clear();
        self.bktree.clear();
        self.uf.clear();
    }
}

/// The optional greedy first-seen-wins monitor (spec §4.D item 1): accepts
/// a new hash only if no already-accepted hash is within radius of it.
/// Order-dependent — `coverage_count` is not a connected-components count,
/// it is simply `|item_seen|`, so the two do not diverge the way they can
/// for [`BkMonitor`]. Grounded on `original_source`'s plain `FrameMonitor`.
pub struct GreedyMonitor {
    radius: u32,
    path_seen: HashSet<String>,
    item_seen: HashSet<Hash>,
}

impl GreedyMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            radius: config.radius,
            path_seen: HashSet::new(),
            item_seen: HashSet::new(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(MonitorConfig::default())
    }
}

impl CoverageMonitor for GreedyMonitor {
    fn is_seen(&self, cov: &dyn Coverage) -> bool {
        self.path_seen.contains(cov.path_id())
    }

    fn add_cov(&mut self, cov: &dyn Coverage) {
        self.path_seen.insert(cov.path_id().to_string());

        for &h in cov.coverage() {
            if self.item_seen.contains(&h) {
                continue;
            }
            let is_dup = self
                .item_seen
                .iter()
                .any(|&seen| crate::hash::hamming_distance(h, seen) <= self.radius);
            if !is_dup {
                self.item_seen.insert(h);
            }
        }
    }

    fn coverage_count(&self) -> usize {
        self.item_seen.len()
    }

    fn item_seen(&self) -> &HashSet<Hash> {
        &self.item_seen
    }

    fn reset(&mut self) {
        self.path_seen.clear();
        self.item_seen.clear();
    }
}
