//! High-level memoizing Voronoi computer.

use crate::backend::ComputeBackend;
use crate::cache::{CacheStats, DiagramCache};
use crate::cell::{duplicate_pairs, DuplicatePolicy};
use crate::util::Timed;
use crate::{Point, Polygon, Result, VoronoiDiagram, VoronoiError};

/// Voronoi computer over a backend, with input validation and a memo cache
/// of the last diagram.
pub struct VoronoiComputer<B: ComputeBackend> {
    backend: B,
    policy: DuplicatePolicy,
    cache: DiagramCache,
}

impl<B: ComputeBackend> VoronoiComputer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            policy: DuplicatePolicy::default(),
            cache: DiagramCache::new(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.set_duplicate_policy(policy);
        self
    }

    /// Change the duplicate policy; the cached diagram is dropped.
    pub fn set_duplicate_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
        self.cache.invalidate();
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Diagram of `sites` clipped to `bounds`.
    ///
    /// Returns the cached diagram when neither input changed since the last
    /// call. Sites must have finite coordinates; duplicates are handled per
    /// the configured [`DuplicatePolicy`].
    pub fn compute(&mut self, sites: &[Point], bounds: &Polygon) -> Result<&VoronoiDiagram> {
        validate_sites(sites, self.policy)?;

        let backend = &self.backend;
        let policy = self.policy;
        self.cache.get_or_try_insert_with(sites, bounds, || {
            let _t = Timed::debug("Voronoi diagram");
            log::debug!(
                "computing {} cells with {} backend ({} bounding vertices)",
                sites.len(),
                backend.name(),
                bounds.len()
            );
            let cells = backend.compute_cells(sites, bounds, policy)?;
            Ok(VoronoiDiagram {
                sites: sites.to_vec(),
                cells,
                bounds: bounds.clone(),
            })
        })
    }

    /// Forget the cached diagram
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn validate_sites(sites: &[Point], policy: DuplicatePolicy) -> Result<()> {
    if let Some(index) = sites.iter().position(|p| !p.is_finite()) {
        return Err(VoronoiError::NonFiniteSite { index });
    }

    let pairs = duplicate_pairs(sites);
    if let Some(&(first, second)) = pairs.first() {
        if policy == DuplicatePolicy::Reject {
            return Err(VoronoiError::DuplicateSite { first, second });
        }
        log::warn!(
            "{} duplicate site pair(s), first at indices {} and {}; resolving with {}",
            pairs.len(),
            first,
            second,
            policy
        );
    }
    Ok(())
}
