//! Single-entry memo cache for the last computed diagram.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::{Point, Polygon, Result, VoronoiDiagram};

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Structural key over the exact bit patterns of every coordinate.
///
/// The hash makes the common "changed" case cheap; equal hashes are confirmed
/// by comparing every coordinate so a collision never serves a stale diagram.
#[derive(Debug, Clone)]
struct CacheKey {
    hash: u64,
    sites: Vec<Point>,
    bounds: Polygon,
}

impl CacheKey {
    fn new(sites: &[Point], bounds: &Polygon) -> Self {
        Self {
            hash: structural_hash(sites, bounds),
            sites: sites.to_vec(),
            bounds: bounds.clone(),
        }
    }

    fn matches(&self, hash: u64, sites: &[Point], bounds: &Polygon) -> bool {
        self.hash == hash
            && same_bits(&self.sites, sites)
            && same_bits(self.bounds.vertices(), bounds.vertices())
    }
}

fn same_bits(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(p, q)| {
            p.x.to_bits() == q.x.to_bits() && p.y.to_bits() == q.y.to_bits()
        })
}

/// Hash of `(sites, bounds)` over coordinate bit patterns
pub fn structural_hash(sites: &[Point], bounds: &Polygon) -> u64 {
    let mut hasher = DefaultHasher::new();
    for points in [sites, bounds.vertices()] {
        points.len().hash(&mut hasher);
        for p in points {
            p.x.to_bits().hash(&mut hasher);
            p.y.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

#[derive(Debug)]
struct CacheEntry {
    key: CacheKey,
    diagram: VoronoiDiagram,
}

/// Remembers the most recent diagram and recomputes only when the inputs
/// change.
#[derive(Debug, Default)]
pub struct DiagramCache {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

impl DiagramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached diagram for `(sites, bounds)`, computing it with `compute` when
    /// absent or stale. A failed computation leaves the cache empty.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        sites: &[Point],
        bounds: &Polygon,
        compute: F,
    ) -> Result<&VoronoiDiagram>
    where
        F: FnOnce() -> Result<VoronoiDiagram>,
    {
        let hash = structural_hash(sites, bounds);
        let entry = match self.entry.take() {
            Some(entry) if entry.key.matches(hash, sites, bounds) => {
                self.stats.hits += 1;
                log::trace!("diagram cache hit ({} sites)", sites.len());
                entry
            }
            _ => {
                self.stats.misses += 1;
                CacheEntry {
                    key: CacheKey::new(sites, bounds),
                    diagram: compute()?,
                }
            }
        };
        Ok(&self.entry.insert(entry).diagram)
    }

    /// Drop the cached diagram; the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
