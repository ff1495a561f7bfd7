//! Whole-diagram computation and result type.

use crate::cell::{cell_at, DuplicatePolicy};
use crate::{Point, Polygon};

/// Result of a Voronoi computation
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram {
    /// Input sites, in input order
    pub sites: Vec<Point>,
    /// One cell per site, aligned with `sites`
    pub cells: Vec<Polygon>,
    /// Region the cells tile
    pub bounds: Polygon,
}

impl VoronoiDiagram {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `(site, cell)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &Polygon)> {
        self.sites.iter().zip(self.cells.iter())
    }

    pub fn cell_areas(&self) -> Vec<f64> {
        self.cells.iter().map(Polygon::area).collect()
    }

    pub fn cell_centroids(&self) -> Vec<Point> {
        self.cells.iter().map(Polygon::centroid).collect()
    }

    /// Sum of all cell areas; equals the bounds area for distinct sites
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(Polygon::area).sum()
    }

    /// Number of cells with no area
    pub fn degenerate_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_degenerate()).count()
    }
}

/// Compute one cell per site, clipped to `bounds`.
///
/// Total over its inputs: an empty site list gives an empty result, and
/// coincident sites are resolved with [`DuplicatePolicy::FirstWins`].
/// `bounds` must be convex with at least three vertices.
pub fn compute_voronoi_diagram(sites: &[Point], bounds: &Polygon) -> Vec<Polygon> {
    compute_cells_serial(sites, bounds, DuplicatePolicy::FirstWins)
}

pub(crate) fn compute_cells_serial(
    sites: &[Point],
    bounds: &Polygon,
    policy: DuplicatePolicy,
) -> Vec<Polygon> {
    (0..sites.len())
        .map(|i| cell_at(sites, i, bounds, policy))
        .collect()
}
