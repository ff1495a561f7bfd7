//! Per-site Voronoi cell construction by repeated bisector clipping.

use crate::clip::{clip_polygon, HalfPlane};
use crate::{Point, Polygon};

/// How coincident sites are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The lowest index among coincident sites keeps the cell; later
    /// duplicates get an empty polygon.
    #[default]
    FirstWins,
    /// Coincident sites do not split each other and end up with identical,
    /// overlapping cells.
    Overlap,
    /// Duplicate sites are an input error.
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-wins" | "first" => Ok(DuplicatePolicy::FirstWins),
            "overlap" => Ok(DuplicatePolicy::Overlap),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "unknown duplicate policy '{}' (expected first-wins, overlap, or reject)",
                s
            )),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DuplicatePolicy::FirstWins => "first-wins",
            DuplicatePolicy::Overlap => "overlap",
            DuplicatePolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Voronoi cell of `site` inside `bounds`.
///
/// `others` may be the full site set: entries equal to `site` are skipped, so
/// a coincident duplicate never splits the cell. Clipping stops early once the
/// cell is empty.
pub fn voronoi_cell(site: Point, others: &[Point], bounds: &Polygon) -> Polygon {
    let mut cell = bounds.clone();
    for other in others {
        if *other == site {
            continue;
        }
        if cell.is_empty() {
            break;
        }
        cell = clip_polygon(&cell, HalfPlane::bisector(site, *other));
    }
    cell
}

/// Cell of `sites[index]`, excluding the site itself by index.
///
/// Under [`DuplicatePolicy::FirstWins`] a site with a coincident site at a
/// lower index gets an empty cell. `Reject` is validated by the caller and
/// behaves like `Overlap` here.
///
/// # Panics
///
/// Panics if `index >= sites.len()`.
pub fn cell_at(sites: &[Point], index: usize, bounds: &Polygon, policy: DuplicatePolicy) -> Polygon {
    let site = sites[index];

    if policy == DuplicatePolicy::FirstWins && sites[..index].contains(&site) {
        return Polygon::empty();
    }

    let mut cell = bounds.clone();
    for (j, other) in sites.iter().enumerate() {
        if j == index || *other == site {
            continue;
        }
        if cell.is_empty() {
            break;
        }
        cell = clip_polygon(&cell, HalfPlane::bisector(site, *other));
    }
    cell
}

/// Index pairs `(first, second)` of coincident sites, `first < second`.
pub fn duplicate_pairs(sites: &[Point]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in sites.iter().enumerate() {
        for (j, b) in sites.iter().enumerate().skip(i + 1) {
            if a == b {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
