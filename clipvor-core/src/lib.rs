//! Bounded planar Voronoi diagrams by half-plane clipping.
//!
//! Every cell starts as the convex bounding region and is clipped by the
//! perpendicular bisector between its site and each other site. Simple and
//! easy to verify at O(n² · h), intended for tens to a few hundred sites.
//!
//! The per-site loop runs serially or in parallel with Rayon
//! (`parallel` feature), and [`VoronoiComputer`] memoizes the last diagram.

mod backend;
mod cache;
mod cell;
mod clip;
mod diagram;
mod geometry;
mod site;
mod util;
mod voronoi;

pub use backend::{ComputeBackend, SerialBackend};
pub use cache::{structural_hash, CacheStats, DiagramCache};
pub use cell::{cell_at, duplicate_pairs, voronoi_cell, DuplicatePolicy};
pub use clip::{clip_polygon, HalfPlane};
pub use diagram::{compute_voronoi_diagram, VoronoiDiagram};
pub use geometry::{points_from_flat, points_to_flat, Point, Polygon};
pub use site::{random_sites, random_sites_in, seeded_sites, seeded_sites_in};
pub use voronoi::VoronoiComputer;

#[cfg(feature = "parallel")]
pub use backend::ParallelBackend;

/// Error type for Voronoi operations
#[derive(Debug, thiserror::Error)]
pub enum VoronoiError {
    #[error("Duplicate site: indices {first} and {second} share coordinates")]
    DuplicateSite { first: usize, second: usize },

    #[error("Site {index} has a non-finite coordinate")]
    NonFiniteSite { index: usize },

    #[cfg(feature = "parallel")]
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
