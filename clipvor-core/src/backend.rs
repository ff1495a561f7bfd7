//! Compute backends: how the per-site cell loop is executed.

use crate::cell::DuplicatePolicy;
use crate::diagram::compute_cells_serial;
use crate::{Point, Polygon, Result};

/// Trait for Voronoi computation backends
pub trait ComputeBackend {
    /// Compute one cell per site, aligned with `sites`
    fn compute_cells(
        &self,
        sites: &[Point],
        bounds: &Polygon,
        policy: DuplicatePolicy,
    ) -> Result<Vec<Polygon>>;

    /// Short name for diagnostics
    fn name(&self) -> &'static str;
}

impl<B: ComputeBackend + ?Sized> ComputeBackend for Box<B> {
    fn compute_cells(
        &self,
        sites: &[Point],
        bounds: &Polygon,
        policy: DuplicatePolicy,
    ) -> Result<Vec<Polygon>> {
        (**self).compute_cells(sites, bounds, policy)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Single-threaded backend
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialBackend;

impl ComputeBackend for SerialBackend {
    fn compute_cells(
        &self,
        sites: &[Point],
        bounds: &Polygon,
        policy: DuplicatePolicy,
    ) -> Result<Vec<Polygon>> {
        Ok(compute_cells_serial(sites, bounds, policy))
    }

    fn name(&self) -> &'static str {
        "serial"
    }
}

#[cfg(feature = "parallel")]
pub use parallel::ParallelBackend;

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use super::ComputeBackend;
    use crate::cell::{cell_at, DuplicatePolicy};
    use crate::{Point, Polygon, Result};

    /// Rayon backend: cells are independent, so sites are processed in
    /// parallel and collected in input order.
    #[derive(Debug)]
    pub struct ParallelBackend {
        num_threads: usize,
        pool: Option<rayon::ThreadPool>,
    }

    impl ParallelBackend {
        pub fn new() -> Self {
            Self { num_threads: 0, pool: None }
        }

        /// Backend with a dedicated pool of `num_threads` threads
        /// (0 = Rayon global pool).
        pub fn with_threads(num_threads: usize) -> Result<Self> {
            let pool = if num_threads == 0 {
                None
            } else {
                Some(
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(num_threads)
                        .build()?,
                )
            };
            Ok(Self { num_threads, pool })
        }

        /// Number of threads (0 = Rayon global pool)
        pub fn num_threads(&self) -> usize {
            self.num_threads
        }
    }

    impl Default for ParallelBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ComputeBackend for ParallelBackend {
        fn compute_cells(
            &self,
            sites: &[Point],
            bounds: &Polygon,
            policy: DuplicatePolicy,
        ) -> Result<Vec<Polygon>> {
            let run = || -> Vec<Polygon> {
                (0..sites.len())
                    .into_par_iter()
                    .map(|i| cell_at(sites, i, bounds, policy))
                    .collect()
            };
            Ok(match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            })
        }

        fn name(&self) -> &'static str {
            "parallel"
        }
    }
}
