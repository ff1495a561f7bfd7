//! Reproducible site generation.
//!
//! The random source is always passed in, so callers (and tests) decide
//! whether a diagram is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Point, Polygon};

/// Uniform random sites in `[0, width) x [0, height)`
pub fn random_sites<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f64, height: f64) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height))
        .collect()
}

/// Deterministic sites for a given seed, identical across platforms
pub fn seeded_sites(count: usize, width: f64, height: f64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_sites(&mut rng, count, width, height)
}

/// Uniform random sites inside a convex `bounds`, by rejection from its
/// bounding box. Empty when `bounds` has no area.
pub fn random_sites_in<R: Rng + ?Sized>(rng: &mut R, count: usize, bounds: &Polygon) -> Vec<Point> {
    let Some((min, max)) = bounds.bounding_box() else {
        return Vec::new();
    };
    if bounds.area() <= 0.0 {
        return Vec::new();
    }

    let (width, height) = (max.x - min.x, max.y - min.y);
    let mut sites = Vec::with_capacity(count);
    while sites.len() < count {
        let p = Point::new(
            min.x + rng.gen::<f64>() * width,
            min.y + rng.gen::<f64>() * height,
        );
        if bounds.contains(&p, 0.0) {
            sites.push(p);
        }
    }
    sites
}

/// Seeded counterpart of [`random_sites_in`]
pub fn seeded_sites_in(count: usize, bounds: &Polygon, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_sites_in(&mut rng, count, bounds)
}
