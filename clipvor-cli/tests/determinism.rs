//! End-to-end tests verifying deterministic, well-formed diagrams.
//!
//! These tests ensure that given the same seed the computed cells are
//! identical across runs and backends, and that every diagram tiles its
//! bounding region.

use approx::assert_relative_eq;
use clipvor_core::{
    compute_voronoi_diagram, seeded_sites, ComputeBackend, DuplicatePolicy, Point, Polygon,
    SerialBackend, VoronoiComputer,
};

#[cfg(feature = "parallel")]
use clipvor_core::ParallelBackend;

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 500.0;

fn render_single_diagram(backend: &dyn ComputeBackend, sites: usize, seed: u64) -> Vec<Polygon> {
    let sites = seeded_sites(sites, WIDTH, HEIGHT, seed);
    backend
        .compute_cells(&sites, &Polygon::rect(WIDTH, HEIGHT), DuplicatePolicy::FirstWins)
        .expect("Compute failed")
}

fn assert_diagram_well_formed(sites: &[Point], cells: &[Polygon], bounds: &Polygon, name: &str) {
    assert_eq!(sites.len(), cells.len(), "{}: one cell per site", name);

    let total: f64 = cells.iter().map(Polygon::area).sum();
    assert_relative_eq!(total, bounds.area(), max_relative = 1e-6);

    for (i, cell) in cells.iter().enumerate() {
        assert!(cell.is_convex(1e-9), "{}: cell {} not convex", name, i);
        assert!(cell.contains(&sites[i], 1e-9), "{}: cell {} misses its site", name, i);
        for v in cell.vertices() {
            assert!(bounds.contains(v, 1e-9), "{}: cell {} leaves the bounds", name, i);
        }
        for (j, other) in sites.iter().enumerate() {
            if i != j {
                assert!(
                    !cell.contains(other, -1e-9),
                    "{}: cell {} contains site {}",
                    name, i, j
                );
            }
        }
    }
}

mod serial {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let result1 = render_single_diagram(&SerialBackend, 200, 12345);
        let result2 = render_single_diagram(&SerialBackend, 200, 12345);
        assert_eq!(result1, result2);
    }

    #[test]
    fn test_different_seeds_produce_different_output() {
        let result1 = render_single_diagram(&SerialBackend, 100, 0);
        let result2 = render_single_diagram(&SerialBackend, 100, 1);
        assert_ne!(result1, result2, "Different seeds should produce different output");
    }

    #[test]
    fn test_well_formed_across_seeds() {
        let bounds = Polygon::rect(WIDTH, HEIGHT);
        for seed in [0u64, 42, 123] {
            for count in [2usize, 10, 100] {
                let sites = seeded_sites(count, WIDTH, HEIGHT, seed);
                let cells = compute_voronoi_diagram(&sites, &bounds);
                assert_diagram_well_formed(&sites, &cells, &bounds, &format!("{}sites_seed{}", count, seed));
            }
        }
    }

    #[test]
    fn test_non_rectangular_bounds() {
        // Regular hexagon of radius 100 centred at (100, 100).
        let bounds = Polygon::new(
            (0..6)
                .map(|k| {
                    let angle = std::f64::consts::PI / 3.0 * k as f64;
                    Point::new(100.0 + 100.0 * angle.cos(), 100.0 + 100.0 * angle.sin())
                })
                .collect(),
        );
        let sites: Vec<Point> = seeded_sites(80, 200.0, 200.0, 5)
            .into_iter()
            .filter(|p| bounds.contains(p, -1e-6))
            .collect();
        assert!(sites.len() > 10);

        let cells = compute_voronoi_diagram(&sites, &bounds);
        assert_diagram_well_formed(&sites, &cells, &bounds, "hexagon");
    }

    #[test]
    fn test_single_site_identity() {
        let bounds = Polygon::rect(10.0, 10.0);
        for site in [Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(-3.0, 42.0)] {
            assert_eq!(compute_voronoi_diagram(&[site], &bounds), vec![bounds.clone()]);
        }
    }

    #[test]
    fn test_grid_sites_split_evenly() {
        // 4x4 lattice: every cell is a 25x25 square.
        let bounds = Polygon::rect(100.0, 100.0);
        let sites: Vec<Point> = (0..16)
            .map(|i| Point::new(12.5 + 25.0 * (i % 4) as f64, 12.5 + 25.0 * (i / 4) as f64))
            .collect();
        let cells = compute_voronoi_diagram(&sites, &bounds);
        for (i, cell) in cells.iter().enumerate() {
            assert_relative_eq!(cell.area(), 625.0, max_relative = 1e-9);
            let c = cell.centroid();
            assert_relative_eq!(c.x, sites[i].x, epsilon = 1e-9);
            assert_relative_eq!(c.y, sites[i].y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_computer_recomputes_on_change() {
        let bounds = Polygon::rect(WIDTH, HEIGHT);
        let mut sites = seeded_sites(50, WIDTH, HEIGHT, 9);
        let mut computer = VoronoiComputer::new(SerialBackend);

        let before = computer.compute(&sites, &bounds).unwrap().cells.clone();
        sites[0] = Point::new(sites[0].x + 1.0, sites[0].y);
        let after = computer.compute(&sites, &bounds).unwrap().cells.clone();

        assert_ne!(before[0], after[0]);
        assert_eq!(after, compute_voronoi_diagram(&sites, &bounds));
        assert_eq!(computer.cache_stats().misses, 2);
    }
}

// Parallel backend tests
#[cfg(feature = "parallel")]
mod parallel {
    use super::*;

    #[test]
    fn test_matches_serial_100_sites_seed0() {
        let expected = render_single_diagram(&SerialBackend, 100, 0);
        let actual = render_single_diagram(&ParallelBackend::new(), 100, 0);
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_matches_serial_200_sites_seed42() {
        let expected = render_single_diagram(&SerialBackend, 200, 42);
        let backend = ParallelBackend::with_threads(3).unwrap();
        let actual = render_single_diagram(&backend, 200, 42);
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_reproducibility() {
        let backend = ParallelBackend::new();
        let result1 = render_single_diagram(&backend, 200, 12345);
        let result2 = render_single_diagram(&backend, 200, 12345);
        assert_eq!(result1, result2);
    }
}
