//! Bounded Voronoi diagram CLI
//!
//! Computes the Voronoi cells of a site set inside a convex bounding polygon
//! and writes them as YAML.
//!
//! ## Random sites
//!
//!   clipvor --sites 50 --seed 7 --width 700 --height 500 -o cells.yaml
//!
//! ## YAML input file
//!
//! ```yaml
//! width: 700
//! height: 500
//! seed: 0          # used when `sites` is absent
//! count: 10        # used when `sites` is absent
//! sites:           # optional explicit sites
//!   - [120, 80]
//!   - [400, 300]
//! bounds:          # optional convex polygon (default: width x height rectangle)
//!   - [0, 0]
//!   - [700, 0]
//!   - [700, 500]
//!   - [0, 500]
//! duplicates: first-wins
//! ```
//!
//! Run with: `clipvor --input sites.yaml -o cells.yaml`
//!
//! CLI flags override values from the input file. Set `RUST_LOG=debug` for
//! timing output.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use clipvor_core::{
    seeded_sites, seeded_sites_in, ComputeBackend, DuplicatePolicy, Point, Polygon, SerialBackend,
    VoronoiComputer, VoronoiDiagram,
};

#[cfg(feature = "parallel")]
use clipvor_core::ParallelBackend;

const DEFAULT_SITES: usize = 10;
const DEFAULT_WIDTH: f64 = 700.0;
const DEFAULT_HEIGHT: f64 = 500.0;

/// YAML input file format
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSpec {
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    sites: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    bounds: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    duplicates: Option<String>,
}

/// YAML output format
#[derive(Debug, Serialize, Deserialize)]
struct DiagramOutput {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    seed: Option<u64>,
    duplicates: String,
    bounds: Vec<[f64; 2]>,
    total_area: f64,
    cells: Vec<CellOutput>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CellOutput {
    index: usize,
    site: [f64; 2],
    area: f64,
    vertices: Vec<[f64; 2]>,
}

/// Fully resolved diagram input
#[derive(Debug)]
struct DiagramInput {
    sites: Vec<Point>,
    bounds: Polygon,
    policy: DuplicatePolicy,
    /// Seed the sites were generated from (None for explicit sites)
    seed: Option<u64>,
}

fn load_spec(path: &PathBuf) -> anyhow::Result<InputSpec> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {:?}", path))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse input file: {:?}", path))
}

fn to_points(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

fn to_coords(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

/// Resolve sites, bounds and policy from CLI args and an optional input file.
/// CLI args take precedence over file values.
fn resolve_input(args: &Args, spec: Option<&InputSpec>) -> anyhow::Result<DiagramInput> {
    let empty = InputSpec::default();
    let spec = spec.unwrap_or(&empty);

    let width = args.width.or(spec.width).unwrap_or(DEFAULT_WIDTH);
    let height = args.height.or(spec.height).unwrap_or(DEFAULT_HEIGHT);
    anyhow::ensure!(
        width > 0.0 && height > 0.0,
        "width and height must be positive (got {}x{})",
        width, height
    );

    let bounds = match &spec.bounds {
        Some(coords) => Polygon::new(to_points(coords)),
        None => Polygon::rect(width, height),
    };
    anyhow::ensure!(
        bounds.len() >= 3,
        "bounding polygon needs at least 3 vertices (got {})",
        bounds.len()
    );
    anyhow::ensure!(bounds.is_convex(1e-12), "bounding polygon must be convex");
    anyhow::ensure!(bounds.area() > 0.0, "bounding polygon has no area");

    let policy_name = args
        .duplicates
        .as_deref()
        .or(spec.duplicates.as_deref())
        .unwrap_or("first-wins");
    let policy: DuplicatePolicy = policy_name.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // Explicit sites win unless the CLI asks for random ones.
    let (sites, seed) = match &spec.sites {
        Some(coords) if args.sites.is_none() && args.seed.is_none() => (to_points(coords), None),
        _ => {
            let count = args.sites.or(spec.count).unwrap_or(DEFAULT_SITES);
            let seed = args.seed.or(spec.seed).unwrap_or(0);
            let sites = match spec.bounds {
                Some(_) => seeded_sites_in(count, &bounds, seed),
                None => seeded_sites(count, width, height, seed),
            };
            (sites, Some(seed))
        }
    };

    Ok(DiagramInput { sites, bounds, policy, seed })
}

fn diagram_output(diagram: &VoronoiDiagram, input: &DiagramInput) -> DiagramOutput {
    let cells = diagram
        .iter()
        .enumerate()
        .map(|(index, (site, cell))| CellOutput {
            index,
            site: [site.x, site.y],
            area: cell.area(),
            vertices: to_coords(cell.vertices()),
        })
        .collect();

    DiagramOutput {
        seed: input.seed,
        duplicates: input.policy.to_string(),
        bounds: to_coords(diagram.bounds.vertices()),
        total_area: diagram.total_area(),
        cells,
    }
}

#[derive(Parser, Debug)]
#[command(name = "clipvor")]
#[command(about = "Compute bounded Voronoi diagrams by half-plane clipping", long_about = None)]
struct Args {
    /// YAML input file (sites, bounds, duplicate policy)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output YAML path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of random sites [default: 10]
    #[arg(long)]
    sites: Option<usize>,

    /// Random seed for reproducibility [default: 0]
    #[arg(long)]
    seed: Option<u64>,

    /// Bounding rectangle width [default: 700]
    #[arg(long)]
    width: Option<f64>,

    /// Bounding rectangle height [default: 500]
    #[arg(long)]
    height: Option<f64>,

    /// Duplicate site handling: first-wins | overlap | reject
    #[arg(long)]
    duplicates: Option<String>,

    /// Worker threads for the parallel backend (0 = Rayon default)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Compute cells on a single thread
    #[arg(long)]
    serial: bool,

    /// Run benchmark comparing serial vs parallel backends
    #[arg(long)]
    benchmark: bool,

    /// Number of timed runs in benchmark mode
    #[arg(long, default_value = "10")]
    bench_runs: usize,
}

fn make_backend(args: &Args) -> anyhow::Result<Box<dyn ComputeBackend>> {
    #[cfg(feature = "parallel")]
    if !args.serial {
        let backend = ParallelBackend::with_threads(args.threads)?;
        log::info!("Using parallel backend (Rayon, threads: {})", backend.num_threads());
        return Ok(Box::new(backend));
    }

    #[cfg(not(feature = "parallel"))]
    if !args.serial {
        log::warn!("parallel feature not enabled. Using serial backend.");
    }

    log::info!("Using serial backend");
    Ok(Box::new(SerialBackend))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let spec = args.input.as_ref().map(load_spec).transpose()?;
    let input = resolve_input(&args, spec.as_ref())?;
    match input.seed {
        Some(seed) => log::info!("{} random sites (seed: {})", input.sites.len(), seed),
        None => log::info!("{} sites from input file", input.sites.len()),
    }

    if args.benchmark {
        return run_benchmark(&input, &args);
    }

    let backend = make_backend(&args)?;
    let mut computer = VoronoiComputer::new(backend).with_duplicate_policy(input.policy);
    let backend_name = computer.backend().name();

    let start = Instant::now();
    let diagram = computer.compute(&input.sites, &input.bounds)?;
    log::info!(
        "Computed {} cells on {} backend in {:.2?} ({} empty)",
        diagram.len(),
        backend_name,
        start.elapsed(),
        diagram.degenerate_count()
    );

    let output = diagram_output(diagram, &input);
    let yaml = serde_yaml::to_string(&output).context("failed to serialize diagram")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, yaml)
                .with_context(|| format!("failed to write output file: {:?}", path))?;
            log::info!("Output saved to: {:?}", path);
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

/// Benchmark serial vs parallel backends on the same input
fn run_benchmark(input: &DiagramInput, args: &Args) -> anyhow::Result<()> {
    let runs = args.bench_runs.max(1);

    println!("\n=== Voronoi Benchmark ===");
    println!("Sites: {}", input.sites.len());
    println!("Bounding vertices: {}", input.bounds.len());
    println!("Runs: {}", runs);
    println!();

    println!("Benchmarking serial...");
    let serial_time = benchmark_backend(&SerialBackend, input, runs)?;
    println!(
        "  serial: {:?} total, {:.2} ms/diagram",
        serial_time,
        serial_time.as_secs_f64() * 1000.0 / runs as f64
    );

    #[cfg(feature = "parallel")]
    {
        println!("Benchmarking parallel (Rayon)...");
        let backend = ParallelBackend::with_threads(args.threads)?;
        let parallel_time = benchmark_backend(&backend, input, runs)?;
        println!(
            "  parallel: {:?} total, {:.2} ms/diagram",
            parallel_time,
            parallel_time.as_secs_f64() * 1000.0 / runs as f64
        );

        println!();
        println!("=== Summary ===");
        let speedup = serial_time.as_secs_f64() / parallel_time.as_secs_f64();
        if speedup > 1.0 {
            println!("parallel is {:.2}x faster than serial", speedup);
        } else {
            println!("serial is {:.2}x faster than parallel", 1.0 / speedup);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        println!("Parallel benchmark skipped (parallel feature not enabled)");
    }

    Ok(())
}

/// Time repeated full recomputations on one backend
fn benchmark_backend(
    backend: &dyn ComputeBackend,
    input: &DiagramInput,
    runs: usize,
) -> anyhow::Result<Duration> {
    // Warmup run (thread pool spin-up, allocator)
    let _ = backend.compute_cells(&input.sites, &input.bounds, input.policy)?;

    let start = Instant::now();
    for _ in 0..runs {
        let _ = backend.compute_cells(&input.sites, &input.bounds, input.policy)?;
    }
    Ok(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipvor_core::compute_voronoi_diagram;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["clipvor"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let input = resolve_input(&args(&[]), None).unwrap();
        assert_eq!(input.sites.len(), DEFAULT_SITES);
        assert_eq!(input.bounds, Polygon::rect(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(input.policy, DuplicatePolicy::FirstWins);
        assert_eq!(input.seed, Some(0));
    }

    #[test]
    fn test_spec_file_values() {
        let spec: InputSpec = serde_yaml::from_str(
            "width: 10\nheight: 10\nsites:\n  - [0, 5]\n  - [10, 5]\nduplicates: reject\n",
        )
        .unwrap();
        let input = resolve_input(&args(&[]), Some(&spec)).unwrap();
        assert_eq!(input.sites, vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]);
        assert_eq!(input.bounds, Polygon::rect(10.0, 10.0));
        assert_eq!(input.policy, DuplicatePolicy::Reject);
        assert_eq!(input.seed, None);
    }

    #[test]
    fn test_cli_overrides_spec() {
        let spec: InputSpec =
            serde_yaml::from_str("width: 10\nheight: 10\ncount: 3\nseed: 1\nduplicates: reject\n").unwrap();
        let input = resolve_input(
            &args(&["--sites", "7", "--width", "20", "--duplicates", "overlap"]),
            Some(&spec),
        )
        .unwrap();
        assert_eq!(input.sites.len(), 7);
        assert_eq!(input.seed, Some(1));
        assert_eq!(input.bounds, Polygon::rect(20.0, 10.0));
        assert_eq!(input.policy, DuplicatePolicy::Overlap);
        assert_eq!(input.sites, seeded_sites(7, 20.0, 10.0, 1));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let too_few: InputSpec = serde_yaml::from_str("bounds:\n  - [0, 0]\n  - [1, 0]\n").unwrap();
        assert!(resolve_input(&args(&[]), Some(&too_few)).is_err());

        let concave: InputSpec = serde_yaml::from_str(
            "bounds:\n  - [0, 0]\n  - [4, 0]\n  - [2, 1]\n  - [4, 4]\n  - [0, 4]\n",
        )
        .unwrap();
        assert!(resolve_input(&args(&[]), Some(&concave)).is_err());

        let pentagram: InputSpec = serde_yaml::from_str(
            "bounds:\n  - [100, 0]\n  - [-80.9017, 58.7785]\n  - [30.9017, -95.1057]\n  \
             - [30.9017, 95.1057]\n  - [-80.9017, -58.7785]\n",
        )
        .unwrap();
        assert!(resolve_input(&args(&[]), Some(&pentagram)).is_err());

        assert!(resolve_input(&args(&["--width", "0"]), None).is_err());
    }

    #[test]
    fn test_random_sites_follow_file_bounds() {
        let spec: InputSpec = serde_yaml::from_str(
            "count: 20\nseed: 4\nbounds:\n  - [0, 0]\n  - [10, 0]\n  - [10, 10]\n  - [0, 10]\n",
        )
        .unwrap();
        let input = resolve_input(&args(&[]), Some(&spec)).unwrap();
        assert_eq!(input.sites.len(), 20);
        assert!(input.sites.iter().all(|p| input.bounds.contains(p, 0.0)));

        let cells = compute_voronoi_diagram(&input.sites, &input.bounds);
        assert!(cells.iter().all(|c| !c.is_degenerate()));
    }

    #[test]
    fn test_unknown_policy() {
        let err = resolve_input(&args(&["--duplicates", "coin-flip"]), None).unwrap_err();
        assert!(err.to_string().contains("unknown duplicate policy"));
    }

    #[test]
    fn test_output_round_trip() {
        let spec: InputSpec =
            serde_yaml::from_str("width: 10\nheight: 10\nsites:\n  - [0, 5]\n  - [10, 5]\n").unwrap();
        let input = resolve_input(&args(&[]), Some(&spec)).unwrap();
        let mut computer = VoronoiComputer::new(SerialBackend);
        let diagram = computer.compute(&input.sites, &input.bounds).unwrap();

        let yaml = serde_yaml::to_string(&diagram_output(diagram, &input)).unwrap();
        let parsed: DiagramOutput = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.cells.len(), 2);
        assert_eq!(parsed.cells[0].site, [0.0, 5.0]);
        assert_eq!(parsed.cells[0].area, 50.0);
        assert_eq!(parsed.total_area, 100.0);
        assert_eq!(parsed.duplicates, "first-wins");
        assert!(parsed.seed.is_none());
    }
}
