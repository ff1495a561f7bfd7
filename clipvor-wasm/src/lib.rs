//! WASM bindings for clipvor-core.
//!
//! Exposes a stateful `VoronoiEngine` that holds the sites and bounding
//! rectangle, returning flat typed arrays for efficient JS interop. Drawing
//! the cells is left to the JS side.

use wasm_bindgen::prelude::*;
use clipvor_core::{
    points_from_flat, points_to_flat, seeded_sites, DuplicatePolicy, Point, Polygon,
    SerialBackend, VoronoiComputer, VoronoiDiagram,
};

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of a single diagram computation.
/// All data is exposed as flat typed arrays for zero-copy JS access.
#[wasm_bindgen]
pub struct DiagramFrame {
    vertices: Vec<f64>,
    offsets: Vec<u32>,
    areas: Vec<f64>,
}

#[wasm_bindgen]
impl DiagramFrame {
    /// Flat [x0,y0, x1,y1, ...] vertices of all cells, concatenated
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }

    /// Start of each cell in `vertices`, counted in vertices (not floats),
    /// with a final entry equal to the total vertex count
    /// (length = num_cells + 1)
    #[wasm_bindgen(getter)]
    pub fn offsets(&self) -> Vec<u32> {
        self.offsets.clone()
    }

    /// Area per cell (length = num_cells)
    #[wasm_bindgen(getter)]
    pub fn areas(&self) -> Vec<f64> {
        self.areas.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> usize {
        self.areas.len()
    }
}

impl DiagramFrame {
    fn from_diagram(diagram: &VoronoiDiagram) -> Self {
        let mut vertices = Vec::new();
        let mut offsets = Vec::with_capacity(diagram.len() + 1);
        offsets.push(0);
        for cell in &diagram.cells {
            vertices.extend(cell.to_flat());
            offsets.push((vertices.len() / 2) as u32);
        }
        Self {
            vertices,
            offsets,
            areas: diagram.cell_areas(),
        }
    }
}

/// Stateful Voronoi engine.
/// Holds the site list and bounding rectangle; recomputation only happens
/// when either changes.
#[wasm_bindgen]
pub struct VoronoiEngine {
    width: f64,
    height: f64,
    sites: Vec<Point>,
    computer: VoronoiComputer<SerialBackend>,
}

#[wasm_bindgen]
impl VoronoiEngine {
    /// Create an engine for a `width` x `height` bounding rectangle.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sites: Vec::new(),
            computer: VoronoiComputer::new(SerialBackend),
        }
    }

    /// Change the bounding rectangle (e.g. on resize).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Select duplicate handling: "first-wins", "overlap" or "reject".
    pub fn set_duplicate_policy(&mut self, policy: &str) -> Result<(), JsError> {
        let policy: DuplicatePolicy = policy.parse().map_err(|e: String| JsError::new(&e))?;
        self.computer.set_duplicate_policy(policy);
        Ok(())
    }

    /// Replace sites with flat [x0,y0, x1,y1, ...] positions.
    pub fn set_sites(&mut self, positions: &[f64]) {
        self.sites = points_from_flat(positions);
    }

    /// Replace sites with `count` seeded random positions.
    pub fn randomize(&mut self, count: usize, seed: u32) {
        self.sites = seeded_sites(count, self.width, self.height, seed as u64);
    }

    /// Compute (or reuse) the diagram for the current sites and size.
    pub fn compute(&mut self) -> Result<DiagramFrame, JsError> {
        let bounds = Polygon::rect(self.width, self.height);
        let diagram = self.computer.compute(&self.sites, &bounds)?;
        Ok(DiagramFrame::from_diagram(diagram))
    }

    /// Get current site positions as flat [x0,y0, x1,y1, ...].
    pub fn positions(&self) -> Vec<f64> {
        points_to_flat(&self.sites)
    }

    /// Get current site count.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}
