//! Point and polygon value types.

/// 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point
    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point
    pub fn dist(&self, other: &Point) -> f64 {
        self.dist_sq(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Closed polygon: the last vertex connects back to the first.
///
/// Fewer than three vertices means the polygon has no area (an empty or
/// degenerate cell). Polygons are never mutated in place; clipping always
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Empty polygon
    pub fn empty() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle `(0,0)-(w,0)-(w,h)-(0,h)`, counter-clockwise in
    /// a y-up frame.
    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    /// Build from flat `[x0, y0, x1, y1, ...]` coordinates. A trailing odd
    /// coordinate is ignored.
    pub fn from_flat(coords: &[f64]) -> Self {
        Self::new(
            points_from_flat(coords),
        )
    }

    /// Flat `[x0, y0, x1, y1, ...]` coordinates
    pub fn to_flat(&self) -> Vec<f64> {
        points_to_flat(&self.vertices)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the polygon cannot enclose any area
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Iterate over edges `(curr, next)`, wrapping last to first
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Axis-aligned `(min, max)` corners, `None` for an empty polygon
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// Shoelace area, positive for counter-clockwise winding in a y-up frame
    pub fn signed_area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let twice: f64 = self.edges().map(|(p, q)| p.x * q.y - q.x * p.y).sum();
        twice * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid. Falls back to the vertex average when the polygon has
    /// (numerically) no area, and to the origin when it has no vertices.
    pub fn centroid(&self) -> Point {
        if self.vertices.is_empty() {
            return Point::new(0.0, 0.0);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut twice_area = 0.0;
        for (p, q) in self.edges() {
            let cross = p.x * q.y - q.x * p.y;
            twice_area += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }

        if twice_area.abs() < 1e-12 {
            let n = self.vertices.len() as f64;
            let sx: f64 = self.vertices.iter().map(|p| p.x).sum();
            let sy: f64 = self.vertices.iter().map(|p| p.y).sum();
            return Point::new(sx / n, sy / n);
        }

        let factor = 1.0 / (3.0 * twice_area);
        Point::new(cx * factor, cy * factor)
    }

    /// Whether the turn direction never flips along the boundary and the
    /// boundary winds around exactly once.
    ///
    /// Turns with a cross product within `eps` of zero (collinear or repeated
    /// vertices) are ignored for the sign test. The total turning rules out
    /// self-intersecting stars, whose turns all share one sign. Degenerate
    /// polygons count as convex.
    pub fn is_convex(&self, eps: f64) -> bool {
        if self.is_degenerate() {
            return true;
        }

        let edges: Vec<(f64, f64)> = self
            .edges()
            .map(|(p, q)| (q.x - p.x, q.y - p.y))
            .filter(|&(dx, dy)| dx != 0.0 || dy != 0.0)
            .collect();

        let mut sign = 0.0f64;
        let mut turning = 0.0f64;
        for (i, &(ux, uy)) in edges.iter().enumerate() {
            let (vx, vy) = edges[(i + 1) % edges.len()];
            let cross = ux * vy - uy * vx;
            turning += cross.atan2(ux * vx + uy * vy);
            if cross.abs() <= eps {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        sign == 0.0 || (turning.abs() - std::f64::consts::TAU).abs() < 1e-6
    }

    /// Point-in-convex-polygon test, boundary inclusive within `eps`.
    ///
    /// Works for either winding. Only meaningful for convex polygons.
    pub fn contains(&self, point: &Point, eps: f64) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let orientation = self.signed_area().signum();
        self.edges().all(|(p, q)| {
            let len = p.dist(&q);
            if len == 0.0 {
                return true;
            }
            // Signed distance of `point` from the edge line, positive inside.
            let cross = (q.x - p.x) * (point.y - p.y) - (q.y - p.y) * (point.x - p.x);
            cross * orientation / len >= -eps
        })
    }
}

/// Points from flat `[x0, y0, x1, y1, ...]`; a trailing odd value is ignored
pub fn points_from_flat(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect()
}

/// Flat `[x0, y0, x1, y1, ...]` from points
pub fn points_to_flat(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
