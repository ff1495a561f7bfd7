//! Single half-plane polygon clipping (Sutherland–Hodgman, one plane).

use crate::{Point, Polygon};

/// Half-plane `a·x + b·y + c >= 0`, boundary inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl HalfPlane {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Side of the perpendicular bisector of `(site, other)` that holds `site`.
    ///
    /// `a = 2(site.x - other.x)`, `b = 2(site.y - other.y)` and the line
    /// passes through the midpoint, i.e. `c = |other|² - |site|²`. `c` must be
    /// taken through the midpoint: the squared-norm difference is mostly
    /// rounding error for close sites far from the origin, and its sign then
    /// decides the flip.
    ///
    /// For coincident points every coefficient is zero and the half-plane
    /// contains the whole plane.
    pub fn bisector(site: Point, other: Point) -> Self {
        let a = 2.0 * (site.x - other.x);
        let b = 2.0 * (site.y - other.y);
        let mid = Point::new((site.x + other.x) / 2.0, (site.y + other.y) / 2.0);
        let plane = Self::new(a, b, -(a * mid.x + b * mid.y));
        if plane.eval(&site) < 0.0 {
            plane.flipped()
        } else {
            plane
        }
    }

    /// Same boundary line, opposite kept side
    pub fn flipped(&self) -> Self {
        Self::new(-self.a, -self.b, -self.c)
    }

    /// Value of `a·x + b·y + c` at `p`
    #[inline]
    pub fn eval(&self, p: &Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        self.eval(p) >= 0.0
    }

}

/// Intersect `polygon` with `plane`, returning a new polygon.
///
/// Inside vertices are kept in order, and every edge that strictly crosses the
/// boundary contributes its intersection point. Winding and convexity of the
/// input carry over to the output. An input that lies fully inside (or fully
/// on the boundary) comes back vertex-for-vertex; one that lies fully outside
/// comes back empty.
pub fn clip_polygon(polygon: &Polygon, plane: HalfPlane) -> Polygon {
    let vertices = polygon.vertices();
    let n = vertices.len();
    let mut clipped = Vec::with_capacity(n + 1);

    for i in 0..n {
        let curr = vertices[i];
        let next = vertices[(i + 1) % n];
        let f_curr = plane.eval(&curr);
        let f_next = plane.eval(&next);
        let curr_inside = f_curr >= 0.0;
        let next_inside = f_next >= 0.0;

        if curr_inside {
            clipped.push(curr);
        }

        // The side test must stay ahead of the division: the denominator only
        // vanishes for edges parallel to the boundary, which never change side.
        // An inside endpoint sitting exactly on the line is the intersection
        // itself and is emitted on its own.
        if curr_inside != next_inside && f_curr != 0.0 && f_next != 0.0 {
            let dx = next.x - curr.x;
            let dy = next.y - curr.y;
            let t = -f_curr / (plane.a * dx + plane.b * dy);
            clipped.push(Point::new(curr.x + t * dx, curr.y + t * dy));
        }
    }

    Polygon::new(clipped)
}
