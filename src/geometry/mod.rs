//! Planar polygon math for board partitioning and adjacency resolution.
//!
//! All polygons are ordered vertex lists describing a closed ring (the edge
//! from the last vertex back to the first is implied). Functions are pure and
//! make no assumption about winding direction unless stated.

use crate::board::region::Point;

/// Unsigned polygon area via the shoelace formula.
/// Returns 0.0 for rings with fewer than 3 vertices.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}

/// Area-weighted polygon centroid.
///
/// Falls back to the vertex mean when the ring is degenerate (near-zero
/// area), so the result is always finite for non-empty input.
pub fn polygon_centroid(vertices: &[Point]) -> Point {
    if vertices.is_empty() {
        return Point { x: 0.0, y: 0.0 };
    }

    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a.x * b.y - b.x * a.y;
        signed_area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    if signed_area.abs() < 1e-9 {
        let n = vertices.len() as f64;
        let sx: f64 = vertices.iter().map(|p| p.x).sum();
        let sy: f64 = vertices.iter().map(|p| p.y).sum();
        return Point { x: sx / n, y: sy / n };
    }

    let factor = 1.0 / (3.0 * signed_area);
    Point {
        x: cx * factor,
        y: cy * factor,
    }
}

/// Axis-aligned bounding box as (min_x, min_y, max_x, max_y).
/// Returns a zero box at the origin for empty input.
pub fn bounding_box(vertices: &[Point]) -> (f64, f64, f64, f64) {
    if vertices.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in vertices {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Largest distance from `center` to any vertex of the ring.
pub fn max_radius(vertices: &[Point], center: Point) -> f64 {
    vertices
        .iter()
        .map(|&v| distance(v, center))
        .fold(0.0, f64::max)
}

/// Distance from point `p` to the segment `a`-`b`, via projection onto the
/// segment clamped to its endpoints.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq < 1e-18 {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let proj = Point {
        x: a.x + t * abx,
        y: a.y + t * aby,
    };
    distance(p, proj)
}

/// Minimum distance between segments `a1`-`a2` and `b1`-`b2`, taken as the
/// smallest of the four endpoint-to-opposite-segment projections.
pub fn segment_min_distance(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    point_segment_distance(a1, b1, b2)
        .min(point_segment_distance(a2, b1, b2))
        .min(point_segment_distance(b1, a1, a2))
        .min(point_segment_distance(b2, a1, a2))
}

/// Twice the signed area of triangle `a`, `b`, `c`.
/// Positive when `c` is to the left of `a`->`b`.
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when segments `a1`-`a2` and `b1`-`b2` cross at a single interior
/// point of both. Shared endpoints and mere touching do not count.
pub fn segments_properly_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// True when the closed ring has at least 3 vertices and no two
/// non-adjacent edges cross.
pub fn polygon_is_simple(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a1 = vertices[i];
        let a2 = vertices[(i + 1) % n];
        for j in (i + 1)..n {
            // Skip the edge itself and the two edges sharing a vertex with it.
            if j == i || (j + 1) % n == i || (i + 1) % n == j {
                continue;
            }
            let b1 = vertices[j];
            let b2 = vertices[(j + 1) % n];
            if segments_properly_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}

/// Even-odd ray-casting point-in-polygon test.
/// Points exactly on the boundary may land on either side.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = vj.x + (p.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
