use glam::DVec2;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use tracing::{debug, warn};

use crate::board::region::Point;
use crate::geometry;

/// Angular samples on the board perimeter curve.
const PERIMETER_STEPS: usize = 48;

/// Fraction of the rectangle kept as an inset margin for the perimeter.
const PERIMETER_MARGIN: f64 = 0.06;

/// Attempts at an organic split before degrading to a straight chord.
const MAX_SPLIT_ATTEMPTS: u32 = 8;

/// Smallest share of the parent area either split piece may receive.
const MIN_PIECE_RATIO: f64 = 0.05;

fn vec2(p: Point) -> DVec2 {
    DVec2::new(p.x, p.y)
}

fn point(v: DVec2) -> Point {
    Point { x: v.x, y: v.y }
}

/// Divide the board into `region_count` simple polygons.
///
/// Starts from one organic perimeter polygon approximating the board
/// rectangle, then repeatedly splits the largest-area polygon with a
/// jittered cut until the count is reached. Returns each polygon paired
/// with its centroid; the output order is the region id order.
pub fn partition(
    region_count: u32,
    width: f64,
    height: f64,
    complexity: f64,
    rng: &mut impl Rng,
) -> Vec<(Vec<Point>, Point)> {
    if region_count == 0 {
        return Vec::new();
    }

    let perlin = Perlin::new(rng.r#gen());
    let mut polygons = vec![perimeter_polygon(width, height, complexity, &perlin, rng)];

    while polygons.len() < region_count as usize {
        let target = largest_polygon(&polygons);
        let (first, second) = split_polygon(&polygons[target], complexity, &perlin, rng);
        polygons[target] = first;
        polygons.push(second);
    }

    polygons
        .into_iter()
        .map(|poly| {
            let center = geometry::polygon_centroid(&poly);
            (poly, center)
        })
        .collect()
}

/// Index of the polygon with the largest shoelace area (first on ties).
fn largest_polygon(polygons: &[Vec<Point>]) -> usize {
    let mut best = 0;
    let mut best_area = geometry::polygon_area(&polygons[0]);
    for (i, poly) in polygons.iter().enumerate().skip(1) {
        let area = geometry::polygon_area(poly);
        if area > best_area {
            best = i;
            best_area = area;
        }
    }
    best
}

/// Closed curve approximating the board rectangle, sampled at fixed angular
/// steps around the board center. Each sample's radius carries a sinusoidal
/// wobble, a Perlin component, and random jitter, all scaled by
/// `complexity`. The radius stays positive, so the curve is star-shaped
/// around the center and therefore simple.
fn perimeter_polygon(
    width: f64,
    height: f64,
    complexity: f64,
    perlin: &Perlin,
    rng: &mut impl Rng,
) -> Vec<Point> {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let wave_freq = rng.gen_range(2..5) as f64;
    let wave_phase = rng.gen_range(0.0..std::f64::consts::TAU);

    let mut vertices = Vec::with_capacity(PERIMETER_STEPS);
    for i in 0..PERIMETER_STEPS {
        let angle = std::f64::consts::TAU * i as f64 / PERIMETER_STEPS as f64;
        let (sin, cos) = angle.sin_cos();

        // Distance from the center to the rectangle edge along this angle.
        let to_vertical = if cos.abs() < 1e-12 {
            f64::INFINITY
        } else {
            cx / cos.abs()
        };
        let to_horizontal = if sin.abs() < 1e-12 {
            f64::INFINITY
        } else {
            cy / sin.abs()
        };
        let base = to_vertical.min(to_horizontal) * (1.0 - PERIMETER_MARGIN);

        let organic = 0.05 * (angle * wave_freq + wave_phase).sin()
            + 0.04 * perlin.get([cos * 1.7, sin * 1.7])
            + 0.02 * rng.gen_range(-1.0..1.0);
        let radius = base * (1.0 + complexity * organic);

        vertices.push(Point {
            x: cx + radius * cos,
            y: cy + radius * sin,
        });
    }
    vertices
}

/// A boundary crossing of the straight cut line: the edge it falls on and
/// the interpolated point.
struct Crossing {
    edge: usize,
    at: Point,
}

/// Split one simple polygon into two along a jittered cut.
///
/// The cut runs across the longer bounding-box axis at a randomized
/// position in [30%, 70%] of the span. The chord between the first two
/// boundary crossings along the cut line lies inside the polygon; its
/// interior points receive perpendicular sinusoidal-plus-random
/// displacement scaled to the chord length. Splits that produce
/// self-intersecting pieces, slivers, or pieces not enclosing their
/// centroid are retried with reduced jitter; the final fallback is the
/// straight chord, which always splits a simple polygon into two simple
/// polygons.
fn split_polygon(
    poly: &[Point],
    complexity: f64,
    perlin: &Perlin,
    rng: &mut impl Rng,
) -> (Vec<Point>, Vec<Point>) {
    let (min_x, min_y, max_x, max_y) = geometry::bounding_box(poly);
    let cut_x = (max_x - min_x) >= (max_y - min_y);
    let parent_area = geometry::polygon_area(poly);

    for attempt in 0..MAX_SPLIT_ATTEMPTS {
        let t = rng.gen_range(0.30..0.70);
        let cut = if cut_x {
            min_x + t * (max_x - min_x)
        } else {
            min_y + t * (max_y - min_y)
        };

        let Some((entry, exit)) = chord_crossings(poly, cut, cut_x) else {
            continue;
        };

        let damping = 1.0 - attempt as f64 / MAX_SPLIT_ATTEMPTS as f64;
        let cut_line = jittered_chord(entry.at, exit.at, complexity * damping, perlin, rng);
        let (first, second) = stitch(poly, &entry, &exit, &cut_line);

        if accept_split(&first, &second, parent_area) {
            return (first, second);
        }
        debug!(attempt, "Split rejected, retrying with reduced jitter");
    }

    // Straight chord at midspan: always two simple polygons.
    let cut = if cut_x {
        (min_x + max_x) / 2.0
    } else {
        (min_y + max_y) / 2.0
    };
    let (entry, exit) = chord_crossings(poly, cut, cut_x)
        .unwrap_or_else(|| fallback_vertex_chord(poly));
    let cut_line = vec![entry.at, exit.at];
    let (first, second) = stitch(poly, &entry, &exit, &cut_line);
    if !geometry::point_in_polygon(geometry::polygon_centroid(&first), &first)
        || !geometry::point_in_polygon(geometry::polygon_centroid(&second), &second)
    {
        warn!("Straight-chord fallback produced a piece not enclosing its centroid");
    }
    (first, second)
}

/// The first two crossings of the straight cut line with the polygon
/// boundary, ordered along the line. The chord between them lies inside
/// the polygon. Returns `None` when the line grazes a vertex or misses the
/// interior, so the caller can re-roll the cut position.
fn chord_crossings(poly: &[Point], cut: f64, cut_x: bool) -> Option<(Crossing, Crossing)> {
    let coord = |p: Point| if cut_x { p.x } else { p.y };
    let other = |p: Point| if cut_x { p.y } else { p.x };

    // A cut through a vertex would duplicate points in the stitched rings.
    if poly.iter().any(|&v| (coord(v) - cut).abs() < 1e-9) {
        return None;
    }

    let n = poly.len();
    let mut crossings = Vec::new();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        if (coord(a) < cut) != (coord(b) < cut) {
            let s = (cut - coord(a)) / (coord(b) - coord(a));
            let at = Point {
                x: a.x + s * (b.x - a.x),
                y: a.y + s * (b.y - a.y),
            };
            crossings.push(Crossing { edge: i, at });
        }
    }
    if crossings.len() < 2 {
        return None;
    }

    crossings.sort_by(|p, q| other(p.at).partial_cmp(&other(q.at)).unwrap());
    let mut iter = crossings.into_iter();
    let first = iter.next().unwrap();
    let second = iter.next().unwrap();
    if first.edge == second.edge {
        return None;
    }
    Some((first, second))
}

/// Last-resort chord between two opposing boundary points, used only if the
/// midspan line fails to cross (degenerate geometry).
fn fallback_vertex_chord(poly: &[Point]) -> (Crossing, Crossing) {
    let n = poly.len();
    let a = 0;
    let b = n / 2;
    let midpoint = |i: usize| {
        let p = poly[i];
        let q = poly[(i + 1) % n];
        Point {
            x: (p.x + q.x) / 2.0,
            y: (p.y + q.y) / 2.0,
        }
    };
    (
        Crossing { edge: a, at: midpoint(a) },
        Crossing { edge: b, at: midpoint(b) },
    )
}

/// Sample the chord from `from` to `to` as a polyline whose interior points
/// are displaced perpendicular to the chord. Displacement is sinusoidal
/// plus Perlin plus random jitter, scaled to chord length, enveloped to
/// zero at both endpoints, and capped small.
fn jittered_chord(
    from: Point,
    to: Point,
    strength: f64,
    perlin: &Perlin,
    rng: &mut impl Rng,
) -> Vec<Point> {
    let a = vec2(from);
    let b = vec2(to);
    let chord = b - a;
    let length = chord.length();
    let interior = ((length / 40.0) as usize).clamp(2, 12);
    let perp = DVec2::new(-chord.y, chord.x) / length.max(1e-12);

    let amplitude = 0.08 * strength * length;
    let wave_freq = rng.gen_range(1..4) as f64;
    let wave_phase = rng.gen_range(0.0..std::f64::consts::TAU);
    let noise_offset = rng.gen_range(0.0..100.0);

    let mut line = Vec::with_capacity(interior + 2);
    line.push(from);
    for k in 1..=interior {
        let t = k as f64 / (interior + 1) as f64;
        let envelope = (std::f64::consts::PI * t).sin();
        let organic = (std::f64::consts::PI * t * wave_freq + wave_phase).sin()
            + 0.6 * perlin.get([noise_offset + t * 3.1, noise_offset * 0.7])
            + 0.4 * rng.gen_range(-1.0..1.0);
        let displacement = amplitude * envelope * organic * 0.5;
        line.push(point(a + chord * t + perp * displacement));
    }
    line.push(to);
    line
}

/// Stitch the two boundary arcs and the cut polyline into two closed rings.
///
/// `cut_line` runs from `entry.at` to `exit.at` and is shared by both rings
/// (traversed in opposite directions), so the pieces tile the parent
/// exactly and are mutually adjacent along the cut.
fn stitch(
    poly: &[Point],
    entry: &Crossing,
    exit: &Crossing,
    cut_line: &[Point],
) -> (Vec<Point>, Vec<Point>) {
    let n = poly.len();
    let (lo, hi, forward) = if entry.edge < exit.edge {
        (entry, exit, true)
    } else {
        (exit, entry, false)
    };

    // Cut polyline oriented lo.at -> hi.at, crossing points included.
    let cut_lo_to_hi: Vec<Point> = if forward {
        cut_line.to_vec()
    } else {
        cut_line.iter().rev().copied().collect()
    };

    // Boundary arc strictly between the crossing edges, in vertex order:
    // v[lo.edge + 1] ..= v[hi.edge]. Follows lo.at and precedes hi.at.
    let inner_arc = (lo.edge + 1)..=hi.edge;
    // Complementary arc, wrapping past the ring origin:
    // v[hi.edge + 1] ..= v[lo.edge]. Follows hi.at and precedes lo.at.
    let outer_arc = (hi.edge + 1)..(lo.edge + 1 + n);

    // First ring: lo.at -> inner arc -> hi.at -> back along the cut.
    let mut first: Vec<Point> = inner_arc.map(|i| poly[i]).collect();
    first.extend(cut_lo_to_hi.iter().rev().copied());

    // Second ring: outer arc -> lo.at -> forward along the cut -> hi.at.
    let mut second: Vec<Point> = outer_arc.map(|i| poly[i % n]).collect();
    second.extend(cut_lo_to_hi.iter().copied());

    (first, second)
}

/// Accept a candidate split only when both pieces are well formed.
fn accept_split(first: &[Point], second: &[Point], parent_area: f64) -> bool {
    if first.len() < 3 || second.len() < 3 {
        return false;
    }
    let min_area = parent_area * MIN_PIECE_RATIO;
    if geometry::polygon_area(first) < min_area || geometry::polygon_area(second) < min_area {
        return false;
    }
    if !geometry::polygon_is_simple(first) || !geometry::polygon_is_simple(second) {
        return false;
    }
    geometry::point_in_polygon(geometry::polygon_centroid(first), first)
        && geometry::point_in_polygon(geometry::polygon_centroid(second), second)
}
