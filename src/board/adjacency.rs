use tracing::warn;

use crate::board::region::Region;
use crate::geometry;

/// Two regions closer than this (vertex-to-vertex or edge-to-edge) share a
/// border.
pub const ADJACENCY_TOLERANCE: f64 = 15.0;

/// Centroid-distance multiplier for the cheap pair-rejection test.
const REJECTION_FACTOR: f64 = 2.2;

/// Recompute the adjacency relation for the whole region collection from
/// polygon geometry alone.
///
/// Existing adjacency sets are cleared first, so resolving twice on the
/// same geometry yields identical sets. This geometric relation supersedes
/// whatever abstract graph drove the partition; it is the ground truth for
/// coloring. Two repair passes run afterwards: regions left with no
/// neighbor are linked to their nearest centroid, and remaining
/// disconnected components are bridged through their closest centroid
/// pair, so the final adjacency graph is always connected.
pub fn resolve_adjacency(regions: &mut [Region]) {
    for region in regions.iter_mut() {
        region.adjacent.clear();
    }

    let radii: Vec<f64> = regions
        .iter()
        .map(|r| geometry::max_radius(&r.vertices, r.center))
        .collect();

    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            let centroid_gap = geometry::distance(regions[i].center, regions[j].center);
            if centroid_gap > REJECTION_FACTOR * (radii[i] + radii[j]) {
                continue;
            }
            if shares_border(&regions[i], &regions[j]) {
                let (a, b) = (regions[i].id, regions[j].id);
                regions[i].adjacent.insert(b);
                regions[j].adjacent.insert(a);
            }
        }
    }

    repair_isolated(regions);
    repair_components(regions);
}

/// Border test between two polygons: any vertex pair within tolerance, or
/// any edge pair whose minimum endpoint-projection distance is within
/// tolerance.
fn shares_border(a: &Region, b: &Region) -> bool {
    for &va in &a.vertices {
        for &vb in &b.vertices {
            if geometry::distance(va, vb) <= ADJACENCY_TOLERANCE {
                return true;
            }
        }
    }

    let na = a.vertices.len();
    let nb = b.vertices.len();
    for i in 0..na {
        let a1 = a.vertices[i];
        let a2 = a.vertices[(i + 1) % na];
        for j in 0..nb {
            let b1 = b.vertices[j];
            let b2 = b.vertices[(j + 1) % nb];
            if geometry::segment_min_distance(a1, a2, b1, b2) <= ADJACENCY_TOLERANCE {
                return true;
            }
        }
    }
    false
}

/// Link every neighborless region to its nearest centroid so the solver
/// never sees an isolated vertex.
fn repair_isolated(regions: &mut [Region]) {
    let isolated: Vec<usize> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.adjacent.is_empty())
        .map(|(i, _)| i)
        .collect();

    for i in isolated {
        let Some(nearest) = nearest_region(regions, i) else {
            continue;
        };
        let (a, b) = (regions[i].id, regions[nearest].id);
        warn!(region = a, linked_to = b, "Region had no geometric neighbor, linking to nearest");
        regions[i].adjacent.insert(b);
        regions[nearest].adjacent.insert(a);
    }
}

/// Bridge disconnected adjacency components through their closest
/// centroid pair until one component remains.
fn repair_components(regions: &mut [Region]) {
    if regions.len() < 2 {
        return;
    }

    loop {
        let labels = component_labels(regions);
        let component_count = labels.iter().copied().max().map_or(0, |m| m + 1);
        if component_count <= 1 {
            return;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..regions.len() {
            for j in (i + 1)..regions.len() {
                if labels[i] == labels[j] {
                    continue;
                }
                let gap = geometry::distance(regions[i].center, regions[j].center);
                if best.is_none_or(|(_, _, d)| gap < d) {
                    best = Some((i, j, gap));
                }
            }
        }

        let Some((i, j, _)) = best else { return };
        let (a, b) = (regions[i].id, regions[j].id);
        warn!(region_a = a, region_b = b, "Bridging disconnected adjacency components");
        regions[i].adjacent.insert(b);
        regions[j].adjacent.insert(a);
    }
}

/// Connected-component label per region index, via BFS over adjacency ids.
fn component_labels(regions: &[Region]) -> Vec<usize> {
    let index_of: std::collections::HashMap<u32, usize> = regions
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id, i))
        .collect();

    let mut labels = vec![usize::MAX; regions.len()];
    let mut next_label = 0;
    for start in 0..regions.len() {
        if labels[start] != usize::MAX {
            continue;
        }
        let mut queue = std::collections::VecDeque::from([start]);
        labels[start] = next_label;
        while let Some(i) = queue.pop_front() {
            for neighbor_id in &regions[i].adjacent {
                if let Some(&j) = index_of.get(neighbor_id) {
                    if labels[j] == usize::MAX {
                        labels[j] = next_label;
                        queue.push_back(j);
                    }
                }
            }
        }
        next_label += 1;
    }
    labels
}

/// Index of the centroid-nearest other region to `from`.
fn nearest_region(regions: &[Region], from: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in 0..regions.len() {
        if i == from {
            continue;
        }
        let gap = geometry::distance(regions[from].center, regions[i].center);
        if best.is_none_or(|(_, d)| gap < d) {
            best = Some((i, gap));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::region::Point;

    /// Axis-aligned square of the given side with its lower-left corner at
    /// (x, y).
    fn square(id: u32, x: f64, y: f64, side: f64) -> Region {
        let vertices = vec![
            Point { x, y },
            Point { x: x + side, y },
            Point { x: x + side, y: y + side },
            Point { x, y: y + side },
        ];
        let center = Point {
            x: x + side / 2.0,
            y: y + side / 2.0,
        };
        Region::new(id, vertices, center)
    }

    #[test]
    fn touching_squares_are_adjacent() {
        let mut regions = vec![square(0, 0.0, 0.0, 100.0), square(1, 100.0, 0.0, 100.0)];
        resolve_adjacency(&mut regions);
        assert!(regions[0].adjacent.contains(&1));
        assert!(regions[1].adjacent.contains(&0));
    }

    #[test]
    fn near_squares_within_tolerance_are_adjacent() {
        let mut regions = vec![square(0, 0.0, 0.0, 100.0), square(1, 110.0, 0.0, 100.0)];
        resolve_adjacency(&mut regions);
        assert!(
            regions[0].adjacent.contains(&1),
            "Gap of 10 is within the {} tolerance",
            ADJACENCY_TOLERANCE
        );
    }

    #[test]
    fn edge_proximity_without_close_vertices_is_adjacent() {
        // A tall thin region running alongside a square's edge: the
        // vertices are far apart but the edges come within tolerance.
        let tall = Region::new(
            1,
            vec![
                Point { x: 105.0, y: -500.0 },
                Point { x: 140.0, y: -500.0 },
                Point { x: 140.0, y: 600.0 },
                Point { x: 105.0, y: 600.0 },
            ],
            Point { x: 122.5, y: 50.0 },
        );
        let mut regions = vec![square(0, 0.0, 0.0, 100.0), tall];
        resolve_adjacency(&mut regions);
        assert!(
            regions[0].adjacent.contains(&1),
            "Edges 5 apart must register as a shared border"
        );
        assert!(regions[1].adjacent.contains(&0));
    }

    #[test]
    fn distant_squares_get_repaired_not_left_isolated() {
        let mut regions = vec![square(0, 0.0, 0.0, 50.0), square(1, 1000.0, 0.0, 50.0)];
        resolve_adjacency(&mut regions);
        // Geometrically unrelated, but the repair pass links the pair.
        assert!(regions[0].adjacent.contains(&1));
        assert!(regions[1].adjacent.contains(&0));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut regions = vec![
            square(0, 0.0, 0.0, 100.0),
            square(1, 100.0, 0.0, 100.0),
            square(2, 0.0, 100.0, 100.0),
            square(3, 100.0, 100.0, 100.0),
        ];
        resolve_adjacency(&mut regions);
        for a in &regions {
            for &b_id in &a.adjacent {
                let b = regions.iter().find(|r| r.id == b_id).unwrap();
                assert!(
                    b.adjacent.contains(&a.id),
                    "Region {} lists {}, but not vice versa",
                    a.id,
                    b_id
                );
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut regions = vec![
            square(0, 0.0, 0.0, 100.0),
            square(1, 100.0, 0.0, 100.0),
            square(2, 500.0, 500.0, 100.0),
        ];
        resolve_adjacency(&mut regions);
        let first: Vec<_> = regions.iter().map(|r| r.adjacent.clone()).collect();
        resolve_adjacency(&mut regions);
        let second: Vec<_> = regions.iter().map(|r| r.adjacent.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn disconnected_clusters_are_bridged() {
        // Two touching pairs far from each other: four regions, two
        // components before repair.
        let mut regions = vec![
            square(0, 0.0, 0.0, 100.0),
            square(1, 100.0, 0.0, 100.0),
            square(2, 5000.0, 0.0, 100.0),
            square(3, 5100.0, 0.0, 100.0),
        ];
        resolve_adjacency(&mut regions);
        let labels = component_labels(&regions);
        assert!(
            labels.iter().all(|&l| l == 0),
            "All regions should end in one component, got labels {:?}",
            labels
        );
    }

    #[test]
    fn single_region_has_empty_adjacency() {
        let mut regions = vec![square(0, 0.0, 0.0, 100.0)];
        resolve_adjacency(&mut regions);
        assert!(regions[0].adjacent.is_empty());
    }

    #[test]
    fn stale_adjacency_is_cleared() {
        let mut regions = vec![square(0, 0.0, 0.0, 50.0), square(1, 60.0, 0.0, 50.0)];
        regions[0].adjacent.insert(99);
        resolve_adjacency(&mut regions);
        assert!(
            !regions[0].adjacent.contains(&99),
            "Resolution must rebuild adjacency from geometry alone"
        );
    }
}
