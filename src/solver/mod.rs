//! Exact and heuristic coloring over the resolved region adjacency.
//!
//! Every function is stateless and takes the full region snapshot; the
//! adjacency consulted is whatever the resolver stored on the regions,
//! never the synthesizer's abstract graph.

pub mod play;

use std::collections::HashMap;

use tracing::warn;

use crate::board::region::Region;

/// Backtracking node budget before falling back to the greedy bound.
/// Generous for the intended 4-16 region range, where the search finishes
/// in microseconds.
const NODE_BUDGET: u64 = 2_000_000;

/// Neighbor positions per region, with regions taken in ascending id order.
fn neighbor_positions(regions: &[Region]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by_key(|&i| regions[i].id);

    let position_of: HashMap<u32, usize> = order
        .iter()
        .enumerate()
        .map(|(pos, &i)| (regions[i].id, pos))
        .collect();

    let neighbors = order
        .iter()
        .map(|&i| {
            regions[i]
                .adjacent
                .iter()
                .filter_map(|id| position_of.get(id).copied())
                .collect()
        })
        .collect();

    (order, neighbors)
}

/// Exact minimum number of colors for the region collection.
///
/// For k = 1, 2, ... a depth-first backtracking search assigns colors in
/// ascending region-id order, pruning as soon as a neighbor holds the
/// candidate color. The first feasible k is returned; k = n (one color per
/// region) always succeeds, so the loop terminates. If the node budget is
/// exhausted first, the greedy upper bound is returned instead.
pub fn chromatic_number(regions: &[Region]) -> u32 {
    let n = regions.len();
    if n == 0 {
        return 0;
    }

    let (_, neighbors) = neighbor_positions(regions);
    let mut budget = NODE_BUDGET;
    let mut assignment = vec![0u8; n];

    for k in 1..=n as u8 {
        match colorable(0, k, &mut assignment, &neighbors, &mut budget) {
            Some(true) => return k as u32,
            Some(false) => continue,
            None => {
                let bound = greedy_upper_bound(regions);
                warn!(
                    regions = n,
                    bound, "Backtracking budget exhausted, returning greedy upper bound"
                );
                return bound;
            }
        }
    }
    n as u32
}

/// Depth-first search for a complete coloring of positions `pos..` with
/// colors `1..=k`. `assignment[p] == 0` means uncolored. Returns `None`
/// when the node budget runs out.
fn colorable(
    pos: usize,
    k: u8,
    assignment: &mut [u8],
    neighbors: &[Vec<usize>],
    budget: &mut u64,
) -> Option<bool> {
    if pos == assignment.len() {
        return Some(true);
    }
    if *budget == 0 {
        return None;
    }
    *budget -= 1;

    'colors: for color in 1..=k {
        for &neighbor in &neighbors[pos] {
            if assignment[neighbor] == color {
                continue 'colors;
            }
        }
        assignment[pos] = color;
        match colorable(pos + 1, k, assignment, neighbors, budget) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => return None,
        }
        assignment[pos] = 0;
    }
    Some(false)
}

/// Welsh-Powell greedy coloring: regions in descending degree order (id
/// ascending on ties), each taking the smallest color unused by its
/// already-colored neighbors. Returned as colors per position in ascending
/// id order.
fn greedy_assignment(regions: &[Region]) -> Vec<u8> {
    let n = regions.len();
    let (order, neighbors) = neighbor_positions(regions);

    let mut by_degree: Vec<usize> = (0..n).collect();
    by_degree.sort_by_key(|&pos| {
        let i = order[pos];
        (std::cmp::Reverse(regions[i].adjacent.len()), regions[i].id)
    });

    let mut assignment = vec![0u8; n];
    for &pos in &by_degree {
        let mut color = 1u8;
        while neighbors[pos].iter().any(|&nb| assignment[nb] == color) {
            color += 1;
        }
        assignment[pos] = color;
    }
    assignment
}

/// Upper bound on the chromatic number via the Welsh-Powell heuristic.
/// Cheaper than the exact search but not guaranteed minimal.
pub fn greedy_upper_bound(regions: &[Region]) -> u32 {
    greedy_assignment(regions)
        .into_iter()
        .max()
        .unwrap_or(0) as u32
}

/// True iff any region adjacent to `region_id` currently holds
/// `proposed_color`. This is the live legality check behind every coloring
/// attempt; only direct adjacency counts.
pub fn has_conflict(region_id: u32, proposed_color: u8, regions: &[Region]) -> bool {
    let Some(region) = regions.iter().find(|r| r.id == region_id) else {
        return false;
    };
    region.adjacent.iter().any(|neighbor_id| {
        regions
            .iter()
            .find(|r| r.id == *neighbor_id)
            .is_some_and(|neighbor| neighbor.color == Some(proposed_color))
    })
}
