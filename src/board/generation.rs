use std::collections::BTreeMap;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::board::adjacency::resolve_adjacency;
use crate::board::partition::partition;
use crate::board::region::Region;
use crate::board::{Puzzle, graph};
use crate::config::difficulty::Difficulty;
use crate::config::params::PuzzleParams;
use crate::geometry;
use crate::solver;

/// Generate a new puzzle from the given parameters.
///
/// If `params.seed` is 0, a random seed is chosen. The actual seed used is
/// stored in the returned puzzle's `params` for reproducibility.
///
/// Pipeline: synthesize an abstract connected graph, partition the board
/// into one polygon per node, re-derive adjacency from the polygon
/// geometry (which supersedes the abstract edges), then certify the
/// minimum color count with the exact solver.
pub fn generate_puzzle(params: &PuzzleParams) -> Puzzle {
    let seed = if params.seed == 0 {
        rand::thread_rng().r#gen()
    } else {
        params.seed
    };
    let resolved_params = PuzzleParams {
        seed,
        ..params.clone()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Harder boards get denser abstract graphs; the bound inside
    // `synthesize` keeps density in planar range.
    let target_connectivity = 1.0 + params.complexity;
    let graph = graph::synthesize(params.region_count, target_connectivity, &mut rng);

    let polygons = partition(
        graph.len() as u32,
        params.board_width,
        params.board_height,
        params.complexity,
        &mut rng,
    );

    let mut regions: Vec<Region> = polygons
        .into_iter()
        .enumerate()
        .map(|(i, (vertices, center))| Region::new(i as u32, vertices, center))
        .collect();

    resolve_adjacency(&mut regions);
    let minimum_colors = solver::chromatic_number(&regions);

    let id = Uuid::from_bytes(rng.r#gen());

    Puzzle {
        id,
        name: format!("Puzzle-{}", seed),
        minimum_colors,
        params: resolved_params,
        regions,
    }
}

/// Generate a puzzle for a difficulty tier and progression level on a
/// board of the given size, with a random seed.
pub fn generate_for_level(
    difficulty: Difficulty,
    level: u32,
    board_width: f64,
    board_height: f64,
) -> Puzzle {
    generate_puzzle(&difficulty.params_for(level, board_width, board_height))
}

/// Print a summary of the generated puzzle.
pub fn print_puzzle_summary(puzzle: &Puzzle) {
    println!("=== Puzzle Summary ===");
    println!("Name: {}", puzzle.name);
    println!("Seed: {}", puzzle.params.seed);
    println!(
        "Board: {:.0} x {:.0}",
        puzzle.params.board_width, puzzle.params.board_height
    );
    println!("Regions: {}", puzzle.regions.len());
    println!("Minimum colors: {}", puzzle.minimum_colors);

    let edge_count: usize = puzzle.regions.iter().map(|r| r.degree()).sum::<usize>() / 2;
    println!("Borders: {}", edge_count);

    let mut degree_counts: BTreeMap<usize, u32> = BTreeMap::new();
    for region in &puzzle.regions {
        *degree_counts.entry(region.degree()).or_insert(0) += 1;
    }
    println!("\nDegree distribution:");
    for (degree, count) in &degree_counts {
        println!("  {:>2} neighbors: {:>3} region(s)", degree, count);
    }

    println!("\nRegions:");
    for region in &puzzle.regions {
        let area = geometry::polygon_area(&region.vertices);
        let neighbors: Vec<String> = region.adjacent.iter().map(|id| id.to_string()).collect();
        println!(
            "  #{:<3} {:>3} vertices  area {:>10.1}  center ({:>6.1}, {:>6.1})  adj [{}]",
            region.id,
            region.vertices.len(),
            area,
            region.center.x,
            region.center.y,
            neighbors.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn params(seed: u64, region_count: u32) -> PuzzleParams {
        PuzzleParams {
            seed,
            region_count,
            complexity: 0.5,
            board_width: 800.0,
            board_height: 600.0,
        }
    }

    fn adjacency_is_connected(regions: &[Region]) -> bool {
        if regions.is_empty() {
            return true;
        }
        let mut visited = vec![false; regions.len()];
        let mut queue = VecDeque::from([0usize]);
        visited[0] = true;
        let mut count = 1;
        while let Some(i) = queue.pop_front() {
            for &neighbor_id in &regions[i].adjacent {
                let j = regions.iter().position(|r| r.id == neighbor_id).unwrap();
                if !visited[j] {
                    visited[j] = true;
                    count += 1;
                    queue.push_back(j);
                }
            }
        }
        count == regions.len()
    }

    #[test]
    fn generates_requested_region_count() {
        for count in [1, 4, 8, 12, 16] {
            let puzzle = generate_puzzle(&params(42, count));
            assert_eq!(
                puzzle.regions.len(),
                count as usize,
                "Requested {} regions",
                count
            );
        }
    }

    #[test]
    fn region_ids_are_dense_and_stable() {
        let puzzle = generate_puzzle(&params(7, 10));
        for (i, region) in puzzle.regions.iter().enumerate() {
            assert_eq!(region.id, i as u32);
        }
    }

    #[test]
    fn adjacency_is_symmetric_and_connected() {
        for seed in 1..=10 {
            let puzzle = generate_puzzle(&params(seed, 9));
            for a in &puzzle.regions {
                for &b_id in &a.adjacent {
                    let b = puzzle.regions.iter().find(|r| r.id == b_id).unwrap();
                    assert!(
                        b.adjacent.contains(&a.id),
                        "Seed {}: region {} lists {}, not mirrored",
                        seed,
                        a.id,
                        b_id
                    );
                }
            }
            assert!(
                adjacency_is_connected(&puzzle.regions),
                "Seed {}: adjacency graph disconnected",
                seed
            );
        }
    }

    #[test]
    fn all_polygons_are_simple() {
        for seed in 1..=5 {
            let puzzle = generate_puzzle(&params(seed, 12));
            for region in &puzzle.regions {
                assert!(region.vertices.len() >= 3);
                assert!(
                    crate::geometry::polygon_is_simple(&region.vertices),
                    "Seed {}: region {} self-intersects",
                    seed,
                    region.id
                );
            }
        }
    }

    #[test]
    fn minimum_colors_within_expected_range() {
        for seed in 1..=10 {
            let puzzle = generate_puzzle(&params(seed, 10));
            assert!(
                (2..=10).contains(&puzzle.minimum_colors),
                "Seed {}: minimum colors {} out of range",
                seed,
                puzzle.minimum_colors
            );
        }
    }

    #[test]
    fn single_region_puzzle() {
        let puzzle = generate_puzzle(&params(3, 1));
        assert_eq!(puzzle.regions.len(), 1);
        assert_eq!(puzzle.minimum_colors, 1);
        assert!(puzzle.regions[0].adjacent.is_empty());
    }

    #[test]
    fn two_region_puzzle_needs_two_colors() {
        let puzzle = generate_puzzle(&params(5, 2));
        assert_eq!(puzzle.minimum_colors, 2);
        assert!(puzzle.regions[0].adjacent.contains(&1));
    }

    #[test]
    fn regions_start_uncolored() {
        let puzzle = generate_puzzle(&params(11, 6));
        assert!(puzzle.regions.iter().all(|r| r.color.is_none()));
    }

    #[test]
    fn generation_is_deterministic() {
        let p1 = generate_puzzle(&params(1234, 10));
        let p2 = generate_puzzle(&params(1234, 10));
        assert_eq!(p1.regions, p2.regions);
        assert_eq!(p1.minimum_colors, p2.minimum_colors);
        assert_eq!(p1.id, p2.id);
    }

    #[test]
    fn different_seeds_differ() {
        let p1 = generate_puzzle(&params(1, 10));
        let p2 = generate_puzzle(&params(2, 10));
        assert_ne!(p1.regions, p2.regions);
    }

    #[test]
    fn seed_zero_resolves_to_random_seed() {
        let puzzle = generate_puzzle(&params(0, 4));
        assert_ne!(
            puzzle.params.seed, 0,
            "Resolved seed should be stored in params"
        );
    }

    #[test]
    fn tier_and_level_drive_region_count() {
        let puzzle = generate_for_level(Difficulty::Easy, 1, 800.0, 600.0);
        assert_eq!(puzzle.regions.len(), 4);
        assert_ne!(puzzle.params.seed, 0);

        let puzzle = generate_for_level(Difficulty::Hard, 3, 800.0, 600.0);
        assert_eq!(puzzle.regions.len(), 10);
    }

    #[test]
    fn chromatic_number_is_achievable_on_generated_puzzles() {
        // Color each puzzle with its own certified count via the greedy
        // order; exactness is covered in solver tests, achievability must
        // hold here too.
        for seed in 1..=5 {
            let puzzle = generate_puzzle(&params(seed, 8));
            assert!(
                puzzle.minimum_colors <= solver::greedy_upper_bound(&puzzle.regions),
                "Seed {}: exact exceeds greedy bound",
                seed
            );
        }
    }
}
