use std::collections::BTreeMap;

use crate::board::Puzzle;
use crate::geometry;

/// Aggregate metrics for a generated puzzle, used by inspection tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleStatistics {
    pub region_count: usize,
    pub border_count: usize,
    pub minimum_colors: u32,
    pub min_degree: usize,
    pub max_degree: usize,
    pub avg_degree: f64,
    pub avg_vertex_count: f64,
    pub total_area: f64,
    pub degree_distribution: BTreeMap<usize, u32>,
}

/// Compute statistics for a generated puzzle.
pub fn compute_statistics(puzzle: &Puzzle) -> PuzzleStatistics {
    let n = puzzle.regions.len();
    if n == 0 {
        return PuzzleStatistics {
            region_count: 0,
            border_count: 0,
            minimum_colors: puzzle.minimum_colors,
            min_degree: 0,
            max_degree: 0,
            avg_degree: 0.0,
            avg_vertex_count: 0.0,
            total_area: 0.0,
            degree_distribution: BTreeMap::new(),
        };
    }

    let degrees: Vec<usize> = puzzle.regions.iter().map(|r| r.degree()).collect();
    let degree_sum: usize = degrees.iter().sum();
    let vertex_sum: usize = puzzle.regions.iter().map(|r| r.vertices.len()).sum();
    let total_area: f64 = puzzle
        .regions
        .iter()
        .map(|r| geometry::polygon_area(&r.vertices))
        .sum();

    let mut degree_distribution = BTreeMap::new();
    for &d in &degrees {
        *degree_distribution.entry(d).or_insert(0) += 1;
    }

    PuzzleStatistics {
        region_count: n,
        border_count: degree_sum / 2,
        minimum_colors: puzzle.minimum_colors,
        min_degree: degrees.iter().copied().min().unwrap_or(0),
        max_degree: degrees.iter().copied().max().unwrap_or(0),
        avg_degree: degree_sum as f64 / n as f64,
        avg_vertex_count: vertex_sum as f64 / n as f64,
        total_area,
        degree_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::generation::generate_puzzle;
    use crate::config::params::PuzzleParams;

    fn puzzle(seed: u64, region_count: u32) -> Puzzle {
        generate_puzzle(&PuzzleParams {
            seed,
            region_count,
            complexity: 0.5,
            board_width: 800.0,
            board_height: 600.0,
        })
    }

    #[test]
    fn statistics_match_region_collection() {
        let p = puzzle(42, 8);
        let stats = compute_statistics(&p);
        assert_eq!(stats.region_count, 8);
        assert_eq!(stats.minimum_colors, p.minimum_colors);
        assert!(stats.min_degree >= 1, "No region may be isolated");
        assert!(stats.max_degree <= 7);
        assert!(stats.avg_degree > 0.0);
        assert!(stats.total_area > 0.0);
    }

    #[test]
    fn degree_distribution_sums_to_region_count() {
        let p = puzzle(7, 10);
        let stats = compute_statistics(&p);
        let total: u32 = stats.degree_distribution.values().sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn border_count_is_half_degree_sum() {
        let p = puzzle(3, 6);
        let stats = compute_statistics(&p);
        let degree_sum: usize = p.regions.iter().map(|r| r.degree()).sum();
        assert_eq!(stats.border_count, degree_sum / 2);
    }

    #[test]
    fn single_region_statistics() {
        let p = puzzle(9, 1);
        let stats = compute_statistics(&p);
        assert_eq!(stats.region_count, 1);
        assert_eq!(stats.border_count, 0);
        assert_eq!(stats.min_degree, 0);
        assert_eq!(stats.minimum_colors, 1);
    }
}
