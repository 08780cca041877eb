use std::collections::BTreeMap;
use std::time::Instant;

use crate::board::generation::{generate_puzzle, print_puzzle_summary};
use crate::board::stats::compute_statistics;
use crate::config::params::PuzzleParams;

/// Generate one puzzle and print it, either as a human-readable summary or
/// as JSON for a renderer.
pub fn generate(params: &PuzzleParams, json: bool) -> Result<(), String> {
    params.validate()?;

    let start = Instant::now();
    let puzzle = generate_puzzle(params);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        let rendered = serde_json::to_string_pretty(&puzzle)
            .map_err(|e| format!("Cannot serialize puzzle: {}", e))?;
        println!("{}", rendered);
    } else {
        print_puzzle_summary(&puzzle);
        println!("\nGenerated in {:.1} ms", elapsed_ms);
    }
    Ok(())
}

/// Generate `count` puzzles and print aggregate statistics across them.
///
/// With a nonzero seed, run i uses `seed + i` so the whole batch is
/// reproducible; with seed 0 every run picks its own random seed.
pub fn sample(params: &PuzzleParams, count: u32) -> Result<(), String> {
    params.validate()?;
    if count == 0 {
        return Err("Sample count must be at least 1".to_string());
    }

    let mut color_distribution: BTreeMap<u32, u32> = BTreeMap::new();
    let mut total_borders = 0usize;
    let mut total_degree = 0.0;
    let start = Instant::now();

    for i in 0..count {
        let run_params = PuzzleParams {
            seed: if params.seed == 0 {
                0
            } else {
                params.seed + i as u64
            },
            ..params.clone()
        };
        let puzzle = generate_puzzle(&run_params);
        let stats = compute_statistics(&puzzle);
        *color_distribution.entry(stats.minimum_colors).or_insert(0) += 1;
        total_borders += stats.border_count;
        total_degree += stats.avg_degree;
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    println!("=== Sample: {} puzzles ===", count);
    println!(
        "Regions: {}  Complexity: {:.2}  Board: {:.0} x {:.0}",
        params.region_count, params.complexity, params.board_width, params.board_height
    );
    println!("\nMinimum colors:");
    for (colors, runs) in &color_distribution {
        let pct = *runs as f64 / count as f64 * 100.0;
        println!("  {} colors: {:>4} ({:.1}%)", colors, runs, pct);
    }
    println!("\nAverage borders: {:.1}", total_borders as f64 / count as f64);
    println!("Average degree: {:.2}", total_degree / count as f64);
    println!(
        "Total time: {:.0} ms ({:.1} ms/puzzle)",
        elapsed_ms,
        elapsed_ms / count as f64
    );
    Ok(())
}
