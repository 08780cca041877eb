use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::params::PuzzleParams;

/// Puzzle difficulty tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no variant is skipped")
            .get_name()
            .fmt(f)
    }
}

impl Difficulty {
    /// Boundary irregularity used for this tier.
    pub fn complexity(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.55,
            Difficulty::Hard => 0.8,
        }
    }

    /// Region count at level 1.
    fn base_regions(self) -> u32 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }

    /// Region count ceiling for the tier.
    fn max_regions(self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 12,
            Difficulty::Hard => 16,
        }
    }

    /// Derive generation parameters for a progression level within this
    /// tier. The region count grows by one per level up to the tier
    /// ceiling; levels start at 1 (level 0 is treated as 1). The seed is
    /// left at 0 so generation picks a random one unless the caller
    /// overrides it.
    pub fn params_for(self, level: u32, board_width: f64, board_height: f64) -> PuzzleParams {
        let step = level.max(1) - 1;
        let region_count = (self.base_regions() + step).min(self.max_regions());
        PuzzleParams {
            seed: 0,
            region_count,
            complexity: self.complexity(),
            board_width,
            board_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_uses_base_region_count() {
        assert_eq!(Difficulty::Easy.params_for(1, 800.0, 600.0).region_count, 4);
        assert_eq!(Difficulty::Medium.params_for(1, 800.0, 600.0).region_count, 6);
        assert_eq!(Difficulty::Hard.params_for(1, 800.0, 600.0).region_count, 8);
    }

    #[test]
    fn region_count_grows_with_level() {
        let p3 = Difficulty::Easy.params_for(3, 800.0, 600.0);
        assert_eq!(p3.region_count, 6);
    }

    #[test]
    fn region_count_is_capped_per_tier() {
        assert_eq!(Difficulty::Easy.params_for(50, 800.0, 600.0).region_count, 8);
        assert_eq!(
            Difficulty::Hard.params_for(50, 800.0, 600.0).region_count,
            16
        );
    }

    #[test]
    fn level_zero_behaves_like_level_one() {
        assert_eq!(
            Difficulty::Medium.params_for(0, 800.0, 600.0),
            Difficulty::Medium.params_for(1, 800.0, 600.0)
        );
    }

    #[test]
    fn complexity_rises_with_tier() {
        assert!(Difficulty::Easy.complexity() < Difficulty::Medium.complexity());
        assert!(Difficulty::Medium.complexity() < Difficulty::Hard.complexity());
    }

    #[test]
    fn display_matches_cli_names() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn derived_params_validate() {
        for tier in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for level in [1, 5, 20] {
                let params = tier.params_for(level, 800.0, 600.0);
                assert!(
                    params.validate().is_ok(),
                    "Tier {:?} level {} produced invalid params",
                    tier,
                    level
                );
            }
        }
    }
}
