use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters used to generate a puzzle.
/// Stored with the puzzle for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleParams {
    /// RNG seed; 0 means "pick a random seed".
    #[serde(default)]
    pub seed: u64,
    pub region_count: u32,
    /// Boundary irregularity in [0, 1].
    pub complexity: f64,
    #[serde(default = "default_board_width")]
    pub board_width: f64,
    #[serde(default = "default_board_height")]
    pub board_height: f64,
}

fn default_board_width() -> f64 {
    800.0
}

fn default_board_height() -> f64 {
    600.0
}

impl Default for PuzzleParams {
    fn default() -> Self {
        PuzzleParams {
            seed: 0,
            region_count: 8,
            complexity: 0.5,
            board_width: default_board_width(),
            board_height: default_board_height(),
        }
    }
}

impl PuzzleParams {
    /// Load puzzle parameters from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let params: Self = toml::from_str(&content)
            .map_err(|e| format!("Invalid TOML in {}: {}", path.display(), e))?;
        params.validate()?;
        Ok(params)
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.region_count < 1 || self.region_count > 32 {
            return Err(format!(
                "region_count must be 1-32, got {}",
                self.region_count
            ));
        }
        if !(0.0..=1.0).contains(&self.complexity) {
            return Err(format!(
                "complexity must be 0.0-1.0, got {}",
                self.complexity
            ));
        }
        if self.board_width < 100.0 {
            return Err(format!(
                "board_width must be >= 100, got {}",
                self.board_width
            ));
        }
        if self.board_height < 100.0 {
            return Err(format!(
                "board_height must be >= 100, got {}",
                self.board_height
            ));
        }
        Ok(())
    }
}
