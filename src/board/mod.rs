pub mod adjacency;
pub mod generation;
pub mod graph;
pub mod partition;
pub mod region;
pub mod stats;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::params::PuzzleParams;
pub use region::{Point, Region};

/// A fully generated, playable puzzle: the region collection with resolved
/// adjacency plus its certified minimum color count. `params` holds the
/// resolved seed, so an identical puzzle can be regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: Uuid,
    pub name: String,
    pub minimum_colors: u32,
    pub params: PuzzleParams,
    pub regions: Vec<Region>,
}
