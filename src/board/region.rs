use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A 2D board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One colorable puzzle piece.
///
/// `vertices` is a closed simple polygon (the edge from the last vertex back
/// to the first is implied). `adjacent` holds the ids of every region that
/// shares a border, kept symmetric across the whole collection by the
/// adjacency resolver. `color` is a 1-based color index owned by gameplay;
/// it is `None` until the player colors the region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub vertices: Vec<Point>,
    pub center: Point,
    pub color: Option<u8>,
    pub adjacent: BTreeSet<u32>,
}

impl Region {
    /// Create an uncolored region with no adjacency.
    /// The adjacency resolver fills in `adjacent` afterwards.
    pub fn new(id: u32, vertices: Vec<Point>, center: Point) -> Self {
        Self {
            id,
            vertices,
            center,
            color: None,
            adjacent: BTreeSet::new(),
        }
    }

    /// Number of borders this region shares with other regions.
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }
}
