//! tintboard: a map-coloring puzzle generation core.
//!
//! The pipeline is one-way: an abstract connected graph is synthesized
//! ([`board::graph`]), the board rectangle is partitioned into one organic
//! polygon per node ([`board::partition`]), adjacency is re-derived from
//! the polygon geometry ([`board::adjacency`]) and supersedes the abstract
//! edges, and the exact chromatic number is certified by backtracking
//! ([`solver`]). Everything is a pure function of the parameters; a fixed
//! seed reproduces a puzzle exactly.

pub mod board;
pub mod cli;
pub mod config;
pub mod geometry;
pub mod solver;
