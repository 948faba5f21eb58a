//! Street network components

use serde::{Deserialize, Serialize};

/// Number of compass slots an edge orientation can occupy at a node.
pub const COMPASS_SLOTS: u8 = 4;

/// Street segment attributes, as seen departing the tail node.
///
/// An undirected street between nodes `i` and `j` appears twice in the
/// adjacency matrix, once per direction, and the two records may differ
/// in `orientation` (each node assigns its own compass slot to the edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreetEdge {
    /// Physical length of the segment
    pub length: f64,
    /// Street width, drives the junction transmission model
    pub width: f64,
    /// Absorption coefficient in `[0, 1]`, power lost per unit of
    /// effective path length
    pub alpha: f64,
    /// Compass slot in `{0, 1, 2, 3}` of the edge at its tail node
    pub orientation: u8,
}
