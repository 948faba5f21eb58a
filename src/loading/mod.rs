//! Construction of a [`StreetGraph`] from a modified adjacency matrix
//!
//! The matrix is N×N; cell `(i, j)` is `None` when no street connects
//! node `i` to node `j`, otherwise a [`StreetEdge`] record describing the
//! segment as seen departing node `i`. Malformed matrices are rejected
//! here so the propagation engine can assume a well-formed network.

use log::info;
use petgraph::graph::{Graph, NodeIndex};

use crate::model::components::COMPASS_SLOTS;
use crate::{Error, StreetEdge, StreetGraph};

/// Builds a street graph from an adjacency matrix of edge records.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if the matrix is not square, has
/// entries on its diagonal, is asymmetric in edge presence, carries
/// out-of-range attributes, or assigns the same orientation slot to two
/// outgoing edges of one node.
pub fn street_graph_from_matrix(matrix: &[Vec<Option<StreetEdge>>]) -> Result<StreetGraph, Error> {
    validate_shape(matrix)?;

    let nodes = matrix.len();
    let mut graph = Graph::with_capacity(nodes, nodes * 2);
    for id in 0..nodes {
        graph.add_node(id);
    }

    for (i, row) in matrix.iter().enumerate() {
        let mut used_slots = [false; COMPASS_SLOTS as usize];
        for (j, cell) in row.iter().enumerate() {
            let Some(edge) = cell else { continue };
            validate_edge(i, j, edge)?;
            if used_slots[edge.orientation as usize] {
                return Err(Error::InvalidData(format!(
                    "node {i} has two outgoing streets in orientation slot {}",
                    edge.orientation
                )));
            }
            used_slots[edge.orientation as usize] = true;
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), *edge);
        }
    }

    let graph = StreetGraph::new(graph);
    info!(
        "Street graph created with {} nodes and {} streets",
        graph.node_count(),
        graph.street_count()
    );
    Ok(graph)
}

/// Builds a street graph from a JSON adjacency matrix (`null` cells mark
/// absent streets).
///
/// # Errors
///
/// Returns [`Error::InvalidData`] on malformed JSON or on any condition
/// rejected by [`street_graph_from_matrix`].
pub fn street_graph_from_json(json: &str) -> Result<StreetGraph, Error> {
    let matrix: Vec<Vec<Option<StreetEdge>>> = serde_json::from_str(json)
        .map_err(|e| Error::InvalidData(format!("adjacency matrix JSON: {e}")))?;
    street_graph_from_matrix(&matrix)
}

fn validate_shape(matrix: &[Vec<Option<StreetEdge>>]) -> Result<(), Error> {
    let nodes = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != nodes {
            return Err(Error::InvalidData(format!(
                "adjacency matrix is not square: row {i} has {} cells, expected {nodes}",
                row.len()
            )));
        }
    }
    for i in 0..nodes {
        if matrix[i][i].is_some() {
            return Err(Error::InvalidData(format!("self-loop at node {i}")));
        }
        for j in (i + 1)..nodes {
            if matrix[i][j].is_some() != matrix[j][i].is_some() {
                return Err(Error::InvalidData(format!(
                    "street presence between nodes {i} and {j} is asymmetric"
                )));
            }
        }
    }
    Ok(())
}

fn validate_edge(i: usize, j: usize, edge: &StreetEdge) -> Result<(), Error> {
    if !(edge.length > 0.0) {
        return Err(Error::InvalidData(format!(
            "street {i}->{j} has non-positive length {}",
            edge.length
        )));
    }
    if !(edge.width > 0.0) {
        return Err(Error::InvalidData(format!(
            "street {i}->{j} has non-positive width {}",
            edge.width
        )));
    }
    if !(0.0..=1.0).contains(&edge.alpha) {
        return Err(Error::InvalidData(format!(
            "street {i}->{j} has absorption {} outside [0, 1]",
            edge.alpha
        )));
    }
    if edge.orientation >= COMPASS_SLOTS {
        return Err(Error::InvalidData(format!(
            "street {i}->{j} has orientation {} outside 0..4",
            edge.orientation
        )));
    }
    Ok(())
}
