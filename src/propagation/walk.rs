//! Per-path assembly of the propagation integrand
//!
//! Walks the node sequence once, rebuilding at every interior node the
//! compass frame relative to the incoming edge, classifying the junction
//! there and accumulating edge attenuation data and rotation parity.

use std::f64::consts::FRAC_PI_2;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::model::{StreetEdge, StreetGraph};
use crate::propagation::junction::{ApproachWidths, Direction, Junction, Transmission};
use crate::{Error, NodeId};

/// Everything the integrator needs about one walk.
#[derive(Debug, Clone)]
pub(crate) struct Integrand {
    pub path: Vec<NodeId>,
    /// One transmission per interior node, in path order
    pub transmissions: Vec<Transmission>,
    /// One rotation parity per edge; entry 0 is the source-side reference
    /// and entry `e` applies to edge `e` and to the junction ahead of it
    pub rotations: Vec<u8>,
    /// Candidate discontinuity angles, already mapped to the source frame
    pub breaks: Vec<f64>,
    pub lengths: Vec<f64>,
    pub alphas: Vec<f64>,
}

/// Builds the [`Integrand`] for one enumerated walk.
///
/// # Errors
///
/// [`Error::PathTooShort`] for walks of fewer than two nodes; junction
/// construction errors propagate unchanged.
pub(crate) fn assemble_integrand(
    graph: &StreetGraph,
    path: &[NodeIndex],
    source_offset: f64,
    receiver_offset: f64,
) -> Result<Integrand, Error> {
    if path.len() < 2 {
        return Err(Error::PathTooShort);
    }

    let mut lengths = Vec::with_capacity(path.len() - 1);
    let mut alphas = Vec::with_capacity(path.len() - 1);
    for (&from, &to) in path.iter().tuple_windows() {
        let edge = street(graph, from, to)?;
        lengths.push(edge.length);
        alphas.push(edge.alpha);
    }

    let mut transmissions = Vec::with_capacity(path.len() - 2);
    let mut rotations = Vec::with_capacity(path.len() - 1);
    let mut breaks = Vec::new();
    let mut parity = 0u8;
    rotations.push(parity);

    for (&previous, &current, &following) in path.iter().tuple_windows() {
        let (widths, exit) = approach(graph, previous, current, following)?;
        let junction = Junction::new(&widths, exit, current.index())?;
        parity ^= u8::from(junction.rotates());
        rotations.push(parity);

        let transmission = junction.transmission();
        if let Some(angle) = transmission.breaking_point() {
            // Map the local saturation angle back to the source frame
            let global = if parity == 1 { FRAC_PI_2 - angle } else { angle };
            breaks.push(global);
        }
        transmissions.push(transmission);
    }

    lengths[0] -= source_offset;
    let last = lengths.len() - 1;
    lengths[last] -= receiver_offset;

    Ok(Integrand {
        path: path.iter().map(|node| node.index()).collect(),
        transmissions,
        rotations,
        breaks,
        lengths,
        alphas,
    })
}

/// Rebuilds the relative compass frame at `current` (entered from
/// `previous`) and bins the incident street widths by direction.
fn approach(
    graph: &StreetGraph,
    previous: NodeIndex,
    current: NodeIndex,
    following: NodeIndex,
) -> Result<(ApproachWidths, Direction), Error> {
    let entry = street(graph, current, previous)?.orientation;

    let mut widths = ApproachWidths::default();
    let mut exit = None;
    for neighbor in graph.neighbors(current) {
        let edge = street(graph, current, neighbor)?;
        let direction = Direction::relative_to(edge.orientation, entry);
        widths.set(direction, edge.width);
        if neighbor == following {
            exit = Some(direction);
        }
    }

    let exit = exit.ok_or_else(|| {
        Error::InvalidData(format!(
            "walk step {} -> {} does not follow a street",
            current.index(),
            following.index()
        ))
    })?;
    Ok((widths, exit))
}

fn street(graph: &StreetGraph, from: NodeIndex, to: NodeIndex) -> Result<&StreetEdge, Error> {
    graph.edge(from, to).ok_or_else(|| {
        Error::InvalidData(format!(
            "no street between nodes {} and {}",
            from.index(),
            to.index()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::street_graph_from_matrix;

    fn edge(orientation: u8, width: f64, length: f64, alpha: f64) -> Option<StreetEdge> {
        Some(StreetEdge {
            length,
            width,
            alpha,
            orientation,
        })
    }

    /// 0 - 1 - 2 with a right-angle bend at node 1
    fn bent_chain() -> StreetGraph {
        let matrix = vec![
            vec![None, edge(0, 5.0, 10.0, 0.1), None],
            vec![edge(2, 5.0, 10.0, 0.1), None, edge(3, 5.0, 20.0, 0.2)],
            vec![None, edge(1, 5.0, 20.0, 0.2), None],
        ];
        street_graph_from_matrix(&matrix).unwrap()
    }

    fn path(ids: &[usize]) -> Vec<NodeIndex> {
        ids.iter().copied().map(NodeIndex::new).collect()
    }

    #[test]
    fn single_node_path_is_too_short() {
        let graph = bent_chain();
        let result = assemble_integrand(&graph, &path(&[1]), 0.0, 0.0);
        assert!(matches!(result, Err(Error::PathTooShort)));
    }

    #[test]
    fn two_node_path_has_no_junctions() {
        let graph = bent_chain();
        let integrand = assemble_integrand(&graph, &path(&[0, 1]), 0.0, 0.0).unwrap();
        assert!(integrand.transmissions.is_empty());
        assert_eq!(integrand.rotations, vec![0]);
        assert_eq!(integrand.lengths, vec![10.0]);
        assert_eq!(integrand.alphas, vec![0.1]);
    }

    #[test]
    fn bend_flips_rotation_parity() {
        let graph = bent_chain();
        let integrand = assemble_integrand(&graph, &path(&[0, 1, 2]), 0.0, 0.0).unwrap();
        assert_eq!(integrand.path, vec![0, 1, 2]);
        // Edge 1->2 sits in slot 3 = entry 2 + 1, a right turn
        assert_eq!(integrand.rotations, vec![0, 1]);
        assert_eq!(
            integrand.transmissions,
            vec![Transmission::Turning {
                ratio: 1.0,
                lanes: 2.0
            }]
        );
        assert_eq!(integrand.lengths, vec![10.0, 20.0]);
        assert_eq!(integrand.alphas, vec![0.1, 0.2]);
        // Saturation angle atan(1) mapped through the odd parity
        assert_eq!(integrand.breaks.len(), 1);
        assert!((integrand.breaks[0] - FRAC_PI_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn offsets_trim_the_terminal_edges() {
        let graph = bent_chain();
        let integrand = assemble_integrand(&graph, &path(&[0, 1, 2]), 2.0, 3.0).unwrap();
        assert_eq!(integrand.lengths, vec![8.0, 17.0]);
    }

    #[test]
    fn revisiting_walk_classifies_the_dead_end() {
        let graph = bent_chain();
        let integrand = assemble_integrand(&graph, &path(&[0, 1, 0, 1, 2]), 0.0, 0.0).unwrap();
        // Interior nodes: 1 (bend, exit backward), 0 (dead-end), 1 (bend, right)
        assert_eq!(
            integrand.transmissions[0],
            Transmission::Crossing { ratio: 1.0 }
        );
        assert_eq!(integrand.transmissions[1], Transmission::Constant(1.0));
        assert_eq!(
            integrand.transmissions[2],
            Transmission::Turning {
                ratio: 1.0,
                lanes: 2.0
            }
        );
        assert_eq!(integrand.rotations, vec![0, 0, 0, 1]);
    }
}
