//! Enumeration of all source→receiver walks within a length-slack budget

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::Error;
use crate::model::StreetGraph;
use crate::routing::hop_distances;

/// Enumerates every walk from `source` to `receiver` whose hop length does
/// not exceed the shortest-path length plus `threshold`.
///
/// Walks are node sequences and may revisit nodes; they are pruned only by
/// the remaining budget and the receiver's distance table. On dense or
/// cyclic networks a large `threshold` therefore yields exponentially many
/// walks — an inherent property of the enumeration, to be weighed when
/// choosing the threshold.
///
/// # Errors
///
/// Returns [`Error::NoRoute`] if the receiver is unreachable from the
/// source.
pub fn find_paths(
    graph: &StreetGraph,
    source: NodeIndex,
    receiver: NodeIndex,
    threshold: u32,
) -> Result<Vec<Vec<NodeIndex>>, Error> {
    let to_receiver = hop_distances(graph, receiver);
    let shortest = to_receiver.get(&source).copied().ok_or(Error::NoRoute {
        src: source.index(),
        receiver: receiver.index(),
    })?;

    let search = WalkSearch {
        graph,
        to_receiver: &to_receiver,
        receiver,
    };
    // The budget counts nodes still placeable on the walk, hence the +1
    Ok(search.walks_from(source, shortest + threshold + 1))
}

struct WalkSearch<'a> {
    graph: &'a StreetGraph,
    to_receiver: &'a HashMap<NodeIndex, u32>,
    receiver: NodeIndex,
}

impl WalkSearch<'_> {
    fn walks_from(&self, node: NodeIndex, budget: u32) -> Vec<Vec<NodeIndex>> {
        let mut walks = Vec::new();
        let reachable = self
            .to_receiver
            .get(&node)
            .is_some_and(|&distance| distance < budget);
        if budget > 0 && reachable {
            for neighbor in self.graph.neighbors(node) {
                for tail in self.walks_from(neighbor, budget - 1) {
                    let mut walk = Vec::with_capacity(tail.len() + 1);
                    walk.push(node);
                    walk.extend(tail);
                    walks.push(walk);
                }
            }
        }
        // The receiver terminates a walk regardless of remaining budget
        if node == self.receiver {
            walks.push(vec![node]);
        }
        walks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::street_graph_from_matrix;
    use crate::model::StreetEdge;

    fn edge(orientation: u8) -> Option<StreetEdge> {
        Some(StreetEdge {
            length: 1.0,
            width: 1.0,
            alpha: 0.0,
            orientation,
        })
    }

    /// 0 - 1 - 2 chain
    fn chain() -> StreetGraph {
        let matrix = vec![
            vec![None, edge(0), None],
            vec![edge(2), None, edge(0)],
            vec![None, edge(2), None],
        ];
        street_graph_from_matrix(&matrix).unwrap()
    }

    /// 4-cycle: 0 - 1, 1 - 2, 2 - 3, 3 - 0
    fn square() -> StreetGraph {
        let matrix = vec![
            vec![None, edge(0), None, edge(1)],
            vec![edge(2), None, edge(1), None],
            vec![None, edge(3), None, edge(2)],
            vec![edge(3), None, edge(0), None],
        ];
        street_graph_from_matrix(&matrix).unwrap()
    }

    fn ids(walks: Vec<Vec<NodeIndex>>) -> Vec<Vec<usize>> {
        let mut walks: Vec<Vec<usize>> = walks
            .into_iter()
            .map(|walk| walk.into_iter().map(NodeIndex::index).collect())
            .collect();
        walks.sort();
        walks
    }

    #[test]
    fn zero_threshold_yields_shortest_walk_only() {
        let graph = chain();
        let walks = find_paths(&graph, NodeIndex::new(0), NodeIndex::new(2), 0).unwrap();
        assert_eq!(ids(walks), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn slack_admits_walks_that_revisit_nodes() {
        let graph = chain();
        let walks = find_paths(&graph, NodeIndex::new(0), NodeIndex::new(2), 2).unwrap();
        assert_eq!(
            ids(walks),
            vec![vec![0, 1, 0, 1, 2], vec![0, 1, 2], vec![0, 1, 2, 1, 2]]
        );
    }

    #[test]
    fn cycle_yields_both_directions() {
        let graph = square();
        let walks = find_paths(&graph, NodeIndex::new(0), NodeIndex::new(2), 0).unwrap();
        assert_eq!(ids(walks), vec![vec![0, 1, 2], vec![0, 3, 2]]);
    }

    #[test]
    fn unreachable_receiver_is_an_error() {
        let matrix = vec![vec![None, None], vec![None, None]];
        let graph = street_graph_from_matrix(&matrix).unwrap();
        let result = find_paths(&graph, NodeIndex::new(0), NodeIndex::new(1), 0);
        assert!(matches!(
            result,
            Err(Error::NoRoute {
                src: 0,
                receiver: 1
            })
        ));
    }

    #[test]
    fn source_equals_receiver_yields_trivial_walk() {
        let graph = chain();
        let walks = find_paths(&graph, NodeIndex::new(1), NodeIndex::new(1), 0).unwrap();
        assert_eq!(ids(walks), vec![vec![1]]);
    }
}
