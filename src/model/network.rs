//! Street network graph backed by petgraph

use petgraph::Directed;
use petgraph::graph::{Graph, NodeIndex};

use crate::NodeId;
use crate::model::StreetEdge;

/// Immutable street network.
///
/// Each undirected street is stored as a pair of directed edges so that
/// both endpoints keep their own view of the segment (the orientation
/// slot differs per endpoint). Built exclusively through the
/// [`crate::loading`] module, which validates the input matrix.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: Graph<NodeId, StreetEdge, Directed>,
}

impl StreetGraph {
    pub(crate) fn new(graph: Graph<NodeId, StreetEdge, Directed>) -> Self {
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of street segments (each counted once, not per direction)
    pub fn street_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.graph.node_count()
    }

    /// Attributes of the directed edge `from → to`, if the street exists
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&StreetEdge> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    /// Outgoing neighbors of a node
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(node)
    }
}
