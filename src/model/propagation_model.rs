//! Propagation model: session state and solve orchestration

use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::model::{StreetEdge, StreetGraph};
use crate::propagation::integrate::integrate_path;
use crate::propagation::walk::assemble_integrand;
use crate::routing::find_paths;
use crate::{Error, NodeId};

/// Source or receiver, pinned to a node with an optional offset along its
/// first/last street.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    node: NodeId,
    offset: f64,
}

/// Wave propagation model over an immutable street network.
///
/// Owns the [`StreetGraph`] for its lifetime; only the source and
/// receiver endpoints mutate between [`solve`](Self::solve) calls.
#[derive(Debug, Clone)]
pub struct PropagationModel {
    graph: StreetGraph,
    source: Option<Endpoint>,
    receiver: Option<Endpoint>,
}

/// Result of one [`PropagationModel::solve`] call.
///
/// `error` is the sum of per-path quadrature error estimates, a
/// conservative additive bound.
#[derive(Debug, Clone, Copy)]
pub struct Solution {
    pub power: f64,
    pub error: f64,
    pub path_count: usize,
}

impl PropagationModel {
    pub fn new(graph: StreetGraph) -> Self {
        Self {
            graph,
            source: None,
            receiver: None,
        }
    }

    /// Builds the model straight from an adjacency matrix.
    ///
    /// # Errors
    ///
    /// See [`crate::loading::street_graph_from_matrix`].
    pub fn from_matrix(matrix: &[Vec<Option<StreetEdge>>]) -> Result<Self, Error> {
        Ok(Self::new(crate::loading::street_graph_from_matrix(matrix)?))
    }

    pub fn graph(&self) -> &StreetGraph {
        &self.graph
    }

    /// Pins the source to a node, `offset` along the first street of
    /// every path.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] if the node does not exist.
    pub fn set_source(&mut self, node: NodeId, offset: f64) -> Result<(), Error> {
        if !self.graph.contains_node(node) {
            return Err(Error::InvalidNodeIndex);
        }
        self.source = Some(Endpoint { node, offset });
        Ok(())
    }

    /// Pins the receiver to a node, `offset` along the last street of
    /// every path.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] if the node does not exist.
    pub fn set_receiver(&mut self, node: NodeId, offset: f64) -> Result<(), Error> {
        if !self.graph.contains_node(node) {
            return Err(Error::InvalidNodeIndex);
        }
        self.receiver = Some(Endpoint { node, offset });
        Ok(())
    }

    /// Solves the propagation problem, logging per-path contributions at
    /// debug level.
    ///
    /// `threshold` is the hop slack beyond the shortest source→receiver
    /// distance; see [`find_paths`] for the cost of raising it.
    ///
    /// # Errors
    ///
    /// [`Error::EndpointsNotSet`] unless both endpoints were set; any
    /// routing, junction or integration error aborts the whole call.
    pub fn solve(&self, threshold: u32) -> Result<Solution, Error> {
        self.solve_with_observer(threshold, |path, power, error| {
            debug!("Contribution from path {path:?}: {power} (error {error})");
        })
    }

    /// Like [`solve`](Self::solve), invoking `observer` with every
    /// enumerated path, its contribution and its quadrature error
    /// estimate.
    pub fn solve_with_observer<F>(&self, threshold: u32, mut observer: F) -> Result<Solution, Error>
    where
        F: FnMut(&[NodeId], f64, f64),
    {
        let (source, receiver) = match (self.source, self.receiver) {
            (Some(source), Some(receiver)) => (source, receiver),
            _ => return Err(Error::EndpointsNotSet),
        };

        let paths = find_paths(
            &self.graph,
            NodeIndex::new(source.node),
            NodeIndex::new(receiver.node),
            threshold,
        )?;

        let mut power = 0.0;
        let mut error = 0.0;
        for path in &paths {
            let integrand = assemble_integrand(&self.graph, path, source.offset, receiver.offset)?;
            let contribution = integrate_path(&integrand)?;
            observer(&integrand.path, contribution.power, contribution.error);
            power += contribution.power;
            error += contribution.error;
        }

        info!(
            "Resulting power from node {} to node {} is {power} (error {error}, {} paths)",
            source.node,
            receiver.node,
            paths.len()
        );
        Ok(Solution {
            power,
            error,
            path_count: paths.len(),
        })
    }
}
