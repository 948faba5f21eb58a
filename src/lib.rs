//! Wave power propagation over street networks.
//!
//! A street network is given as an adjacency matrix whose cells carry the
//! physical attributes of each street segment (length, width, absorption
//! coefficient and compass orientation). Power emitted at a source node is
//! attenuated along every segment and redistributed at every junction
//! according to a geometry-dependent crossing/turning model, as a function
//! of the wave incidence angle. [`PropagationModel::solve`] enumerates all
//! source→receiver walks within a length-slack threshold of the shortest
//! route, integrates each walk's transmission over the incidence angle and
//! sums the contributions.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod propagation;
pub mod routing;

/// Dense node identifier, the row/column index of the adjacency matrix.
pub type NodeId = usize;

pub use error::Error;
pub use loading::{street_graph_from_json, street_graph_from_matrix};
pub use model::{PropagationModel, Solution, StreetEdge, StreetGraph};
