// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{street_graph_from_json, street_graph_from_matrix};
pub use crate::model::{PropagationModel, Solution, StreetEdge, StreetGraph};
pub use crate::propagation::{Direction, Junction, JunctionKind, Transmission};

pub use crate::NodeId;
