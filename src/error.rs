use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Source and receiver must be set before solving")]
    EndpointsNotSet,
    // Field is named `src` rather than `source` because thiserror reserves
    // `source` for the error-chain source and requires it to impl Error.
    #[error("No route between node {src} and node {receiver}")]
    NoRoute { src: NodeId, receiver: NodeId },
    #[error("Path too short")]
    PathTooShort,
    #[error("No such junction type at node {node} ({arms} intersecting streets)")]
    UnsupportedJunction { node: NodeId, arms: usize },
    #[error(
        "Junction at node {node} is not (yet) implemented: opposite streets must be same width"
    )]
    UnimplementedGeometry { node: NodeId },
    #[error("Numerical integration failed: {0}")]
    IntegrationFailure(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
