//! Data model for the street network and the propagation session
//!
//! Contains the graph representation of the street network and the
//! model structure that owns it together with the source/receiver state.

pub mod components;
pub mod network;
pub mod propagation_model;

pub use components::StreetEdge;
pub use network::StreetGraph;
pub use propagation_model::{PropagationModel, Solution};
