//! Propagation physics: junction transmission, per-path assembly and
//! incidence-angle integration

pub mod integrate;
pub mod junction;
pub mod walk;

pub use junction::{ApproachWidths, Direction, Junction, JunctionKind, Transmission};
