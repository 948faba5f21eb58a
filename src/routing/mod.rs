pub mod dijkstra;
pub mod paths;

pub(crate) use dijkstra::hop_distances;
pub use paths::find_paths;
