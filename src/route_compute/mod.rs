mod dijkstra;
mod frontier;
mod reconstruct;
mod traits;
mod types;

pub use dijkstra::ShortestPathEngine;
pub use frontier::DistanceFrontier;
pub use reconstruct::reconstruct_path;
pub use traits::RouteComputeEngine;
pub use types::{RouteQuery, SearchTree};
