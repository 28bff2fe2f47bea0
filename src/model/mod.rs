pub mod graph;
pub mod node;
pub mod path;
pub mod weights;

pub use graph::{Adjacency, GraphStore};
pub use node::NodeId;
pub use path::{RouteEntry, RoutePath};
pub use weights::{WeightDimension, WeightVector};
