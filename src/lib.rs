//! Multi-criteria travel route engine.
//!
//! Locations are joined by undirected edges that carry a [`WeightVector`]
//! (distance, travel time, cost). Each query picks one [`WeightDimension`] and
//! runs Dijkstra over that component only.
//!
//! ```
//! use travel_router::{GraphStore, WeightDimension};
//!
//! let mut graph = GraphStore::new();
//! graph.add_route("A", "B", 10.0, 2.0, 5.0)?;
//! graph.add_route("B", "C", 4.0, 1.0, 2.0)?;
//! graph.add_route("A", "C", 20.0, 10.0, 1.0)?;
//!
//! let route = graph.shortest_path("A", "C", WeightDimension::Cost)?;
//! assert_eq!(route.display_nodes(), "A -> C");
//! assert_eq!(route.total_weight, 1.0);
//! # Ok::<(), travel_router::RouteError>(())
//! ```

pub mod error;
pub mod model;
pub mod route_compute;
pub mod runtime;

pub use error::{ParseDimensionError, Result, RouteError};
pub use model::{
    Adjacency, GraphStore, NodeId, RouteEntry, RoutePath, WeightDimension, WeightVector,
};
pub use route_compute::{RouteComputeEngine, RouteQuery, ShortestPathEngine};
