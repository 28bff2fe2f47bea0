use serde::Serialize;

use super::{NodeId, WeightDimension};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    pub dimension: WeightDimension,
    pub nodes: Vec<NodeId>,
    pub total_weight: f64,
}

impl RoutePath {
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `A -> B -> C`
    pub fn display_nodes(&self) -> String {
        self.nodes
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// One reachable destination in a single-source route table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub destination: NodeId,
    pub total_weight: f64,
    pub path: Vec<NodeId>,
}
